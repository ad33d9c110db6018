use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use libraryboard::db;
use libraryboard::ordering::{default_order, move_entry, sort_by_order, OrderStore, SqliteOrderStore};
use libraryboard::types::{MoveDirection, VirtualFolder};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::runtime::Runtime;

fn make_libraries(count: usize) -> Vec<VirtualFolder> {
    (0..count).map(|i| VirtualFolder::new(format!("Library {:04}", (i * 7919) % count), format!("id-{}", i))).collect()
}

/// Stored order covering half the libraries, reversed, so both the ranked
/// head and the alphabetical tail get exercised.
fn partial_order(libraries: &[VirtualFolder]) -> Vec<String> {
    let mut order = default_order(libraries);
    order.truncate(libraries.len() / 2);
    order.reverse();
    order
}

fn benchmark_sort_by_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_order");

    for count in [10usize, 100, 1000].iter() {
        let libraries = make_libraries(*count);
        let order = partial_order(&libraries);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(sort_by_order(black_box(&libraries), black_box(&order))))
        });
    }
    group.finish();
}

fn benchmark_alphabetical_fallback(c: &mut Criterion) {
    let libraries = make_libraries(500);
    c.bench_function("sort_alphabetical_500", |b| b.iter(|| black_box(sort_by_order(&libraries, &[]))));
}

fn benchmark_move_entry(c: &mut Criterion) {
    let order = default_order(&make_libraries(500));
    let middle = order[250].clone();
    c.bench_function("move_entry_500", |b| {
        b.iter(|| black_box(move_entry(black_box(&order), black_box(&middle), MoveDirection::Up)))
    });
}

fn benchmark_persist_order(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = rt.block_on(async {
        let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
        db::init_db(&pool).await.unwrap();
        SqliteOrderStore::new(pool)
    });
    let order = default_order(&make_libraries(50));

    c.bench_function("persist_order_50", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.set_order(&order).await.unwrap();
                black_box(store.get_order().await)
            })
        })
    });
}

criterion_group!(
    benches,
    benchmark_sort_by_order,
    benchmark_alphabetical_fallback,
    benchmark_move_entry,
    benchmark_persist_order
);
criterion_main!(benches);
