use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operational counters for the dashboard backend
#[derive(Clone)]
pub struct Metrics {
    pub scans_requested: Arc<AtomicU64>,
    pub scans_skipped: Arc<AtomicU64>,
    pub order_moves: Arc<AtomicU64>,
    pub libraries_added: Arc<AtomicU64>,
    pub task_polls: Arc<AtomicU64>,
    pub task_poll_failures: Arc<AtomicU64>,
    pub folder_fetch_failures: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            scans_requested: Arc::new(AtomicU64::new(0)),
            scans_skipped: Arc::new(AtomicU64::new(0)),
            order_moves: Arc::new(AtomicU64::new(0)),
            libraries_added: Arc::new(AtomicU64::new(0)),
            task_polls: Arc::new(AtomicU64::new(0)),
            task_poll_failures: Arc::new(AtomicU64::new(0)),
            folder_fetch_failures: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_scans_requested(&self) {
        self.scans_requested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_scans_skipped(&self) {
        self.scans_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_order_moves(&self) {
        self.order_moves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_libraries_added(&self) {
        self.libraries_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_task_polls(&self) {
        self.task_polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_task_poll_failures(&self) {
        self.task_poll_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_folder_fetch_failures(&self) {
        self.folder_fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scans_requested: self.scans_requested.load(Ordering::Relaxed),
            scans_skipped: self.scans_skipped.load(Ordering::Relaxed),
            order_moves: self.order_moves.load(Ordering::Relaxed),
            libraries_added: self.libraries_added.load(Ordering::Relaxed),
            task_polls: self.task_polls.load(Ordering::Relaxed),
            task_poll_failures: self.task_poll_failures.load(Ordering::Relaxed),
            folder_fetch_failures: self.folder_fetch_failures.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub scans_requested: u64,
    pub scans_skipped: u64,
    pub order_moves: u64,
    pub libraries_added: u64,
    pub task_polls: u64,
    pub task_poll_failures: u64,
    pub folder_fetch_failures: u64,
    pub uptime_seconds: u64,
}
