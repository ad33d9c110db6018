//! Display order of media libraries.
//!
//! The stored order is a plain list of library names. Applying it to the
//! current set of libraries is a pure function so the sorted grid never drifts
//! from its inputs; names missing from the stored order fall back to an
//! alphabetical tail.

pub mod store;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::types::{MoveDirection, VirtualFolder};

pub use store::{MemoryOrderStore, OrderStore, SqliteOrderStore};

/// Alphabetical comparison used for every fallback sort.
///
/// Case-folded first so "anime" sits next to "Anime"; on a case-only tie the
/// lowercase spelling comes first. Folded names compare by code point, so
/// accented initials ("Émissions") sort after "z" rather than next to their
/// base letter.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}

/// Sorts `libraries` by their rank in `order`.
///
/// Libraries absent from `order` go after every ranked library, alphabetically
/// among themselves. An empty `order` yields a purely alphabetical list.
pub fn sort_by_order(libraries: &[VirtualFolder], order: &[String]) -> Vec<VirtualFolder> {
    let mut sorted = libraries.to_vec();
    if order.is_empty() {
        sorted.sort_by(|a, b| compare_names(&a.name, &b.name));
        return sorted;
    }

    // First occurrence wins when a name is listed twice.
    let mut rank: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for (idx, name) in order.iter().enumerate() {
        rank.entry(name.as_str()).or_insert(idx);
    }

    sorted.sort_by(|a, b| match (rank.get(a.name.as_str()), rank.get(b.name.as_str())) {
        (Some(ra), Some(rb)) => ra.cmp(rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_names(&a.name, &b.name),
    });
    sorted
}

/// Swaps `name` with its neighbour in `direction`.
///
/// Returns the order unchanged when `name` is not listed or already sits at
/// the boundary.
pub fn move_entry(order: &[String], name: &str, direction: MoveDirection) -> Vec<String> {
    let mut next = order.to_vec();
    let Some(idx) = order.iter().position(|n| n == name) else {
        return next;
    };
    match direction {
        MoveDirection::Up if idx > 0 => next.swap(idx - 1, idx),
        MoveDirection::Down if idx + 1 < next.len() => next.swap(idx, idx + 1),
        _ => {}
    }
    next
}

/// Alphabetical list of the current library names.
pub fn default_order(libraries: &[VirtualFolder]) -> Vec<String> {
    let mut names: Vec<String> = libraries.iter().map(|l| l.name.clone()).collect();
    names.sort_by(|a, b| compare_names(a, b));
    names
}

/// The stored order followed by every current library it does not list yet,
/// alphabetically. This is what the reorder control shows and what a move
/// persists.
pub fn effective_order(order: &[String], libraries: &[VirtualFolder]) -> Vec<String> {
    let known: HashSet<&str> = order.iter().map(String::as_str).collect();
    let mut missing: Vec<&str> =
        libraries.iter().map(|l| l.name.as_str()).filter(|name| !known.contains(name)).collect();
    missing.sort_by(|a, b| compare_names(a, b));
    missing.dedup();

    let mut effective = order.to_vec();
    effective.extend(missing.into_iter().map(str::to_owned));
    effective
}

/// Order to persist when library data arrives and nothing is stored yet.
pub fn seed_if_empty(stored: &[String], libraries: &[VirtualFolder]) -> Option<Vec<String>> {
    if !stored.is_empty() || libraries.is_empty() {
        return None;
    }
    Some(default_order(libraries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libs(names: &[&str]) -> Vec<VirtualFolder> {
        names.iter().enumerate().map(|(i, n)| VirtualFolder::new(*n, format!("id-{}", i))).collect()
    }

    fn names(libs: &[VirtualFolder]) -> Vec<&str> {
        libs.iter().map(|l| l.name.as_str()).collect()
    }

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_order_sorts_alphabetically() {
        let sorted = sort_by_order(&libs(&["TV", "Movies", "Music"]), &[]);
        assert_eq!(names(&sorted), vec!["Movies", "Music", "TV"]);
    }

    #[test]
    fn unknown_names_trail_alphabetically() {
        let sorted = sort_by_order(
            &libs(&["Zeta", "Movies", "NewLib", "TV", "Alpha", "Music"]),
            &order(&["TV", "Movies", "Music"]),
        );
        assert_eq!(names(&sorted), vec!["TV", "Movies", "Music", "Alpha", "NewLib", "Zeta"]);
    }

    #[test]
    fn stale_names_in_order_are_ignored() {
        let sorted = sort_by_order(&libs(&["Music", "Movies"]), &order(&["Gone", "Music", "Removed", "Movies"]));
        assert_eq!(names(&sorted), vec!["Music", "Movies"]);
    }

    #[test]
    fn sort_is_a_permutation() {
        let input = libs(&["b", "A", "c", "a", "B"]);
        let sorted = sort_by_order(&input, &order(&["c", "x"]));
        assert_eq!(sorted.len(), input.len());
        for lib in &input {
            assert!(sorted.contains(lib));
        }
    }

    #[test]
    fn duplicate_names_rank_by_first_occurrence() {
        let sorted = sort_by_order(&libs(&["A", "B"]), &order(&["B", "A", "B"]));
        assert_eq!(names(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn case_folded_alphabetical_fallback() {
        let sorted = sort_by_order(&libs(&["books", "Anime", "Audio"]), &[]);
        assert_eq!(names(&sorted), vec!["Anime", "Audio", "books"]);
    }

    #[test]
    fn case_only_tie_puts_lowercase_first() {
        let sorted = sort_by_order(&libs(&["Anime", "anime", "Zoo", "Émissions"]), &[]);
        assert_eq!(names(&sorted), vec!["anime", "Anime", "Zoo", "Émissions"]);
    }

    #[test]
    fn effective_order_appends_unlisted_libraries() {
        let l = libs(&["Movies", "TV", "Anime", "Books"]);
        assert_eq!(effective_order(&order(&["TV", "Movies"]), &l), order(&["TV", "Movies", "Anime", "Books"]));
        // Stale names stay where they are
        assert_eq!(effective_order(&order(&["Gone", "TV"]), &libs(&["TV"])), order(&["Gone", "TV"]));
        assert_eq!(effective_order(&[], &libs(&["b", "A"])), order(&["A", "b"]));
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let o = order(&["A", "B", "C"]);
        assert_eq!(move_entry(&o, "B", MoveDirection::Up), order(&["B", "A", "C"]));
        assert_eq!(move_entry(&o, "B", MoveDirection::Down), order(&["A", "C", "B"]));
    }

    #[test]
    fn move_at_boundary_is_noop() {
        let o = order(&["A", "B", "C"]);
        assert_eq!(move_entry(&o, "A", MoveDirection::Up), o);
        assert_eq!(move_entry(&o, "C", MoveDirection::Down), o);
    }

    #[test]
    fn move_missing_name_is_noop() {
        let o = order(&["A", "B", "C"]);
        assert_eq!(move_entry(&o, "NotPresent", MoveDirection::Up), o);
        assert_eq!(move_entry(&[], "A", MoveDirection::Down), Vec::<String>::new());
    }

    #[test]
    fn seed_only_when_nothing_stored() {
        let l = libs(&["TV", "Movies", "Music"]);
        assert_eq!(seed_if_empty(&[], &l), Some(order(&["Movies", "Music", "TV"])));
        assert_eq!(seed_if_empty(&order(&["TV"]), &l), None);
        assert_eq!(seed_if_empty(&[], &[]), None);
    }
}
