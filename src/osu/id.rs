//! Synthetic ids for beatmaps which declare no `BeatmapID`.

use std::sync::atomic::{AtomicI32, Ordering};

/// A source of synthetic beatmap ids: `-1`, `-2`, `-3`, ...
///
/// Every call of [`SyntheticIds::next_id`] returns a value strictly lower than all the values
/// returned before it, also across threads. The counter stops at `i32::MIN` instead of wrapping
/// into the positive ids declared by maps. Share one instance by reference for a whole run, or
/// use [`SyntheticIds::global`] which lives as long as the process.
#[derive(Debug)]
pub struct SyntheticIds(AtomicI32);

static GLOBAL: SyntheticIds = SyntheticIds::new();

impl SyntheticIds {
    /// The first id handed out.
    pub const FIRST: i32 = -1;

    /// Creates a counter starting at [`SyntheticIds::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicI32::new(Self::FIRST))
    }

    /// Creates a counter whose first id is `first`, such as to continue a previous run.
    ///
    /// Values above [`SyntheticIds::FIRST`] are clamped to it.
    #[must_use]
    pub const fn starting_at(first: i32) -> Self {
        Self(AtomicI32::new(if first < Self::FIRST {
            first
        } else {
            Self::FIRST
        }))
    }

    /// The counter shared by the whole process.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Takes the next id, or `None` once the ids are exhausted.
    pub fn next_id(&self) -> Option<i32> {
        self.0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_sub(1))
            .ok()
    }

    /// The id the next call of [`SyntheticIds::next_id`] would return, unless exhausted.
    #[must_use]
    pub fn peek(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for SyntheticIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread};

    use super::*;

    #[test]
    fn decreasing_from_minus_one() {
        let ids = SyntheticIds::new();
        assert_eq!(ids.peek(), -1);
        assert_eq!(ids.next_id(), Some(-1));
        assert_eq!(ids.next_id(), Some(-2));
        assert_eq!(ids.next_id(), Some(-3));
        assert_eq!(ids.peek(), -4);
    }

    #[test]
    fn unique_across_threads() {
        let ids = Arc::new(SyntheticIds::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..1000).filter_map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(id < 0);
                assert!(seen.insert(id), "duplicated id {id}");
            }
        }
        assert_eq!(seen.len(), 8000);
        assert_eq!(ids.peek(), -8001);
    }

    #[test]
    fn stops_at_min_without_wrapping() {
        let ids = SyntheticIds::starting_at(i32::MIN + 1);
        assert_eq!(ids.next_id(), Some(i32::MIN + 1));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.peek(), i32::MIN);

        assert_eq!(SyntheticIds::starting_at(7).peek(), SyntheticIds::FIRST);
    }

    #[test]
    fn global_is_shared() {
        let a = SyntheticIds::global().next_id().unwrap();
        let b = SyntheticIds::global().next_id().unwrap();
        assert!(b < a);
    }
}
