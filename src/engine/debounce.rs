use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Trailing-edge debouncer keyed by input target.
///
/// Each key holds at most one pending deadline. Scheduling a key that is
/// already pending replaces its deadline, so a burst of triggers collapses
/// into a single firing `wait` after the last one. Time is supplied by the
/// caller; nothing here sleeps.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    wait: Duration,
    pending: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> Debouncer<K> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: HashMap::new(),
        }
    }

    /// Arm (or re-arm) `key` to fire at `now + wait`.
    pub fn schedule(&mut self, key: K, now: Instant) {
        self.pending.insert(key, now + self.wait);
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Instant)> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(k, &deadline)| (k.clone(), deadline))
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);

        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(k, _)| k).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline, for sizing the host's sleep.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }
}
