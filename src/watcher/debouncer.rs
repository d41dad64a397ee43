//! Debounces file change events by path so a burst of saves within the
//! configured window collapses into a single re-index (spec.md §4.E).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    pending: HashMap<PathBuf, Instant>,
    duration: Duration,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: HashMap::new(),
            duration: Duration::from_millis(debounce_ms),
        }
    }

    /// Records a change, resetting the debounce timer for this path.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path, Instant::now());
    }

    pub fn remove(&mut self, path: &PathBuf) {
        self.pending.remove(path);
    }

    /// Removes and returns every path stable for at least `duration`.
    pub fn take_ready(&mut self) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut ready = Vec::new();
        self.pending.retain(|path, last_change| {
            if now.duration_since(*last_change) >= self.duration {
                ready.push(path.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn stable_paths_become_ready_after_the_window() {
        let mut debouncer = Debouncer::new(30);
        let path = PathBuf::from("/ws/file.rs");
        debouncer.record(path.clone());
        assert!(debouncer.take_ready().is_empty());
        sleep(Duration::from_millis(40));
        let ready = debouncer.take_ready();
        assert_eq!(ready, vec![path]);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn a_new_change_resets_the_timer() {
        let mut debouncer = Debouncer::new(40);
        let path = PathBuf::from("/ws/file.rs");
        debouncer.record(path.clone());
        sleep(Duration::from_millis(25));
        debouncer.record(path.clone());
        sleep(Duration::from_millis(25));
        assert!(debouncer.take_ready().is_empty());
        sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready().len(), 1);
    }

    #[test]
    fn remove_clears_a_pending_path() {
        let mut debouncer = Debouncer::new(50);
        let path = PathBuf::from("/ws/file.rs");
        debouncer.record(path.clone());
        debouncer.remove(&path);
        assert!(!debouncer.has_pending());
    }
}
