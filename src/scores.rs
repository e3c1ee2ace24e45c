//! Score and best-score-by-mode tracking
//!
//! Bests are read from the store once, at construction, and written back at
//! most once per death when a record falls.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::persistence::BestScoreStore;

/// Best score for each mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub arcade: u32,
    pub pro: u32,
}

impl BestScores {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Arcade => self.arcade,
            Mode::Pro => self.pro,
        }
    }

    fn set(&mut self, mode: Mode, value: u32) {
        match mode {
            Mode::Arcade => self.arcade = value,
            Mode::Pro => self.pro = value,
        }
    }
}

/// Running score, near misses and per-mode bests
pub struct ScoreTracker {
    score: u32,
    near_misses: u32,
    best: BestScores,
    store: Box<dyn BestScoreStore>,
}

impl ScoreTracker {
    /// Read both bests from `store`; it is never read again
    pub fn load(store: Box<dyn BestScoreStore>) -> Self {
        let mut best = BestScores::default();
        for mode in Mode::ALL {
            best.set(mode, store.load(mode.storage_key()).unwrap_or(0));
        }
        log::info!("Best scores: arcade={} pro={}", best.arcade, best.pro);
        Self {
            score: 0,
            near_misses: 0,
            best,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn near_misses(&self) -> u32 {
        self.near_misses
    }

    pub fn best(&self) -> BestScores {
        self.best
    }

    pub fn best_for(&self, mode: Mode) -> u32 {
        self.best.get(mode)
    }

    /// Add points earned this tick
    pub fn add(&mut self, points: u32, near_misses: u32) {
        self.score = self.score.saturating_add(points);
        self.near_misses = self.near_misses.saturating_add(near_misses);
    }

    /// Zero the running counters for a new run
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.near_misses = 0;
    }

    /// Compare a finished run against the mode's best. On a new record the
    /// in-memory best is updated and one write is requested; a failed write
    /// only costs durability. Returns the new best if one was set.
    pub fn record_death(&mut self, mode: Mode, score: u32) -> Option<u32> {
        if score <= self.best.get(mode) {
            return None;
        }
        self.best.set(mode, score);
        match self.store.save(mode.storage_key(), score) {
            Ok(()) => log::info!("New {} best: {}", mode.as_str(), score),
            Err(e) => log::warn!("New {} best {} not saved: {}", mode.as_str(), score, e),
        }
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StorageError};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts writes through a shared handle so the test can observe them
    struct CountingStore {
        pro: u32,
        writes: Rc<Cell<usize>>,
        fail: bool,
    }

    impl BestScoreStore for CountingStore {
        fn load(&self, key: &str) -> Option<u32> {
            (key == Mode::Pro.storage_key()).then_some(self.pro)
        }

        fn save(&mut self, _key: &str, _value: u32) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            if self.fail {
                Err(StorageError::Unavailable)
            } else {
                Ok(())
            }
        }
    }

    fn tracker(pro: u32, fail: bool) -> (ScoreTracker, Rc<Cell<usize>>) {
        let writes = Rc::new(Cell::new(0));
        let store = CountingStore {
            pro,
            writes: writes.clone(),
            fail,
        };
        (ScoreTracker::load(Box::new(store)), writes)
    }

    #[test]
    fn test_loads_bests_once() {
        let store = MemoryStore::new().with_value("floppy_best_arcade", 4);
        let scores = ScoreTracker::load(Box::new(store));
        assert_eq!(scores.best_for(Mode::Arcade), 4);
        assert_eq!(scores.best_for(Mode::Pro), 0);
    }

    #[test]
    fn test_new_record_writes_once() {
        let (mut scores, writes) = tracker(5, false);
        assert_eq!(scores.record_death(Mode::Pro, 7), Some(7));
        assert_eq!(scores.best_for(Mode::Pro), 7);
        assert_eq!(writes.get(), 1);
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let (mut scores, writes) = tracker(5, false);
        assert_eq!(scores.record_death(Mode::Pro, 3), None);
        assert_eq!(scores.record_death(Mode::Pro, 5), None);
        assert_eq!(scores.best_for(Mode::Pro), 5);
        assert_eq!(writes.get(), 0);
    }

    #[test]
    fn test_failed_write_keeps_best_in_memory() {
        let (mut scores, writes) = tracker(5, true);
        assert_eq!(scores.record_death(Mode::Pro, 9), Some(9));
        assert_eq!(scores.best_for(Mode::Pro), 9);
        assert_eq!(writes.get(), 1);
    }

    #[test]
    fn test_bests_are_per_mode() {
        let (mut scores, _) = tracker(5, false);
        assert_eq!(scores.record_death(Mode::Arcade, 2), Some(2));
        assert_eq!(scores.best_for(Mode::Pro), 5);
    }

    #[test]
    fn test_add_and_reset() {
        let (mut scores, _) = tracker(0, false);
        scores.add(2, 1);
        scores.add(1, 0);
        assert_eq!((scores.score(), scores.near_misses()), (3, 1));
        scores.reset_run();
        assert_eq!((scores.score(), scores.near_misses()), (0, 0));
    }
}
