//! Best score
//!
//! A single integer persisted under one key. Read once at load, written
//! whenever it is beaten.

use crate::persistence::{KeyValueStore, StorageError, load_json, save_json};

/// Persisted best score (take-max)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pudding_run_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Value to show next to a live score
    pub fn display(&self, score: u64) -> u64 {
        self.best.max(score)
    }

    /// Record a finished session. Returns true if it set a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage; missing or unreadable values start at 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<u64>(store, Self::STORAGE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, &self.best)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_take_max() {
        let mut high = HighScore::new(50);
        assert!(!high.submit(20));
        assert_eq!(high.best(), 50);
        assert!(!high.submit(50));
        assert!(high.submit(51));
        assert_eq!(high.best(), 51);
        assert_eq!(high.display(70), 70);
    }

    #[test]
    fn test_persists() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
        HighScore::new(123).save(&mut store).unwrap();
        assert_eq!(HighScore::load(&store).best(), 123);
    }

    #[test]
    fn test_garbage_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "{oops").unwrap();
        assert_eq!(HighScore::load(&store).best(), 0);
    }
}
