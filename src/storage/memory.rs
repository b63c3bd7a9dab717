//! In-memory snapshot store.
//!
//! Drop-in [`ProgressStore`] for tests and ephemeral runs. Also doubles
//! as the simulator for an unavailable storage environment via
//! [`MemoryStore::unavailable`].

use std::sync::Mutex;

use super::{ProgressStore, SaveStatus};
use crate::model::Progress;

/// Process-local store holding at most one snapshot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Progress>>,
    unavailable: bool,
}

impl MemoryStore {
    /// Empty store; first load yields the zero-state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a snapshot.
    #[must_use]
    pub fn with_snapshot(progress: Progress) -> Self {
        Self {
            snapshot: Mutex::new(Some(progress)),
            unavailable: false,
        }
    }

    /// Store that behaves like a missing storage environment: loads
    /// yield the zero-state and saves report [`SaveStatus::Skipped`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            snapshot: Mutex::new(None),
            unavailable: true,
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Progress {
        if self.unavailable {
            return Progress::default();
        }
        self.snapshot
            .lock()
            .map(|guard| guard.clone().unwrap_or_default())
            .unwrap_or_default()
    }

    fn save(&self, progress: &Progress) -> SaveStatus {
        if self.unavailable {
            return SaveStatus::Skipped;
        }
        match self.snapshot.lock() {
            Ok(mut guard) => {
                *guard = Some(progress.clone());
                SaveStatus::Saved
            }
            Err(_) => SaveStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_zero_state() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), Progress::default());
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        let mut progress = Progress::default();
        progress.xp = 40;
        progress.streak = 3;

        assert_eq!(store.save(&progress), SaveStatus::Saved);
        assert_eq!(store.load(), progress);
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let store = MemoryStore::unavailable();
        let mut progress = Progress::default();
        progress.xp = 10;

        assert_eq!(store.save(&progress), SaveStatus::Skipped);
        assert_eq!(store.load(), Progress::default());
    }
}
