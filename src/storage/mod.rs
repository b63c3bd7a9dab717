//! Snapshot storage layer for Easely.
//!
//! Persistence here is deliberately forgiving: loads never fail (any read
//! or parse problem resolves to the zero-state after logging), and saves
//! are best-effort, reporting a [`SaveStatus`] instead of erroring. The
//! in-memory `Progress` stays authoritative for the session even when a
//! save fails.
//!
//! # Submodules
//!
//! - [`local`] - JSON snapshot files in the data directory
//! - [`memory`] - In-process store for tests and ephemeral runs

pub mod local;
pub mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::model::Progress;

/// Logical key for the progress snapshot.
pub const PROGRESS_KEY: &str = "progress";

/// Logical key for the breakdown plan snapshot.
pub const PLAN_KEY: &str = "big-task-progress";

/// Outcome of a best-effort save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// The snapshot is on disk.
    Saved,
    /// No storage environment is available; nothing was written.
    Skipped,
    /// The write failed; details were logged.
    Failed,
}

impl SaveStatus {
    /// Lowercase string form for structured output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    /// Whether the snapshot is durably persisted.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Where progress snapshots are durably kept.
///
/// The contract both implementations honor:
/// - `load` never fails: a missing, unreadable, or malformed snapshot
///   resolves to the zero-state and the problem is logged.
/// - `save` is best-effort: failures are logged and reported through the
///   returned status, never raised.
pub trait ProgressStore {
    /// Load the snapshot, or the zero-state if none can be read.
    fn load(&self) -> Progress;

    /// Persist the snapshot, best-effort.
    fn save(&self, progress: &Progress) -> SaveStatus;
}
