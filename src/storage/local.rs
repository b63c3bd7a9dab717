//! Local snapshot store.
//!
//! One JSON file per logical key in the data directory:
//! `progress.json` for the ledger snapshot and `big-task-progress.json`
//! for the active breakdown plan. Writes go through a temp file, fsync,
//! and rename, so a crash cannot leave a torn snapshot behind.
//!
//! When no data directory resolves (no home, blank `EZ_DATA_DIR`), the
//! store degrades instead of erroring: loads return the zero-state and
//! saves report [`SaveStatus::Skipped`].

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{PLAN_KEY, PROGRESS_KEY, ProgressStore, SaveStatus};
use crate::config;
use crate::model::{BreakdownPlan, Progress};

/// File-backed snapshot store.
#[derive(Debug)]
pub struct LocalStore {
    /// `None` when no data directory resolves; degraded mode.
    dir: Option<PathBuf>,
}

impl LocalStore {
    /// Store rooted at the resolved data directory (`EZ_DATA_DIR` or
    /// `~/.easely`). Never fails; an unresolvable directory produces a
    /// degraded store.
    #[must_use]
    pub fn open() -> Self {
        let dir = config::data_dir();
        if dir.is_none() {
            debug!("no data directory available; persistence disabled");
        }
        Self { dir }
    }

    /// Store rooted at an explicit directory.
    #[must_use]
    pub fn at(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    fn key_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    /// Read and parse a snapshot file. `None` on any problem, logged.
    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key)?;

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key, "no snapshot yet");
                return None;
            }
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "could not read snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "ignoring malformed snapshot");
                None
            }
        }
    }

    /// Write a snapshot file atomically: temp file, fsync, rename.
    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> SaveStatus {
        let Some(path) = self.key_path(key) else {
            debug!(key, "no data directory; skipping save");
            return SaveStatus::Skipped;
        };

        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "could not serialize snapshot");
                return SaveStatus::Failed;
            }
        };

        match atomic_write(&path, &json) {
            Ok(()) => {
                debug!(key, path = %path.display(), "snapshot saved");
                SaveStatus::Saved
            }
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "could not save snapshot");
                SaveStatus::Failed
            }
        }
    }

    /// Load the active breakdown plan, if one is stored and parseable.
    #[must_use]
    pub fn load_plan(&self) -> Option<BreakdownPlan> {
        self.read_key(PLAN_KEY)
    }

    /// Persist the breakdown plan, best-effort.
    pub fn save_plan(&self, plan: &BreakdownPlan) -> SaveStatus {
        self.write_key(PLAN_KEY, plan)
    }

    /// Remove the stored breakdown plan. Removing an absent plan is not
    /// an error.
    pub fn clear_plan(&self) -> SaveStatus {
        let Some(path) = self.key_path(PLAN_KEY) else {
            return SaveStatus::Skipped;
        };

        match fs::remove_file(&path) {
            Ok(()) => SaveStatus::Saved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SaveStatus::Saved,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not clear plan snapshot");
                SaveStatus::Failed
            }
        }
    }
}

impl ProgressStore for LocalStore {
    fn load(&self) -> Progress {
        if self.dir.is_none() {
            return Progress::default();
        }
        self.read_key(PROGRESS_KEY).unwrap_or_default()
    }

    fn save(&self, progress: &Progress) -> SaveStatus {
        self.write_key(PROGRESS_KEY, progress)
    }
}

/// Write content to a file atomically.
///
/// Writes to a `.json.tmp` sibling, fsyncs, then renames over the target.
/// If any step fails the original file remains untouched.
fn atomic_write(path: &std::path::Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)
}
