//! Configuration management.
//!
//! This module resolves where Easely keeps its data and which backend
//! (if any) the ledger talks to.
//!
//! # Layout
//!
//! Everything lives in a single data directory, `~/.easely` by default:
//! - `progress.json` - the progress snapshot (see [`crate::storage`])
//! - `big-task-progress.json` - the active breakdown plan, if any
//! - `config.json` - optional settings, currently just `backend_url`
//!
//! A configured backend URL switches the ledger into remote-backed mode;
//! without one it runs purely against the local snapshot.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// Backend endpoint used when `ez backend set` is given no URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Persisted settings (`config.json` in the data directory).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the progress backend. `None` means local-only mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
}

/// Resolve the Easely data directory.
///
/// Priority:
/// 1. `EZ_DATA_DIR` environment variable
/// 2. `~/.easely`
///
/// Returns `None` when neither resolves (no home directory); callers
/// degrade to no-op persistence in that case rather than erroring.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("EZ_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }

    directories::BaseDirs::new().map(|b| b.home_dir().join(".easely"))
}

/// Path to `config.json`, if a data directory resolves.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.json"))
}

/// Load settings from `config.json`.
///
/// Fail-soft: a missing, unreadable, or malformed file resolves to the
/// default config (the error is logged, not raised).
#[must_use]
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read config");
            Config::default()
        }
    }
}

/// Write settings to `config.json`, creating the data directory if needed.
///
/// Returns the path written, for display.
///
/// # Errors
///
/// Returns an error if no data directory resolves or the write fails.
/// Unlike snapshot saves, config writes are user-initiated and fail loud.
pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path().ok_or_else(|| {
        crate::error::Error::Config("no data directory available for config.json".to_string())
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Resolve the backend URL for this invocation.
///
/// Priority:
/// 1. `--local` flag → no backend, local-only mode
/// 2. Explicit `--backend` URL from the CLI
/// 3. `EZ_BACKEND_URL` environment variable
/// 4. `backend_url` from `config.json`
/// 5. None → local-only mode
#[must_use]
pub fn resolve_backend_url(explicit: Option<&str>, force_local: bool) -> Option<String> {
    let env = std::env::var("EZ_BACKEND_URL").ok();
    backend_url_from(explicit, force_local, env.as_deref(), &load_config())
}

/// Pure resolution core behind [`resolve_backend_url`].
fn backend_url_from(
    explicit: Option<&str>,
    force_local: bool,
    env: Option<&str>,
    config: &Config,
) -> Option<String> {
    if force_local {
        return None;
    }

    if let Some(url) = explicit {
        if !url.trim().is_empty() {
            return Some(url.trim_end_matches('/').to_string());
        }
    }

    if let Some(url) = env {
        if !url.trim().is_empty() {
            return Some(url.trim_end_matches('/').to_string());
        }
    }

    config
        .backend_url
        .as_deref()
        .map(|url| url.trim_end_matches('/').to_string())
}
