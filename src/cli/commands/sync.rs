//! Sync command implementation.

use crate::backend::BackendClient;
use crate::config;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::model::XP_PER_LEVEL;
use crate::storage::LocalStore;
use colored::Colorize;
use serde::Serialize;

/// Output for sync command.
#[derive(Serialize)]
struct SyncOutput<'a> {
    backend_url: &'a str,
    xp: u32,
    level: u32,
    streak: u32,
    pending_tasks: usize,
    snapshot: &'a str,
}

/// Execute the sync command.
///
/// Pulls server truth wholesale and refreshes the local snapshot.
///
/// # Errors
///
/// Returns an error when no backend is configured or the pull fails;
/// the previous snapshot stays in place on failure.
pub fn execute(backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let url = config::resolve_backend_url(backend, local).ok_or(Error::BackendNotConfigured)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let mut ledger = Ledger::with_backend(
            Box::new(LocalStore::open()),
            BackendClient::new(url.clone()),
        );
        let status = ledger.resync().await?;
        let progress = ledger.progress();

        if json {
            let output = SyncOutput {
                backend_url: &url,
                xp: progress.xp,
                level: progress.level,
                streak: progress.streak,
                pending_tasks: progress.history.len(),
                snapshot: status.as_str(),
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        println!("{} Synced from {}", "✓".green(), url.bold());
        println!(
            "  Level {} | {}/{} XP | {} pending task{}",
            progress.level,
            progress.xp,
            XP_PER_LEVEL,
            progress.history.len(),
            if progress.history.len() == 1 { "" } else { "s" }
        );
        if !status.is_saved() {
            println!(
                "  {}",
                format!("Snapshot not persisted ({})", status.as_str()).yellow()
            );
        }
        Ok(())
    })
}
