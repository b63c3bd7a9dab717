//! Log command implementation.

use crate::backend::{BackendClient, RemoteSession};
use crate::config;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::storage::LocalStore;
use colored::Colorize;
use serde::Serialize;

/// Output for log command.
#[derive(Serialize)]
struct LogOutput {
    sessions: Vec<RemoteSession>,
    count: usize,
}

/// Execute the log command.
///
/// Reads the backend's completed-session log, newest first. There is
/// no local session log, so this requires a configured backend.
///
/// # Errors
///
/// Returns an error when no backend is configured or the fetch fails.
pub fn execute(limit: usize, backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let url = config::resolve_backend_url(backend, local).ok_or(Error::BackendNotConfigured)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let ledger = Ledger::with_backend(Box::new(LocalStore::open()), BackendClient::new(url));
        let mut sessions = ledger.session_log().await?;
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sessions.truncate(limit);

        if json {
            let count = sessions.len();
            let output = LogOutput { sessions, count };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        if sessions.is_empty() {
            println!("No completed sessions yet.");
            return Ok(());
        }

        for session in &sessions {
            let when = session.timestamp.format("%Y-%m-%d %H:%M").to_string();
            let mood = session
                .mood
                .map(|m| format!(" [{m}]"))
                .unwrap_or_default();
            println!(
                "{} {} {}{}",
                "✓".green(),
                when.dimmed(),
                session.task_title.bold(),
                mood.dimmed()
            );
            let step = session.chunk_title.as_deref().unwrap_or("N/A");
            println!("    {step}");
        }
        Ok(())
    })
}
