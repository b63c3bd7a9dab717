//! Remove command implementation.

use crate::error::{Error, Result};
use colored::Colorize;
use serde::Serialize;

/// Output for remove command.
#[derive(Serialize)]
struct RemoveOutput<'a> {
    id: &'a str,
    title: &'a str,
    removed: bool,
}

/// Execute the remove command.
///
/// Discards a pending task. No XP is awarded and no session is logged.
///
/// # Errors
///
/// Returns an error for an unknown or ambiguous task id, or when the
/// remote delete fails.
pub fn execute(id: &str, backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let mut ledger = super::open_ledger(backend, local).await;
        let task = ledger.remove_task(id).await?;

        if json {
            let output = RemoveOutput {
                id: &task.id,
                title: &task.title,
                removed: true,
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        println!(
            "Removed: {} {}",
            task.title.bold(),
            format!("[{}]", task.id).dimmed()
        );
        Ok(())
    })
}
