//! Recent command implementation.

use crate::error::{Error, Result};
use crate::model::TaskEntry;
use colored::Colorize;
use serde::Serialize;

/// Output for recent command.
#[derive(Serialize)]
struct RecentOutput<'a> {
    tasks: &'a [TaskEntry],
    count: usize,
    source: &'a str,
}

/// Execute the recent command.
///
/// Shows the most recent pending tasks, newest first. Read-only.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(limit: usize, backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let ledger = super::open_ledger(backend, local).await;
        let tasks = ledger.recent_tasks(limit);

        if json {
            let output = RecentOutput {
                tasks,
                count: tasks.len(),
                source: ledger.source().as_str(),
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        if tasks.is_empty() {
            println!("No pending tasks.");
            println!();
            println!("Add one with: ez add \"Write the report\"");
            return Ok(());
        }

        for task in tasks {
            println!(
                "{} {} {}",
                task.id.dimmed(),
                task.title.bold(),
                format!("[{}]", task.mood).dimmed()
            );
            println!("    {}", task.step.cyan());
        }
        Ok(())
    })
}
