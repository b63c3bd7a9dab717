//! Complete command implementation.

use crate::error::{Error, Result};
use crate::model::XP_PER_LEVEL;
use colored::Colorize;
use serde::Serialize;

/// Output for complete command.
#[derive(Serialize)]
struct CompleteOutput<'a> {
    id: &'a str,
    title: &'a str,
    xp_awarded: u32,
    leveled_up: bool,
    xp: u32,
    level: u32,
    streak: u32,
    synced: bool,
}

/// Execute the complete command.
///
/// # Errors
///
/// Returns an error for an unknown or ambiguous task id, or when the
/// remote write fails.
pub fn execute(id: &str, backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let mut ledger = super::open_ledger(backend, local).await;
        let receipt = ledger.complete_task(id).await?;
        let progress = ledger.progress();

        if json {
            let output = CompleteOutput {
                id: &receipt.task.id,
                title: &receipt.task.title,
                xp_awarded: receipt.xp_awarded,
                leveled_up: receipt.leveled_up,
                xp: progress.xp,
                level: progress.level,
                streak: progress.streak,
                synced: receipt.synced,
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        println!(
            "{} {} (+{} XP)",
            "✓".green(),
            receipt.task.title.bold(),
            receipt.xp_awarded
        );
        if receipt.leveled_up {
            println!(
                "{}",
                format!("  Level up! You reached level {}.", progress.level)
                    .yellow()
                    .bold()
            );
        }
        println!(
            "  Level {} | {}/{} XP | streak {}",
            progress.level, progress.xp, XP_PER_LEVEL, progress.streak
        );
        if !receipt.synced {
            println!("  {}", "Local view may be stale; run: ez sync".dimmed());
        }
        Ok(())
    })
}
