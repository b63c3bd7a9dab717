//! Stats command implementation.

use crate::error::{Error, Result};
use crate::model::XP_PER_LEVEL;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

const BAR_WIDTH: u32 = 20;

/// Output for stats command.
#[derive(Serialize)]
struct StatsOutput<'a> {
    xp: u32,
    xp_per_level: u32,
    level: u32,
    streak: u32,
    last_active: Option<NaiveDate>,
    pending_tasks: usize,
    source: &'a str,
}

/// Render the XP progress toward the next level as a fixed-width bar.
fn xp_bar(xp: u32) -> String {
    let filled = (xp.min(XP_PER_LEVEL) * BAR_WIDTH / XP_PER_LEVEL) as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH as usize - filled)
    )
}

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let ledger = super::open_ledger(backend, local).await;
        let progress = ledger.progress();

        if json {
            let output = StatsOutput {
                xp: progress.xp,
                xp_per_level: XP_PER_LEVEL,
                level: progress.level,
                streak: progress.streak,
                last_active: progress.last_date,
                pending_tasks: progress.history.len(),
                source: ledger.source().as_str(),
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        println!("Easely Progress");
        println!("===============");
        println!();
        println!("Level:   {}", progress.level.to_string().bold());
        println!(
            "XP:      {}/{}  {}",
            progress.xp,
            XP_PER_LEVEL,
            xp_bar(progress.xp).green()
        );
        println!(
            "Streak:  {} day{}",
            progress.streak,
            if progress.streak == 1 { "" } else { "s" }
        );
        if let Some(date) = progress.last_date {
            println!("Last active: {date}");
        }
        println!();
        println!(
            "Pending: {} task{}",
            progress.history.len(),
            if progress.history.len() == 1 { "" } else { "s" }
        );
        println!("Source:  {}", ledger.source().as_str().dimmed());
        Ok(())
    })
}
