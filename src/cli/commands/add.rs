//! Add command implementation.

use crate::cli::AddArgs;
use crate::error::{Error, Result};
use crate::model::Mood;
use crate::stepgen;
use colored::Colorize;
use serde::Serialize;

/// Output for add command.
#[derive(Serialize)]
struct AddOutput<'a> {
    id: &'a str,
    title: &'a str,
    step: &'a str,
    mood: &'a str,
    source: &'a str,
}

/// Execute the add command.
///
/// The first step is suggested from the title and mood unless the user
/// brought their own.
///
/// # Errors
///
/// Returns an error when the title is empty, the mood is unknown, or
/// the remote create fails.
pub fn execute(args: &AddArgs, backend: Option<&str>, local: bool, json: bool) -> Result<()> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument(
            "task title must not be empty".to_string(),
        ));
    }
    let mood: Mood = args.mood.parse()?;

    // User-provided step wins; blank counts as absent
    let step = match args.step.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => stepgen::first_step(title, mood).to_string(),
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async {
        let mut ledger = super::open_ledger(backend, local).await;
        let entry = ledger.add_task(title, &step, mood).await?;

        if json {
            let output = AddOutput {
                id: &entry.id,
                title: &entry.title,
                step: &entry.step,
                mood: entry.mood.as_str(),
                source: ledger.source().as_str(),
            };
            println!("{}", serde_json::to_string(&output)?);
            return Ok(());
        }

        println!(
            "Added: {} {}",
            entry.title.bold(),
            format!("[{}]", entry.id).dimmed()
        );
        println!("  First step: {}", entry.step.cyan());
        Ok(())
    })
}
