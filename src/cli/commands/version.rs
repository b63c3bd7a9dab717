//! Version command implementation.

use crate::config;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    data_dir: Option<String>,
}

/// Execute the version command.
///
/// Also reports where the snapshots live, since that is the first thing
/// to check when progress looks wrong.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };
    let data_dir = config::data_dir().map(|p| p.display().to_string());

    if json {
        let output = VersionOutput {
            version,
            build,
            data_dir,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("ez version {version} ({build})");
    match data_dir {
        Some(dir) => println!("  data: {dir}"),
        None => println!("  data: unavailable (no home directory)"),
    }
    Ok(())
}
