//! Backend configuration command implementation.

use crate::cli::BackendCommands;
use crate::config;
use crate::error::{Error, Result};
use colored::Colorize;
use serde::Serialize;

/// Output for backend show.
#[derive(Serialize)]
struct ShowOutput<'a> {
    url: Option<&'a str>,
    source: Option<&'a str>,
}

/// Output for backend set/clear.
#[derive(Serialize)]
struct SetOutput<'a> {
    url: Option<&'a str>,
    path: String,
}

/// Execute a backend subcommand.
///
/// # Errors
///
/// Returns an error for a malformed URL or a failed config write.
pub fn execute(command: &BackendCommands, json: bool) -> Result<()> {
    match command {
        BackendCommands::Show => show(json),
        BackendCommands::Set { url } => set(url, json),
        BackendCommands::Clear => clear(json),
    }
}

fn show(json: bool) -> Result<()> {
    let env_url = std::env::var("EZ_BACKEND_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let config = config::load_config();

    // Same precedence the commands use: env beats the config file
    let (url, source) = match (&env_url, &config.backend_url) {
        (Some(u), _) => (Some(u.as_str()), Some("EZ_BACKEND_URL")),
        (None, Some(u)) => (Some(u.as_str()), Some("config")),
        (None, None) => (None, None),
    };

    if json {
        println!("{}", serde_json::to_string(&ShowOutput { url, source })?);
        return Ok(());
    }

    if let (Some(u), Some(s)) = (url, source) {
        println!("Backend: {} {}", u.bold(), format!("({s})").dimmed());
    } else {
        println!("No backend configured. Commands run local-only.");
        println!();
        println!("Set one with: ez backend set {}", config::DEFAULT_BACKEND_URL);
    }
    Ok(())
}

fn set(url: &str, json: bool) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::InvalidArgument(format!(
            "backend URL must start with http:// or https:// (got: {url})"
        )));
    }

    let mut config = config::load_config();
    config.backend_url = Some(url.to_string());
    let path = config::save_config(&config)?;

    if json {
        let output = SetOutput {
            url: Some(url),
            path: path.display().to_string(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("Backend set: {}", url.bold());
    println!("  {}", path.display().to_string().dimmed());
    Ok(())
}

fn clear(json: bool) -> Result<()> {
    let mut config = config::load_config();
    let had = config.backend_url.take().is_some();
    let path = config::save_config(&config)?;

    if json {
        let output = SetOutput {
            url: None,
            path: path.display().to_string(),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if had {
        println!("Backend cleared. Commands run local-only.");
    } else {
        println!("No backend was configured.");
    }
    Ok(())
}
