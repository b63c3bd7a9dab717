//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

pub mod commands;

/// Easely CLI - tiny first steps against task paralysis
#[derive(Parser, Debug)]
#[command(name = "ez", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(long, global = true, env = "EZ_BACKEND_URL")]
    pub backend: Option<String>,

    /// Skip the backend entirely and work from the local snapshot
    #[arg(long, global = true)]
    pub local: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task with a doable first step
    Add(AddArgs),

    /// Complete a task and earn XP
    Complete {
        /// Task id (or unique id prefix)
        id: String,
    },

    /// Show the most recent pending tasks
    Recent {
        /// Maximum tasks to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show level, XP, and streak
    Stats,

    /// Break a big task into five small steps
    Breakdown {
        #[command(subcommand)]
        command: BreakdownCommands,
    },

    /// Show completed focus sessions (requires a backend)
    Log {
        /// Maximum sessions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Discard a pending task without completing it
    Remove {
        /// Task id (or unique id prefix)
        id: String,
    },

    /// Pull server truth and refresh the local snapshot
    Sync,

    /// Backend URL configuration
    Backend {
        #[command(subcommand)]
        command: BackendCommands,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Add Command
// ============================================================================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// What you need to do
    pub title: String,

    /// How you feel right now (low-energy, stressed, focused)
    #[arg(short, long, default_value = "focused")]
    pub mood: String,

    /// Your own first step (suggested from title and mood if omitted)
    #[arg(short, long)]
    pub step: Option<String>,
}

// ============================================================================
// Breakdown Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum BreakdownCommands {
    /// Start a five-step plan for a big task
    Start {
        /// The big task to break down
        task: String,

        /// How you feel right now (low-energy, stressed, focused)
        #[arg(short, long, default_value = "focused")]
        mood: String,

        /// Replace an unfinished plan
        #[arg(long)]
        force: bool,
    },

    /// Show the current plan and where you are
    Show,

    /// Mark the current step done and move to the next
    Done,

    /// Discard the current plan
    Reset,
}

// ============================================================================
// Backend Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum BackendCommands {
    /// Show the configured backend URL
    Show,

    /// Set the backend URL
    Set {
        /// Base URL, e.g. http://localhost:8000
        url: String,
    },

    /// Clear the configured backend URL
    Clear,
}
