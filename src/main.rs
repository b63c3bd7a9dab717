//! Easely CLI entry point.

use clap::Parser;
use ez::cli::commands;
use ez::cli::{Cli, Commands};
use ez::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR non-TTY stdout
    let json = cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor EZ_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("EZ_LOG").is_ok() {
        EnvFilter::from_env("EZ_LOG")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,hyper_util=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let backend = cli.backend.as_deref();

    match &cli.command {
        Commands::Add(args) => commands::add::execute(args, backend, cli.local, json),
        Commands::Complete { id } => commands::complete::execute(id, backend, cli.local, json),
        Commands::Recent { limit } => commands::recent::execute(*limit, backend, cli.local, json),
        Commands::Stats => commands::stats::execute(backend, cli.local, json),
        Commands::Log { limit } => commands::log::execute(*limit, backend, cli.local, json),
        Commands::Remove { id } => commands::remove::execute(id, backend, cli.local, json),

        // Breakdown plans are device-local; they never touch the backend
        Commands::Breakdown { command } => commands::breakdown::execute(command, json),

        Commands::Sync => commands::sync::execute(backend, cli.local, json),
        Commands::Backend { command } => commands::backend::execute(command, json),

        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
