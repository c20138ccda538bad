use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("LICENSE_GATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check {
            lock,
            format,
            output,
            no_dev,
            exit_zero,
        } => commands::handle_check(
            cli.manifest,
            lock,
            format,
            output,
            no_dev,
            cli.quiet,
            cli.verbose,
            exit_zero,
        ),
        Commands::Replay { script } => {
            commands::handle_replay(cli.manifest, script, cli.quiet, cli.verbose)
        }
        Commands::Init { policy } => commands::handle_init(cli.manifest, policy, cli.quiet),
        Commands::Fix { lock, dry_run, no_dev } => {
            commands::handle_fix(cli.manifest, lock, dry_run, no_dev, cli.quiet)
        }
        Commands::Config { show, validate } => {
            commands::handle_config(cli.manifest, show, validate, cli.quiet)
        }
    }
}
