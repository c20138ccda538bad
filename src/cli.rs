use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "license-gate")]
#[command(about = "Allow, warn about or reject dependencies by their declared licenses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project manifest holding the policy (default: ./manifest.json)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every locked package against the license policy
    Check {
        /// Lock file (default: next to the manifest, or nearest manifest.lock)
        lock: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip development packages
        #[arg(long)]
        no_dev: bool,

        /// Exit with code 0 even when packages are rejected
        #[arg(long)]
        exit_zero: bool,
    },
    /// Run install/update notifications from an event script through the gate
    Replay {
        /// JSON event script
        script: PathBuf,
    },
    /// Initialize the manifest with a preset policy
    Init {
        /// Policy preset
        policy: InitPreset,
    },
    /// Whitelist every currently rejected package
    Fix {
        /// Lock file (default: next to the manifest, or nearest manifest.lock)
        lock: Option<PathBuf>,

        /// Show changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Skip development packages
        #[arg(long)]
        no_dev: bool,
    },
    /// Show or validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, ValueEnum)]
pub enum InitPreset {
    Green,
    Yellow,
    Red,
}
