//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dispatcher::DEFAULT_SCRATCH_CAPACITY;

/// tmpld - trigger-driven template rendering daemon
#[derive(Parser, Debug)]
#[command(
    name = "tmpld",
    author,
    version,
    about = "Trigger-driven template rendering daemon",
    long_about = "A long-lived daemon that maps trigger variables to template files.\n\n\
                  Whenever a trigger variable changes, every template it triggers is \n\
                  re-rendered to its configured output: a stream target or a \n\
                  message-queue target."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TMPLD_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TMPLD_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the rendering daemon
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short = 'f', long, env = "TMPLD_CONFIG")]
    pub config: PathBuf,

    /// Scratch buffer capacity in bytes (bounds message size for mq targets)
    #[arg(
        short = 's',
        long,
        default_value_t = DEFAULT_SCRATCH_CAPACITY,
        env = "TMPLD_SCRATCH_SIZE"
    )]
    pub scratch_size: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "TMPLD_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short = 'f', long)]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short = 'f', long)]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
