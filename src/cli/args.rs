//! Command line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "boardsync")]
#[command(about = "🔌 Board selection and auto-reconnect for serial development boards")]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to <config dir>/boardsync/boardsync.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Write JSON logs to this file instead of stdout (implies --json-logs)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List attached serial boards
    Boards,
    /// Show the remembered selection and whether it can be restored
    Status,
    /// Select a board and/or port; upload-capable selections are remembered
    Select {
        /// Board name, e.g. "Arduino Uno"
        #[arg(short, long)]
        name: Option<String>,
        /// Fully-qualified board name, e.g. arduino:avr:uno
        #[arg(short, long)]
        fqbn: Option<String>,
        /// Serial port, e.g. /dev/ttyACM0 or COM5
        #[arg(short, long)]
        port: Option<String>,
    },
    /// Check whether the restored selection is ready to compile or upload
    Check {
        #[arg(value_enum)]
        action: CheckAction,
    },
    /// Watch for attach/detach events and reconnect automatically
    Watch {
        /// Override the polling interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Write the default configuration file
    Config {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckAction {
    Compile,
    Upload,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
