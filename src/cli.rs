//! CLI arguments and subcommands for procsnap.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Output format for records and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "procsnap",
    about = "One-shot snapshots of Linux /proc process accounting",
    long_about = "One-shot snapshots of Linux /proc process accounting.\n\n\
                  Reads /proc/<pid>/status, /proc/<pid>/stat, /proc/uptime and the task \
                  children file and prints typed records: process status, lifetime-average \
                  CPU usage in per-mille and direct child pids.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root of the proc filesystem
    #[arg(long, global = true)]
    pub proc_root: Option<PathBuf>,

    /// Log level (defaults to the config file value, then "warn")
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Output format for records
    #[arg(short = 'f', long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse /proc/<pid>/status
    Status {
        /// Process id
        pid: u32,

        /// Also report which fields were parsed or defaulted
        #[arg(long)]
        fields: bool,
    },

    /// Lifetime-average CPU usage (per-mille) and total CPU runtime
    Cpu {
        /// Process id
        pid: u32,
    },

    /// List direct child pids
    Children {
        /// Process id
        pid: u32,
    },

    /// Status, CPU usage and children in one record
    Snapshot {
        /// Process id (defaults to this process)
        pid: Option<u32>,
    },

    /// Validate /proc access and clock configuration
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },
}
