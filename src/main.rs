//! procsnap - version 0.1.0
//!
//! One-shot /proc snapshot tool with tracing logging.
//! This is the main entry point that resolves configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;

use clap::{CommandFactory, Parser};
use tracing::{debug, Level};

use cli::{Args, Commands, LogLevel};
use commands::{
    command_check, command_children, command_config, command_cpu, command_snapshot,
    command_status,
};
use config::{resolve_config, show_config, validate_effective_config, Config};
use procsnap::ProcReader;

/// Exit code for a process that vanished (routine race, not a failure of the tool).
const EXIT_NOT_FOUND: i32 = 2;

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(config: &Config) {
    let log_level = match config.log_level() {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    debug!("Logging initialized with level: {:?}", log_level);
}

fn run(args: Args, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let format = config.output_format();
    let reader = ProcReader::new(config.proc_root());
    debug!("Using proc root {}", reader.root().display());

    match args.command {
        Some(Commands::Status { pid, fields }) => command_status(&reader, pid, fields, format),
        Some(Commands::Cpu { pid }) => command_cpu(&reader, pid, format),
        Some(Commands::Children { pid }) => command_children(&reader, pid, format),
        Some(Commands::Snapshot { pid }) => {
            command_snapshot(&reader, pid.unwrap_or_else(std::process::id), format)
        }
        Some(Commands::Check) => command_check(&reader, &config),
        Some(Commands::Config {
            output,
            format,
            commented,
        }) => command_config(output, format, commented),
        None => {
            Args::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Main application entry point.
fn main() {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if args.check_config {
        if let Err(e) = validate_effective_config(&config) {
            eprintln!("❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        return;
    }

    if args.show_config {
        if let Err(e) = show_config(&config, config.output_format()) {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        return;
    }

    setup_logging(&config);

    if let Err(e) = run(args, config) {
        let code = match e.downcast_ref::<procsnap::Error>() {
            Some(err) if err.is_not_found() => EXIT_NOT_FOUND,
            _ => 1,
        };
        eprintln!("❌ {}", e);
        std::process::exit(code);
    }
}
