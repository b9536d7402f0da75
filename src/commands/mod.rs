//! CLI command implementations for procsnap.
//!
//! This module provides implementations for all CLI subcommands:
//! - `inspect`: status, cpu, children and snapshot output
//! - `check`: /proc and clock validation
//! - `config`: Configuration file generation

pub mod check;
pub mod config;
pub mod inspect;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use inspect::{command_children, command_cpu, command_snapshot, command_status};
