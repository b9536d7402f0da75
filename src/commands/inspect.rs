//! Record commands: status, cpu, children and snapshot.
//!
//! Each command performs one read through the library and prints the
//! result on stdout in the configured format.

use serde::Serialize;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::render;
use procsnap::{
    lifetime_cpu_usage, read_children, read_status, read_status_detailed, ProcReader,
    ProcessSnapshot,
};

#[derive(Serialize)]
struct ChildrenOutput {
    pid: u32,
    children: Vec<i64>,
}

#[derive(Serialize)]
struct CpuOutput {
    pid: u32,
    #[serde(flatten)]
    usage: procsnap::LifetimeCpuUsage,
}

fn print_record<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = render(value, format)?;
    println!("{}", out.trim_end());
    Ok(())
}

/// Prints the parsed status file of `pid`.
pub fn command_status(
    reader: &ProcReader,
    pid: u32,
    with_fields: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if with_fields {
        let parsed = read_status_detailed(reader, pid)?;
        for key in parsed.defaulted_fields() {
            debug!("pid {}: field {} present but unparsable, left at zero", pid, key);
        }
        print_record(&parsed, format)
    } else {
        print_record(&read_status(reader, pid)?, format)
    }
}

/// Prints lifetime CPU usage of `pid`.
pub fn command_cpu(
    reader: &ProcReader,
    pid: u32,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let usage = lifetime_cpu_usage(reader, pid)?;
    print_record(&CpuOutput { pid, usage }, format)
}

/// Prints direct children of `pid`.
pub fn command_children(
    reader: &ProcReader,
    pid: u32,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let children = read_children(reader, pid)?;
    print_record(&ChildrenOutput { pid, children }, format)
}

/// Prints a full snapshot of `pid`.
pub fn command_snapshot(
    reader: &ProcReader,
    pid: u32,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ProcessSnapshot::capture(reader, pid)?;
    print_record(&snapshot, format)
}
