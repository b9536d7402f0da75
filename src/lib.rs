//! procsnap - one-shot snapshots of Linux /proc process accounting.
//!
//! This library turns per-process pseudo-files into typed records and derived
//! metrics. Every operation is synchronous and stateless: it opens the files
//! it needs, reads them fully, closes them and returns.
//!
//! # Features
//!
//! - **Status parsing**: `/proc/<pid>/status` into [`ProcStatus`], lenient per field
//! - **Lifetime CPU usage**: per-mille average over the process's life plus total runtime
//! - **Children**: direct child pids from the task children file
//!
//! # Usage
//!
//! ```rust,no_run
//! use procsnap::{lifetime_cpu_usage, read_children, read_status, ProcReader};
//!
//! let reader = ProcReader::default();
//! let pid = std::process::id();
//!
//! let status = read_status(&reader, pid)?;
//! println!("{} is {} with {} kB resident", status.name, status.state, status.vm_rss);
//!
//! let usage = lifetime_cpu_usage(&reader, pid)?;
//! println!("lifetime usage: {}‰, runtime {:.2}s", usage.per_mille, usage.runtime_seconds);
//!
//! for child in read_children(&reader, pid)? {
//!     println!("child: {}", child);
//! }
//! # Ok::<(), procsnap::Error>(())
//! ```

pub mod error;
pub mod process;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use process::{
    clock_ticks_per_second, compute_lifetime_usage, lifetime_cpu_usage, parse_children,
    parse_status, parse_status_detailed, parse_uptime, read_children, read_cpu_ticks,
    read_stat_fields, read_status, read_status_detailed, split_stat_fields,
    system_uptime_seconds, CpuTicks, LifetimeCpuUsage, ParsedStatus, ProcReader, ProcStatus,
    ProcessSnapshot, StatusFieldState, DEFAULT_PROC_ROOT,
};
