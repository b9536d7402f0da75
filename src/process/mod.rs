//! Readers for per-process /proc records.
//!
//! This module provides:
//! - `reader`: raw file access below a configurable proc root
//! - `status`: `/proc/<pid>/status` parsing into `ProcStatus`
//! - `stat`: fixed-position field extraction from `/proc/<pid>/stat`
//! - `clock`: clock tick rate and system uptime
//! - `cpu`: lifetime-average CPU usage
//! - `children`: direct child pids
//! - `snapshot`: all of the above for one pid

pub mod children;
pub mod clock;
pub mod cpu;
pub mod reader;
pub mod snapshot;
pub mod stat;
pub mod status;

// Re-export commonly used types
pub use children::{parse_children, read_children};
pub use clock::{clock_ticks_per_second, parse_uptime, system_uptime_seconds};
pub use cpu::{compute_lifetime_usage, lifetime_cpu_usage, LifetimeCpuUsage};
pub use reader::{ProcReader, DEFAULT_PROC_ROOT};
pub use snapshot::ProcessSnapshot;
pub use stat::{read_cpu_ticks, read_stat_fields, split_stat_fields, CpuTicks};
pub use status::{
    parse_status, parse_status_detailed, read_status, read_status_detailed, ParsedStatus,
    ProcStatus, StatusFieldState,
};
