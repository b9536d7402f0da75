//! One-shot aggregate of status, lifetime CPU usage and children for a pid.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::process::children::read_children;
use crate::process::cpu::{lifetime_cpu_usage, LifetimeCpuUsage};
use crate::process::reader::ProcReader;
use crate::process::status::{read_status, ProcStatus};

/// Everything this crate knows about one process at a single point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub children: Option<Vec<i64>>,
    /// Failures of the optional parts, rendered as text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    // Tables last so the record also renders as TOML.
    pub status: ProcStatus,
    pub cpu: Option<LifetimeCpuUsage>,
}

impl ProcessSnapshot {
    /// Captures a snapshot. A status failure aborts; CPU and children
    /// failures are recorded in `errors`.
    pub fn capture(reader: &ProcReader, pid: u32) -> Result<Self> {
        let status = read_status(reader, pid)?;
        let mut errors = Vec::new();

        let cpu = match lifetime_cpu_usage(reader, pid) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("Failed to compute CPU usage for pid {}: {}", pid, e);
                errors.push(format!("cpu: {}", e));
                None
            }
        };

        let children = match read_children(reader, pid) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("Failed to read children for pid {}: {}", pid, e);
                errors.push(format!("children: {}", e));
                None
            }
        };

        Ok(Self {
            pid,
            children,
            errors,
            status,
            cpu,
        })
    }
}
