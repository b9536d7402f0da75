//! Field extraction from `/proc/<pid>/stat`.
//!
//! The second field (comm) is wrapped in parentheses and may itself contain
//! spaces or parentheses, so it is located by the first `(` and the last `)`
//! and kept as one field. Indices of the remaining fields therefore match
//! proc(5) regardless of the process name.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::process::reader::ProcReader;

/// Index of utime (user-mode ticks).
pub const UTIME_FIELD: usize = 13;
/// Index of stime (kernel-mode ticks).
pub const STIME_FIELD: usize = 14;
/// Index of starttime (ticks after boot).
pub const STARTTIME_FIELD: usize = 21;
/// Minimum number of fields needed for CPU accounting.
pub const MIN_STAT_FIELDS: usize = STARTTIME_FIELD + 1;

/// CPU accounting values from the stat file, all in clock ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuTicks {
    pub utime: u64,
    pub stime: u64,
    pub starttime: u64,
}

impl CpuTicks {
    /// Total CPU time consumed (user + system); `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.utime.checked_add(self.stime)
    }

    /// Extracts the accounting fields from split stat fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> std::result::Result<Self, String> {
        if fields.len() < MIN_STAT_FIELDS {
            return Err(format!(
                "expected at least {} fields, got {}",
                MIN_STAT_FIELDS,
                fields.len()
            ));
        }

        let ticks = Self {
            utime: parse_ticks(fields, UTIME_FIELD, "utime")?,
            stime: parse_ticks(fields, STIME_FIELD, "stime")?,
            starttime: parse_ticks(fields, STARTTIME_FIELD, "starttime")?,
        };
        if ticks.total().is_none() {
            return Err(format!(
                "utime {} + stime {} overflows",
                ticks.utime, ticks.stime
            ));
        }
        Ok(ticks)
    }
}

fn parse_ticks<S: AsRef<str>>(
    fields: &[S],
    idx: usize,
    name: &str,
) -> std::result::Result<u64, String> {
    let raw = fields[idx].as_ref();
    raw.parse::<u64>()
        .map_err(|_| format!("invalid {} field at index {}: {:?}", name, idx, raw))
}

/// Splits stat content into fields, keeping a parenthesized comm intact.
pub fn split_stat_fields(content: &str) -> Vec<String> {
    let content = content.trim();

    let (Some(open), Some(close)) = (content.find('('), content.rfind(')')) else {
        return content.split_whitespace().map(str::to_string).collect();
    };
    if close < open {
        return content.split_whitespace().map(str::to_string).collect();
    }

    let mut fields: Vec<String> = content[..open]
        .split_whitespace()
        .map(str::to_string)
        .collect();
    fields.push(content[open..=close].to_string());
    fields.extend(content[close + 1..].split_whitespace().map(str::to_string));
    fields
}

/// Reads `/proc/<pid>/stat` and splits it into fields.
pub fn read_stat_fields(reader: &ProcReader, pid: u32) -> Result<Vec<String>> {
    let (_, content) = reader.read_pid_file(pid, "stat")?;
    Ok(split_stat_fields(&content))
}

/// Reads `/proc/<pid>/stat` and extracts utime, stime and starttime.
pub fn read_cpu_ticks(reader: &ProcReader, pid: u32) -> Result<CpuTicks> {
    let (path, content) = reader.read_pid_file(pid, "stat")?;
    let fields = split_stat_fields(&content);
    CpuTicks::from_fields(&fields).map_err(|reason| Error::malformed(&path, reason))
}
