//! Host clock information: scheduler tick rate and system uptime.

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::process::reader::ProcReader;

/// Query the kernel-configured clock ticks per second.
fn query_clk_tck() -> Option<u64> {
    // SAFETY: sysconf is safe to call with _SC_CLK_TCK
    // Returns -1 on error, 0 if undefined - both are rejected by the > 0 check
    let tck = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if tck > 0 {
        Some(tck as u64)
    } else {
        None
    }
}

/// Tick rate, queried once; the value is fixed for the life of the process.
static CLK_TCK: Lazy<Option<u64>> = Lazy::new(query_clk_tck);

/// System clock ticks per second (usually 100).
pub fn clock_ticks_per_second() -> Result<u64> {
    (*CLK_TCK).ok_or_else(|| {
        Error::ConfigurationError("sysconf(_SC_CLK_TCK) returned no usable value".to_string())
    })
}

/// Parses `/proc/uptime` content ("<uptime_seconds> <idle_seconds>").
pub fn parse_uptime(content: &str) -> std::result::Result<f64, String> {
    let first = content
        .split_whitespace()
        .next()
        .ok_or_else(|| "no fields found".to_string())?;

    let uptime = first
        .parse::<f64>()
        .map_err(|e| format!("failed to parse uptime {:?}: {}", first, e))?;
    if !uptime.is_finite() {
        return Err(format!("uptime is not finite: {}", first));
    }
    Ok(uptime)
}

/// Reads system uptime in seconds from `<root>/uptime`.
pub fn system_uptime_seconds(reader: &ProcReader) -> Result<f64> {
    let (path, content) = reader.read_system_file("uptime")?;
    parse_uptime(&content).map_err(|reason| Error::malformed(&path, reason))
}
