//! Lifetime-average CPU usage for a process.
//!
//! The figure is total CPU time consumed divided by total time elapsed since
//! the process started. It is not an instantaneous rate: a caller wanting
//! current usage has to take two readings and compute the delta itself.
//!
//! `stat` and `uptime` are read at slightly different instants, so the
//! process age carries a small unavoidable skew.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::process::clock::{clock_ticks_per_second, system_uptime_seconds};
use crate::process::reader::ProcReader;
use crate::process::stat::{read_cpu_ticks, CpuTicks};

/// Average CPU usage over a process's whole life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifetimeCpuUsage {
    /// Consumed CPU time per 1000 units of elapsed time (1000 = one full core).
    pub per_mille: u64,
    /// Total CPU time consumed (user + system) in seconds.
    pub runtime_seconds: f64,
}

/// Computes lifetime usage from a stat sample, uptime and tick rate.
pub fn compute_lifetime_usage(
    ticks: &CpuTicks,
    uptime_seconds: f64,
    ticks_per_second: u64,
) -> Result<LifetimeCpuUsage> {
    if ticks_per_second == 0 {
        return Err(Error::ComputationError(
            "clock tick rate is zero".to_string(),
        ));
    }
    let hz = ticks_per_second as f64;

    let total_cpu_ticks = ticks.total().ok_or_else(|| {
        Error::ComputationError(format!(
            "utime {} + stime {} overflows",
            ticks.utime, ticks.stime
        ))
    })? as f64;

    let current_ticks = uptime_seconds * hz;
    let process_age_ticks = current_ticks - ticks.starttime as f64;
    if !current_ticks.is_finite() || !process_age_ticks.is_finite() {
        return Err(Error::ComputationError(format!(
            "process age is not finite (uptime {}s at {} ticks/s)",
            uptime_seconds, ticks_per_second
        )));
    }

    if process_age_ticks.is_nan() || process_age_ticks <= 0.0 {
        return Err(Error::ComputationError(format!(
            "non-positive process age: uptime {:.2}s is {} ticks, process started at tick {}",
            uptime_seconds, current_ticks, ticks.starttime
        )));
    }

    let ratio = (total_cpu_ticks / process_age_ticks * 1000.0).floor();
    if !ratio.is_finite() {
        return Err(Error::ComputationError(format!(
            "usage ratio is not finite ({} ticks over {} ticks)",
            total_cpu_ticks, process_age_ticks
        )));
    }

    Ok(LifetimeCpuUsage {
        per_mille: ratio as u64,
        runtime_seconds: total_cpu_ticks / hz,
    })
}

/// Reads stat, uptime and the tick rate and returns lifetime usage for `pid`.
pub fn lifetime_cpu_usage(reader: &ProcReader, pid: u32) -> Result<LifetimeCpuUsage> {
    let ticks = read_cpu_ticks(reader, pid)?;
    let uptime = system_uptime_seconds(reader)?;
    let hz = clock_ticks_per_second()?;
    compute_lifetime_usage(&ticks, uptime, hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(utime: u64, stime: u64, starttime: u64) -> CpuTicks {
        CpuTicks {
            utime,
            stime,
            starttime,
        }
    }

    #[test]
    fn test_reference_values() {
        // current = 10.0s * 100 = 1000 ticks, age = 800, usage = 150/800*1000
        let usage = compute_lifetime_usage(&ticks(100, 50, 200), 10.0, 100).unwrap();
        assert_eq!(usage.per_mille, 187);
        assert!((usage.runtime_seconds - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_multithreaded_can_exceed_one_core() {
        let usage = compute_lifetime_usage(&ticks(1500, 500, 0), 10.0, 100).unwrap();
        assert_eq!(usage.per_mille, 2000);
    }

    #[test]
    fn test_idle_process() {
        let usage = compute_lifetime_usage(&ticks(0, 0, 100), 10.0, 100).unwrap();
        assert_eq!(usage.per_mille, 0);
        assert_eq!(usage.runtime_seconds, 0.0);
    }

    #[test]
    fn test_start_equal_to_now_is_error() {
        let err = compute_lifetime_usage(&ticks(1, 1, 1000), 10.0, 100).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }

    #[test]
    fn test_start_after_now_is_error() {
        let err = compute_lifetime_usage(&ticks(1, 1, 5000), 10.0, 100).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }

    #[test]
    fn test_tick_overflow_is_error() {
        let err = compute_lifetime_usage(&ticks(u64::MAX, 1, 0), 10.0, 100).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }

    #[test]
    fn test_huge_uptime_is_error() {
        // 1e308 * 100 overflows to infinity.
        let err = compute_lifetime_usage(&ticks(100, 50, 200), 1e308, 100).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }

    #[test]
    fn test_zero_tick_rate_is_error() {
        let err = compute_lifetime_usage(&ticks(1, 1, 0), 10.0, 0).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }

    #[test]
    fn test_nan_uptime_is_error() {
        let err = compute_lifetime_usage(&ticks(1, 1, 0), f64::NAN, 100).unwrap_err();
        assert!(matches!(err, Error::ComputationError(_)));
    }
}
