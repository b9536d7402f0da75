//! Check command implementation.
//!
//! Validates /proc access, clock configuration and the effective config by
//! running every reader against this process.

use nix::unistd::geteuid;
use tracing::warn;

use crate::config::{validate_effective_config, Config};
use procsnap::{
    clock_ticks_per_second, lifetime_cpu_usage, read_children, read_status_detailed,
    system_uptime_seconds, ProcReader,
};

/// Runs all checks; exits with code 1 if any of them fails.
pub fn command_check(reader: &ProcReader, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 procsnap - System Check");
    println!("==========================");

    let mut all_ok = true;
    let pid = std::process::id();

    println!("\n👤 Checking privileges...");
    if geteuid().is_root() {
        println!("   ✅ Running as root (uid=0)");
    } else {
        warn!("Not running as root - status of other users' processes may be unreadable");
        println!("   ⚠️  Not running as root - other users' processes may be unreadable");
    }

    println!("\n📁 Checking {} ...", reader.root().display());
    if reader.root().is_dir() {
        println!("   ✅ proc root accessible");
    } else {
        println!("   ❌ proc root not found");
        all_ok = false;
    }

    println!("\n⏱️  Checking clock...");
    match clock_ticks_per_second() {
        Ok(hz) => println!("   ✅ Clock ticks per second: {}", hz),
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }
    match system_uptime_seconds(reader) {
        Ok(up) => println!("   ✅ System uptime: {:.2}s", up),
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    println!("\n📄 Reading records of pid {}...", pid);
    match read_status_detailed(reader, pid) {
        Ok(parsed) => {
            println!(
                "   ✅ status: {} ({}), {} fields recognized",
                parsed.status.name,
                parsed.status.state,
                parsed.fields.len()
            );
            let defaulted: Vec<_> = parsed.defaulted_fields().collect();
            if !defaulted.is_empty() {
                println!("   ⚠️  unparsable fields left at zero: {}", defaulted.join(", "));
            }
        }
        Err(e) => {
            println!("   ❌ status: {}", e);
            all_ok = false;
        }
    }
    match lifetime_cpu_usage(reader, pid) {
        Ok(usage) => println!(
            "   ✅ cpu: {}‰ lifetime average, {:.2}s runtime",
            usage.per_mille, usage.runtime_seconds
        ),
        Err(e) => {
            println!("   ❌ cpu: {}", e);
            all_ok = false;
        }
    }
    match read_children(reader, pid) {
        Ok(children) => println!("   ✅ children: {} direct children", children.len()),
        Err(e) => {
            println!("   ❌ children: {}", e);
            all_ok = false;
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review the output above");
        std::process::exit(1);
    }
}
