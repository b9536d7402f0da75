//! Integration tests against a fake proc tree.
//!
//! Each test lays out `<root>/<pid>/status`, `stat`, `task/<pid>/children` and
//! `<root>/uptime` in a temporary directory and drives the public API through
//! a `ProcReader` pointed at it.

use std::fs;
use std::path::Path;

use procsnap::{
    clock_ticks_per_second, lifetime_cpu_usage, read_children, read_cpu_ticks, read_stat_fields,
    read_status, read_status_detailed, system_uptime_seconds, Error, ProcReader, ProcessSnapshot,
    StatusFieldState,
};
use tempfile::{tempdir, TempDir};

const STATUS: &str = "Name:\tnginx
Umask:\t0022
State:\tR (running)
Tgid:\t300
Ngid:\t0
Pid:\t300
PPid:\t1
TracerPid:\t0
Uid:\t33\t33\t33\t33
Gid:\t33\t33\t33\t33
FDSize:\t64
Groups:\t33
VmPeak:\t   20000 kB
VmSize:\t   19000 kB
VmHWM:\t    4000 kB
VmRSS:\t    3900 kB
VmSwap:\t       0 kB
Threads:\t4
";

fn stat_line(pid: u32, comm: &str, utime: u64, stime: u64, starttime: u64) -> String {
    format!(
        "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194560 500 0 0 0 {utime} {stime} 0 0 20 0 4 0 {starttime} 19456000 975 18446744073709551615 1 1 0 0 0 0 0 4096 16384 0 0 0 17 2 0 0 0 0 0"
    )
}

struct FakeProc {
    dir: TempDir,
}

impl FakeProc {
    fn new(uptime: &str) -> Self {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("uptime"), uptime).expect("Failed to write uptime");
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn reader(&self) -> ProcReader {
        ProcReader::new(self.root())
    }

    fn write(&self, pid: u32, name: &str, content: &str) {
        let path = self.root().join(pid.to_string()).join(name);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dirs");
        fs::write(path, content).expect("Failed to write file");
    }

    fn add_process(&self, pid: u32, status: &str, stat: &str, children: &str) {
        self.write(pid, "status", status);
        self.write(pid, "stat", stat);
        self.write(pid, &format!("task/{pid}/children"), children);
    }
}

#[test]
fn test_read_status_from_tree() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 1, 1, 1), "");

    let status = read_status(&proc.reader(), 300).expect("status readable");
    assert_eq!(status.name, "nginx");
    assert_eq!(status.state, "running");
    assert_eq!(status.ppid, 1);
    assert_eq!(status.uid, vec![33, 33, 33, 33]);
    assert_eq!(status.vm_rss, 3900);
    assert_eq!(status.threads, 4);
    // Not in the file: zero, and not reported as a field.
    assert_eq!(status.rss_anon, 0);

    let parsed = read_status_detailed(&proc.reader(), 300).unwrap();
    assert_eq!(parsed.fields.get("VmRSS"), Some(&StatusFieldState::Parsed));
    assert_eq!(parsed.fields.get("RssAnon"), None);
    assert_eq!(parsed.status, status);
}

#[test]
fn test_lifetime_cpu_usage_from_tree() {
    let hz = clock_ticks_per_second().expect("clock ticks");
    let proc = FakeProc::new("10.00 40.00\n");
    // age = 10*hz - 2*hz = 8*hz, consumed = 2*hz -> 250 per-mille, 2s runtime
    proc.add_process(300, STATUS, &stat_line(300, "nginx", hz, hz, 2 * hz), "");

    let usage = lifetime_cpu_usage(&proc.reader(), 300).expect("usage computable");
    assert_eq!(usage.per_mille, 250);
    assert!((usage.runtime_seconds - 2.0).abs() < 1e-9);
}

#[test]
fn test_process_started_after_uptime_read() {
    let hz = clock_ticks_per_second().expect("clock ticks");
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 1, 1, 10 * hz), "");

    let err = lifetime_cpu_usage(&proc.reader(), 300).unwrap_err();
    assert!(matches!(err, Error::ComputationError(_)), "{err}");
}

#[test]
fn test_oversized_uptime_is_computation_error() {
    let proc = FakeProc::new("1e308 0\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 100, 50, 200), "");

    let err = lifetime_cpu_usage(&proc.reader(), 300).unwrap_err();
    assert!(matches!(err, Error::ComputationError(_)), "{err}");
}

#[test]
fn test_overflowing_ticks_is_malformed() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", u64::MAX, 1, 0), "");

    let err = read_cpu_ticks(&proc.reader(), 300).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }), "{err}");
}

#[test]
fn test_short_stat_is_malformed() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, "300 (nginx) S 1 300 300 0", "");

    let err = lifetime_cpu_usage(&proc.reader(), 300).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }), "{err}");
    assert!(!err.is_not_found());
}

#[test]
fn test_comm_with_spaces() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(
        301,
        STATUS,
        &stat_line(301, "tmux: server (0)", 7, 3, 5),
        "",
    );

    let fields = read_stat_fields(&proc.reader(), 301).unwrap();
    assert_eq!(fields[1], "(tmux: server (0))");

    let ticks = read_cpu_ticks(&proc.reader(), 301).unwrap();
    assert_eq!((ticks.utime, ticks.stime, ticks.starttime), (7, 3, 5));
}

#[test]
fn test_children_from_tree() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 1, 1, 1), "101 102 103\n");
    proc.add_process(101, STATUS, &stat_line(101, "nginx", 1, 1, 1), "");

    assert_eq!(read_children(&proc.reader(), 300).unwrap(), vec![101, 102, 103]);
    assert!(read_children(&proc.reader(), 101).unwrap().is_empty());
}

#[test]
fn test_garbled_children_is_malformed() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 1, 1, 1), "101 oops\n");

    let err = read_children(&proc.reader(), 300).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }), "{err}");
}

#[test]
fn test_missing_pid_is_not_found_everywhere() {
    let proc = FakeProc::new("10.00 40.00\n");
    let reader = proc.reader();

    assert!(read_status(&reader, 999).unwrap_err().is_not_found());
    assert!(read_stat_fields(&reader, 999).unwrap_err().is_not_found());
    assert!(lifetime_cpu_usage(&reader, 999).unwrap_err().is_not_found());
    assert!(read_children(&reader, 999).unwrap_err().is_not_found());
}

#[test]
fn test_missing_uptime_is_not_found() {
    let proc = FakeProc::new("");
    fs::remove_file(proc.root().join("uptime")).unwrap();
    proc.add_process(300, STATUS, &stat_line(300, "nginx", 1, 1, 1), "");

    assert!(system_uptime_seconds(&proc.reader()).unwrap_err().is_not_found());
    assert!(lifetime_cpu_usage(&proc.reader(), 300).unwrap_err().is_not_found());
}

#[test]
fn test_snapshot_records_partial_failures() {
    let proc = FakeProc::new("10.00 40.00\n");
    proc.write(300, "status", STATUS);
    proc.write(300, "task/300/children", "400\n");

    let snap = ProcessSnapshot::capture(&proc.reader(), 300).expect("status present");
    assert_eq!(snap.status.name, "nginx");
    assert!(snap.cpu.is_none());
    assert_eq!(snap.children, Some(vec![400]));
    assert_eq!(snap.errors.len(), 1);
    assert!(snap.errors[0].starts_with("cpu: "), "{:?}", snap.errors);
}

#[test]
fn test_snapshot_without_status_fails() {
    let proc = FakeProc::new("10.00 40.00\n");
    assert!(ProcessSnapshot::capture(&proc.reader(), 300)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_live_self_process() {
    let reader = ProcReader::default();
    let pid = std::process::id();

    let status = read_status(&reader, pid).expect("own status readable");
    assert_eq!(status.pid, pid as i64);
    assert!(status.threads >= 1);
    assert!(!status.state.is_empty());

    assert!(read_cpu_ticks(&reader, pid).is_ok());
}
