//! Parser for `/proc/<pid>/status`.
//!
//! The file is a list of `Key:\tValue` lines. Parsing is lenient per field:
//! a garbled value leaves that field at zero instead of failing the record,
//! and the outcome for every recognized key is reported through
//! [`StatusFieldState`] so callers can tell "absent on this kernel" from
//! "present but unparsable".

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::process::reader::ProcReader;

/// Matches the parenthesized word in `State:\tS (sleeping)`.
static STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((.*?)\)").expect("state regex is valid"));

/// Typed view of one process's status file. Memory values are in KiB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcStatus {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Umask")]
    pub umask: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Tgid")]
    pub tgid: i64,
    #[serde(rename = "Ngid")]
    pub ngid: i64,
    #[serde(rename = "Pid")]
    pub pid: i64,
    #[serde(rename = "PPid")]
    pub ppid: i64,
    #[serde(rename = "TracerPid")]
    pub tracer_pid: i64,
    #[serde(rename = "Uid")]
    pub uid: Vec<i64>,
    #[serde(rename = "Gid")]
    pub gid: Vec<i64>,
    #[serde(rename = "FDSize")]
    pub fd_size: i64,
    #[serde(rename = "Groups")]
    pub groups: Vec<i64>,
    #[serde(rename = "VmPeak")]
    pub vm_peak: i64,
    #[serde(rename = "VmSize")]
    pub vm_size: i64,
    #[serde(rename = "VmLck")]
    pub vm_lck: i64,
    #[serde(rename = "VmPin")]
    pub vm_pin: i64,
    #[serde(rename = "VmHWM")]
    pub vm_hwm: i64,
    #[serde(rename = "VmRSS")]
    pub vm_rss: i64,
    #[serde(rename = "RssAnon")]
    pub rss_anon: i64,
    #[serde(rename = "RssFile")]
    pub rss_file: i64,
    #[serde(rename = "RssShmem")]
    pub rss_shmem: i64,
    #[serde(rename = "VmData")]
    pub vm_data: i64,
    #[serde(rename = "VmStk")]
    pub vm_stk: i64,
    #[serde(rename = "VmExe")]
    pub vm_exe: i64,
    #[serde(rename = "VmLib")]
    pub vm_lib: i64,
    #[serde(rename = "VmPTE")]
    pub vm_pte: i64,
    #[serde(rename = "VmSwap")]
    pub vm_swap: i64,
    #[serde(rename = "Threads")]
    pub threads: i64,
}

/// Outcome for a recognized key that appeared in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFieldState {
    /// Value converted cleanly.
    Parsed,
    /// Key present but the value (or part of it) was garbled; zero kept.
    Defaulted,
}

/// A status record together with the per-field outcomes of the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedStatus {
    pub status: ProcStatus,
    /// Keyed by the kernel's spelling. Keys missing from the file are absent.
    pub fields: BTreeMap<&'static str, StatusFieldState>,
}

impl ParsedStatus {
    /// Recognized keys whose values could not be converted.
    pub fn defaulted_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|(_, state)| **state == StatusFieldState::Defaulted)
            .map(|(key, _)| *key)
    }
}

/// Parses status file content into a [`ProcStatus`].
pub fn parse_status(content: &str) -> ProcStatus {
    parse_status_detailed(content).status
}

/// Parses status file content, keeping the per-field outcomes.
pub fn parse_status_detailed(content: &str) -> ParsedStatus {
    let mut parsed = ParsedStatus::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        apply_field(&mut parsed, key.trim(), value.trim());
    }

    parsed
}

/// Reads and parses `/proc/<pid>/status`.
pub fn read_status(reader: &ProcReader, pid: u32) -> Result<ProcStatus> {
    read_status_detailed(reader, pid).map(|p| p.status)
}

/// Reads `/proc/<pid>/status`, keeping the per-field outcomes.
pub fn read_status_detailed(reader: &ProcReader, pid: u32) -> Result<ParsedStatus> {
    let (_, content) = reader.read_pid_file(pid, "status")?;
    Ok(parse_status_detailed(&content))
}

fn apply_field(parsed: &mut ParsedStatus, key: &str, value: &str) {
    let s = &mut parsed.status;
    let (key, state) = match key {
        "Name" => {
            s.name = value.to_string();
            ("Name", StatusFieldState::Parsed)
        }
        "Umask" => {
            s.umask = value.to_string();
            ("Umask", StatusFieldState::Parsed)
        }
        "State" => ("State", parse_state(value, &mut s.state)),
        "Tgid" => ("Tgid", parse_int(value, &mut s.tgid)),
        "Ngid" => ("Ngid", parse_int(value, &mut s.ngid)),
        "Pid" => ("Pid", parse_int(value, &mut s.pid)),
        "PPid" => ("PPid", parse_int(value, &mut s.ppid)),
        "TracerPid" => ("TracerPid", parse_int(value, &mut s.tracer_pid)),
        "Uid" => ("Uid", parse_int_list(value, &mut s.uid)),
        "Gid" => ("Gid", parse_int_list(value, &mut s.gid)),
        "FDSize" => ("FDSize", parse_int(value, &mut s.fd_size)),
        "Groups" => ("Groups", parse_int_list(value, &mut s.groups)),
        "VmPeak" => ("VmPeak", parse_int(value, &mut s.vm_peak)),
        "VmSize" => ("VmSize", parse_int(value, &mut s.vm_size)),
        "VmLck" => ("VmLck", parse_int(value, &mut s.vm_lck)),
        "VmPin" => ("VmPin", parse_int(value, &mut s.vm_pin)),
        "VmHWM" => ("VmHWM", parse_int(value, &mut s.vm_hwm)),
        "VmRSS" => ("VmRSS", parse_int(value, &mut s.vm_rss)),
        "RssAnon" => ("RssAnon", parse_int(value, &mut s.rss_anon)),
        "RssFile" => ("RssFile", parse_int(value, &mut s.rss_file)),
        "RssShmem" => ("RssShmem", parse_int(value, &mut s.rss_shmem)),
        "VmData" => ("VmData", parse_int(value, &mut s.vm_data)),
        "VmStk" => ("VmStk", parse_int(value, &mut s.vm_stk)),
        "VmExe" => ("VmExe", parse_int(value, &mut s.vm_exe)),
        "VmLib" => ("VmLib", parse_int(value, &mut s.vm_lib)),
        "VmPTE" => ("VmPTE", parse_int(value, &mut s.vm_pte)),
        "VmSwap" => ("VmSwap", parse_int(value, &mut s.vm_swap)),
        "Threads" => ("Threads", parse_int(value, &mut s.threads)),
        _ => return,
    };
    parsed.fields.insert(key, state);
}

/// Drops a trailing `kB` unit, e.g. `"1234 kB"` -> `"1234"`.
fn strip_unit(value: &str) -> &str {
    value.strip_suffix("kB").unwrap_or(value).trim()
}

fn parse_int(value: &str, target: &mut i64) -> StatusFieldState {
    match strip_unit(value).parse::<i64>() {
        Ok(v) => {
            *target = v;
            StatusFieldState::Parsed
        }
        Err(_) => {
            *target = 0;
            StatusFieldState::Defaulted
        }
    }
}

fn parse_int_list(value: &str, target: &mut Vec<i64>) -> StatusFieldState {
    let mut state = StatusFieldState::Parsed;
    target.clear();
    for token in value.split_whitespace() {
        match token.parse::<i64>() {
            Ok(v) => target.push(v),
            Err(_) => state = StatusFieldState::Defaulted,
        }
    }
    state
}

fn parse_state(value: &str, target: &mut String) -> StatusFieldState {
    match STATE_RE.captures(value).and_then(|c| c.get(1)) {
        Some(m) => {
            *target = m.as_str().to_string();
            StatusFieldState::Parsed
        }
        None => {
            target.clear();
            StatusFieldState::Defaulted
        }
    }
}
