//! Direct children of a process from `/proc/<pid>/task/<pid>/children`.

use crate::error::{Error, Result};
use crate::process::reader::ProcReader;

/// Parses the children file. Any non-numeric token fails the whole list.
pub fn parse_children(content: &str) -> std::result::Result<Vec<i64>, String> {
    content
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| format!("invalid child pid {:?}", token))
        })
        .collect()
}

/// Lists direct child pids of `pid` in kernel order.
pub fn read_children(reader: &ProcReader, pid: u32) -> Result<Vec<i64>> {
    let name = format!("task/{}/children", pid);
    let (path, content) = reader.read_pid_file(pid, &name)?;
    parse_children(&content).map_err(|reason| Error::malformed(&path, reason))
}
