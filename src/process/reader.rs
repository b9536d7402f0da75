//! Raw access to /proc pseudo-files.
//!
//! Every read opens the file, slurps it and closes it before returning, so
//! no handle outlives a call. The root directory is configurable so tests
//! can point the reader at a fake tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default mount point of the proc filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Reader for files below a proc root.
#[derive(Debug, Clone)]
pub struct ProcReader {
    root: PathBuf,
}

impl Default for ProcReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `<root>/<pid>/<name>`.
    pub fn pid_path(&self, pid: u32, name: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(name)
    }

    /// Path of `<root>/<name>` for system-wide files such as `uptime`.
    pub fn system_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads `<root>/<pid>/<name>` fully.
    pub fn read_pid_file(&self, pid: u32, name: &str) -> Result<(PathBuf, String)> {
        let path = self.pid_path(pid, name);
        let content = read_to_string(&path)?;
        Ok((path, content))
    }

    /// Reads `<root>/<name>` fully.
    pub fn read_system_file(&self, name: &str) -> Result<(PathBuf, String)> {
        let path = self.system_path(name);
        let content = read_to_string(&path)?;
        Ok((path, content))
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::from_io(path, e))
}
