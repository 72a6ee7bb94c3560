//! Host-facing result reporting.
//!
//! The invoking host is a workflow runner: failures are reported as
//! `::error::` workflow-command lines on stdout, and step outputs are
//! appended as `key=value` lines to the file the host names. Both
//! channels are no-ops when the host did not ask for them.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Emit one failure message on the host's error channel.
///
/// Newlines are escaped the way workflow commands require so a
/// multi-line message stays a single annotation.
pub fn emit_error(message: &str) {
    println!("::error::{}", message.replace('\n', "%0A"));
}

/// Writer for step outputs (`key=value` lines).
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    /// Outputs destination from the host environment; `None` when the
    /// host did not provide an output file.
    pub fn from_env(var: &str) -> Self {
        StepOutputs {
            path: std::env::var_os(var).map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        StepOutputs {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one output. Silently does nothing without a destination.
    pub fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{key}={value}")
    }
}
