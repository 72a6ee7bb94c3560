//! Domain-level error taxonomy for the commit step.

use crate::domain::status::PathStatus;

/// Errors that abort a commit-step run.
///
/// A malformed modified-file list is deliberately NOT represented here:
/// decode failure degrades to an empty set and the run succeeds as a
/// no-op (see [`crate::domain::modified`]).
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("invalid pipeline ref: {0}")]
    InvalidRef(String),

    #[error("staging mismatch for {path}: status {status}")]
    StagingMismatch { path: String, status: PathStatus },

    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("push rejected: {}", .0.join("; "))]
    PushRejected(Vec<String>),

    #[error("git error: {0}")]
    Git(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StepError {
    /// Every error message carried by this failure.
    ///
    /// A rejected push can carry several per-ref errors; the host must
    /// see all of them, not just the first.
    pub fn messages(&self) -> Vec<String> {
        match self {
            StepError::PushRejected(errs) => errs.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type for commit-step operations.
pub type Result<T> = std::result::Result<T, StepError>;
