//! autocommit core library
//!
//! One pipeline step: stage a host-supplied set of modified files,
//! ensure a commit author exists, commit, and push the result to a
//! remote under a pipeline-supplied credential.

pub mod domain;
pub mod git;
pub mod identity;
pub mod orchestrator;
pub mod reporting;
pub mod staging;
pub mod telemetry;

#[cfg(test)]
mod testutil;

pub use domain::{
    decode_modified, resolve_branch, Credential, Identity, PathStatus, Result, StepError,
};
pub use git::{CommitSha, PushReport, RefUpdate, Repo};
pub use identity::ensure_identity;
pub use orchestrator::{run_step, StepInput, StepOutcome};
pub use reporting::{emit_error, StepOutputs};
pub use staging::stage_paths;
pub use telemetry::init_tracing;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
