//! Domain model for the commit step: errors, identities, credentials,
//! ref resolution, and modified-file-list decoding.

pub mod credential;
pub mod error;
pub mod identity;
pub mod modified;
pub mod pipeline_ref;
pub mod status;

pub use credential::Credential;
pub use error::{Result, StepError};
pub use identity::Identity;
pub use modified::decode_modified;
pub use pipeline_ref::resolve_branch;
pub use status::PathStatus;
