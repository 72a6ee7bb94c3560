//! Branch resolution from pipeline reference strings.

use crate::domain::error::{Result, StepError};

/// Number of structural prefix segments in a pipeline ref
/// (`refs` + category, e.g. `refs/heads/...`).
const PREFIX_SEGMENTS: usize = 2;

/// Resolve the branch name encoded in an opaque pipeline ref.
///
/// The first two slash-separated segments are a fixed structural
/// prefix and are discarded; the remaining segments are rejoined so
/// branch names that themselves contain slashes survive intact
/// (`refs/heads/feature/x/y` -> `feature/x/y`). Picking a fixed index
/// instead of rejoining would silently truncate such names.
pub fn resolve_branch(pipeline_ref: &str) -> Result<String> {
    let segments: Vec<&str> = pipeline_ref.split('/').collect();
    if segments.len() <= PREFIX_SEGMENTS {
        return Err(StepError::InvalidRef(pipeline_ref.to_string()));
    }
    Ok(segments[PREFIX_SEGMENTS..].join("/"))
}
