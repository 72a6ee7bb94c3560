//! Staging of modified paths with post-add verification.

use tracing::info;

use crate::domain::error::{Result, StepError};
use crate::git::Repo;

/// Stage each path in order and verify git actually saw a change.
///
/// A path whose observed status after `add` is not a changed variant
/// means staging silently failed for it; the run aborts on the first
/// such path, leaving the remaining paths unstaged. An empty input is
/// a successful no-op.
pub async fn stage_paths(repo: &Repo, paths: &[String]) -> Result<()> {
    for path in paths {
        repo.add(path).await?;
        let status = repo.status_of(path).await?;
        if !status.is_changed() {
            return Err(StepError::StagingMismatch {
                path: path.clone(),
                status,
            });
        }
        info!(path = %path, status = %status, "staged");
    }
    Ok(())
}
