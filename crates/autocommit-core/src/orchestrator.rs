//! Commit-step orchestration.
//!
//! Sequences decode -> checkout -> stage -> identity -> commit -> push
//! for one run. Every stage's I/O completes before the next starts:
//! staging must see the checked-out branch, committing the staged
//! tree, pushing the finished commit. There is no retry; each
//! invocation runs exactly once end-to-end.

use tracing::info;

use crate::domain::error::{Result, StepError};
use crate::domain::{decode_modified, resolve_branch, Credential};
use crate::git::{CommitSha, Repo};
use crate::identity::ensure_identity;
use crate::staging::stage_paths;

/// Host-supplied inputs for one commit-step run.
#[derive(Debug, Clone)]
pub struct StepInput {
    /// Bearer credential for the push.
    pub token: String,

    /// Commit message text.
    pub message: String,

    /// JSON-encoded array of repository-relative paths. Malformed or
    /// empty input is treated as an empty set.
    pub modified: String,

    /// Opaque pipeline reference string encoding the target branch.
    pub pipeline_ref: String,

    /// Handle of the acting principal; empty means push with the bare
    /// token instead of basic auth.
    pub actor: String,

    /// Remote host's domain, for fallback identity construction.
    pub host_domain: String,

    /// Remote to push to.
    pub remote: String,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Modified set was empty; the repository was not touched.
    NoOp,

    /// A commit was created and accepted by the remote.
    Committed { branch: String, commit: CommitSha },
}

/// Run the commit step once against the given checkout.
///
/// The repository handle is exclusively owned by this call for its
/// duration; concurrent runs against the same checkout are not
/// supported. A rejected push surfaces every per-ref error, not just
/// the first.
pub async fn run_step(repo: &Repo, input: &StepInput) -> Result<StepOutcome> {
    let paths = decode_modified(&input.modified);
    if paths.is_empty() {
        info!("no modified files; nothing to commit");
        return Ok(StepOutcome::NoOp);
    }

    let branch = resolve_branch(&input.pipeline_ref)?;
    info!(branch = %branch, "checking out target branch");
    repo.checkout(&branch).await?;

    stage_paths(repo, &paths).await?;

    let identity = ensure_identity(repo, &input.actor, &input.host_domain).await?;

    let commit = repo.commit(&identity, &input.message).await?;
    info!(commit = %commit, "created commit");

    // With an actor handle the push authenticates as that user against
    // the resolved branch; a bare token pushes the supplied ref as-is.
    let (refspec, credential) = if input.actor.is_empty() {
        (
            format!("HEAD:{}", input.pipeline_ref),
            Credential::Token(input.token.clone()),
        )
    } else {
        (
            format!("{branch}:{branch}"),
            Credential::BasicAuth {
                username: input.actor.clone(),
                password: input.token.clone(),
            },
        )
    };

    let report = repo.push(&input.remote, &refspec, &credential).await?;
    let rejections = report.rejections();
    if !rejections.is_empty() {
        return Err(StepError::PushRejected(rejections));
    }

    info!(branch = %branch, remote = %input.remote, "push accepted");
    Ok(StepOutcome::Committed { branch, commit })
}
