//! Git backend for the commit step.
//!
//! All repository access goes through [`Repo`], a handle owning one
//! checkout path. Operations shell out to the system `git` binary with
//! `GIT_TERMINAL_PROMPT=0` so a missing credential fails immediately
//! instead of hanging on a prompt.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::domain::error::{Result, StepError};
use crate::domain::{Credential, Identity, PathStatus};

/// Upper bound for any single git invocation, network ones included.
const GIT_TIMEOUT_SECS: u64 = 300;

/// Content-derived identifier of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one attempted ref update on the remote.
#[derive(Debug, Clone)]
pub struct RefUpdate {
    /// Remote ref the update targeted.
    pub refname: String,

    /// Whether the remote rejected the update.
    pub rejected: bool,

    /// Summary reported by git (e.g. `[rejected] (non-fast-forward)`).
    pub summary: String,
}

/// Per-ref outcomes of a push.
///
/// Remote-side rejections are entries here, not errors: the caller
/// decides what a rejected ref means for the run as a whole.
#[derive(Debug, Clone, Default)]
pub struct PushReport {
    pub updates: Vec<RefUpdate>,
}

impl PushReport {
    /// Parse `git push --porcelain` stdout.
    ///
    /// Each ref line is `<flag>\t<from>:<to>\t<summary>`; `!` flags a
    /// rejected update. `To <url>` and `Done` framing lines carry no
    /// ref information.
    pub fn parse_porcelain(stdout: &str) -> Self {
        let mut updates = Vec::new();
        for line in stdout.lines() {
            if line.starts_with("To ") || line.trim() == "Done" || line.trim().is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, '\t');
            let (Some(flag), Some(refspec)) = (parts.next(), parts.next()) else {
                continue;
            };
            let summary = parts.next().unwrap_or("").to_string();
            let refname = refspec
                .split_once(':')
                .map(|(_, to)| to)
                .unwrap_or(refspec)
                .to_string();
            updates.push(RefUpdate {
                refname,
                rejected: flag.starts_with('!'),
                summary,
            });
        }
        PushReport { updates }
    }

    /// One message per rejected ref, suitable for the host's failure
    /// channel.
    pub fn rejections(&self) -> Vec<String> {
        self.updates
            .iter()
            .filter(|u| u.rejected)
            .map(|u| format!("push rejected for {}: {}", u.refname, u.summary))
            .collect()
    }
}

/// Handle to one on-disk checkout.
///
/// The repository is a process-wide resource; passing an explicit
/// handle (instead of ambient lookup) keeps orchestrations in tests
/// isolated to their own temporary checkouts.
pub struct Repo {
    dir: PathBuf,
}

struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl Repo {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Repo { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn git(&self, args: &[&str]) -> Result<GitOutput> {
        debug!(command = ?args.first(), "running git");
        let child = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StepError::Git(format!("failed to run git: {e}")))?;

        let output = tokio::time::timeout(
            Duration::from_secs(GIT_TIMEOUT_SECS),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| {
            StepError::Git(format!(
                "git {} timed out after {GIT_TIMEOUT_SECS} seconds",
                args.first().copied().unwrap_or("")
            ))
        })?
        .map_err(|e| StepError::Git(format!("failed to collect git output: {e}")))?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn git_ok(&self, args: &[&str]) -> Result<String> {
        let out = self.git(args).await?;
        if !out.success {
            return Err(StepError::Git(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or(""),
                out.stderr.trim()
            )));
        }
        Ok(out.stdout)
    }

    /// Check out an existing branch.
    pub async fn checkout(&self, branch: &str) -> Result<()> {
        self.git_ok(&["checkout", branch]).await?;
        Ok(())
    }

    /// Add one path to the index.
    pub async fn add(&self, path: &str) -> Result<()> {
        self.git_ok(&["add", "--", path]).await?;
        Ok(())
    }

    /// Observed index status of one path.
    pub async fn status_of(&self, path: &str) -> Result<PathStatus> {
        let out = self
            .git_ok(&["status", "--porcelain", "--", path])
            .await?;
        Ok(PathStatus::from_porcelain_line(out.lines().next().unwrap_or("")))
    }

    /// Read a repository-level config value. `None` when unset.
    pub async fn config_get(&self, key: &str) -> Result<Option<String>> {
        let out = self.git(&["config", "--local", "--get", key]).await?;
        if !out.success {
            // Exit code 1 with empty stderr means the key is unset.
            if out.stderr.trim().is_empty() {
                return Ok(None);
            }
            return Err(StepError::Git(format!(
                "git config --get {key} failed: {}",
                out.stderr.trim()
            )));
        }
        Ok(Some(out.stdout.trim().to_string()))
    }

    /// Write a repository-level config value.
    pub async fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.git_ok(&["config", "--local", key, value]).await?;
        Ok(())
    }

    /// Commit the staged tree under the given identity.
    ///
    /// Fails with [`StepError::CommitFailed`] when the backend reports
    /// nothing to commit; this can happen when staging matched no real
    /// diff.
    pub async fn commit(&self, identity: &Identity, message: &str) -> Result<CommitSha> {
        let name_cfg = format!("user.name={}", identity.name);
        let email_cfg = format!("user.email={}", identity.email);
        let out = self
            .git(&["-c", &name_cfg, "-c", &email_cfg, "commit", "-m", message])
            .await?;
        if !out.success {
            let detail = if out.stdout.contains("nothing to commit")
                || out.stdout.contains("nothing added to commit")
            {
                "nothing to commit".to_string()
            } else {
                let stderr = out.stderr.trim();
                if stderr.is_empty() {
                    out.stdout.trim().to_string()
                } else {
                    stderr.to_string()
                }
            };
            return Err(StepError::CommitFailed(detail));
        }
        let sha = self.git_ok(&["rev-parse", "HEAD"]).await?.trim().to_string();
        if sha.is_empty() {
            return Err(StepError::CommitFailed(
                "git rev-parse HEAD returned empty output".to_string(),
            ));
        }
        Ok(CommitSha(sha))
    }

    /// Configured URL of a named remote.
    pub async fn remote_url(&self, remote: &str) -> Result<String> {
        let url_key = format!("remote.{remote}.url");
        match self.config_get(&url_key).await? {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(StepError::Git(format!("remote {remote} has no configured url"))),
        }
    }

    /// Push one refspec to a remote under a credential.
    ///
    /// Per-ref rejections come back as [`PushReport`] entries. Only a
    /// transport failure that produced no per-ref information (network,
    /// auth) is an error.
    pub async fn push(
        &self,
        remote: &str,
        refspec: &str,
        credential: &Credential,
    ) -> Result<PushReport> {
        let url = self.remote_url(remote).await?;
        let target = credential.apply_to_url(&url);
        let out = self.git(&["push", "--porcelain", &target, refspec]).await?;
        let report = PushReport::parse_porcelain(&out.stdout);
        if report.updates.is_empty() && !out.success {
            return Err(StepError::Git(format!(
                "git push failed: {}",
                out.stderr.trim()
            )));
        }
        Ok(report)
    }
}
