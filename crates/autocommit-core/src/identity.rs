//! Commit author resolution with deterministic fallback.

use tracing::warn;

use crate::domain::error::Result;
use crate::domain::Identity;
use crate::git::Repo;

/// Return the repository's configured author, or install the fallback.
///
/// An operator's explicit `user.name`/`user.email` is never
/// overwritten. When either value is missing or empty, both fields are
/// replaced by the fallback derived from the actor handle, and the
/// fallback is persisted so later operations in the same checkout see
/// it.
pub async fn ensure_identity(repo: &Repo, actor: &str, host_domain: &str) -> Result<Identity> {
    let name = repo.config_get("user.name").await?;
    let email = repo.config_get("user.email").await?;

    if let (Some(name), Some(email)) = (&name, &email) {
        if !name.is_empty() && !email.is_empty() {
            return Ok(Identity {
                name: name.clone(),
                email: email.clone(),
            });
        }
    }

    let fallback = Identity::fallback(actor, host_domain);
    warn!(name = %fallback.name, email = %fallback.email, "no author configured; applying fallback identity");
    repo.config_set("user.name", &fallback.name).await?;
    repo.config_set("user.email", &fallback.email).await?;
    Ok(fallback)
}
