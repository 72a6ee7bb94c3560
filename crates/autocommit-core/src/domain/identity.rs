//! Commit author identity.

/// A (name, email) pair attributed to a commit's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Deterministic fallback identity for an acting principal.
    ///
    /// Used when the repository has no configured author; both fields
    /// are derived from the actor handle, with a noreply address under
    /// the host's domain.
    pub fn fallback(actor: &str, host_domain: &str) -> Self {
        Identity {
            name: actor.to_string(),
            email: format!("{actor}@users.noreply.{host_domain}"),
        }
    }
}
