//! Decoding of the host-supplied modified-file list.

use tracing::warn;

/// Decode the JSON-encoded list of modified repository paths.
///
/// Malformed or empty input yields an empty list, never an error: the
/// step chain may legitimately run with nothing to commit, and a
/// garbled list from an upstream step must degrade to a no-op rather
/// than fail the whole pipeline.
pub fn decode_modified(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(paths) => paths,
        Err(err) => {
            warn!(error = %err, "malformed modified-file list; treating as empty");
            Vec::new()
        }
    }
}
