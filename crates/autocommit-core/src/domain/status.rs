//! Observed index status of a single path.

use std::fmt;

/// Status of a path as reported by the repository index after staging.
///
/// Parsed from the index column of `git status --porcelain` output.
/// Anything that is not a changed variant means staging silently
/// matched no real diff for that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Untracked,
    Unchanged,
}

impl PathStatus {
    /// Parse the index (staged) column of a porcelain status line.
    ///
    /// An empty line means git reported nothing for the path, i.e. the
    /// path is unchanged.
    pub fn from_porcelain_line(line: &str) -> Self {
        match line.chars().next() {
            Some('A') => PathStatus::Added,
            Some('M') => PathStatus::Modified,
            Some('D') => PathStatus::Deleted,
            Some('R') => PathStatus::Renamed,
            Some('?') => PathStatus::Untracked,
            _ => PathStatus::Unchanged,
        }
    }

    /// Whether this status counts as a staged change that can be
    /// committed.
    pub fn is_changed(&self) -> bool {
        matches!(
            self,
            PathStatus::Added | PathStatus::Modified | PathStatus::Deleted | PathStatus::Renamed
        )
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathStatus::Added => "added",
            PathStatus::Modified => "modified",
            PathStatus::Deleted => "deleted",
            PathStatus::Renamed => "renamed",
            PathStatus::Untracked => "untracked",
            PathStatus::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}
