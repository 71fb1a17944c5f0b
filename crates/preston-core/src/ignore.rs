//! Ignore matching.
//!
//! The walker asks a single question of an [`IgnoreMatcher`]: is this path
//! ignored? [`ExactMatcher`] answers by exact comparison. Pattern-based
//! matchers plug in through the same trait without touching the traversal.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

/// Decides whether a path is skipped by the walk.
///
/// Called from the directory-read callback, hence `Send + Sync`.
pub trait IgnoreMatcher: Send + Sync {
    /// Returns true if `path` must not be visited or descended into.
    fn is_ignored(&self, path: &Path) -> bool;
}

/// Matches paths that are byte-for-byte equal to one of its entries.
///
/// No normalisation happens: `./.git` does not match `.git`, and a bare
/// `.git` entry does not match `sub/.git`.
#[derive(Debug, Clone, Default)]
pub struct ExactMatcher {
    paths: HashSet<OsString>,
}

impl ExactMatcher {
    /// Create a matcher over the given paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the matcher has no entries.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl IgnoreMatcher for ExactMatcher {
    fn is_ignored(&self, path: &Path) -> bool {
        self.paths.contains(path.as_os_str())
    }
}

impl<F> IgnoreMatcher for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_ignored(&self, path: &Path) -> bool {
        self(path)
    }
}
