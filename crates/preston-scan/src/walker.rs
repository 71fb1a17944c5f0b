//! Serial, sorted tree walker.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info};

use preston_core::{ExactMatcher, IgnoreMatcher, ScanError, ScanSummary, ScanWarning, WalkerConfig};

use crate::visitor::{VisitResult, Visitor};

/// Walks a source tree and hands every regular file to a visitor.
///
/// Entries are visited depth first, in lexical order within each directory.
/// Ignored paths are never visited and ignored directories are never
/// entered. A walker keeps nothing between scans except its configuration.
pub struct TreeWalker {
    config: WalkerConfig,
    matcher: Option<Arc<dyn IgnoreMatcher>>,
}

impl TreeWalker {
    /// Create a walker for `base_dir` that ignores `.git`.
    ///
    /// The directory is not checked until [`scan`](Self::scan).
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(WalkerConfig::new(base_dir))
    }

    /// Create a walker from an existing config.
    pub fn with_config(config: WalkerConfig) -> Self {
        Self {
            config,
            matcher: None,
        }
    }

    /// Replace exact matching over the configured ignored paths with `matcher`.
    pub fn with_matcher(mut self, matcher: impl IgnoreMatcher + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Add an exact ignored path.
    pub fn ignore(&mut self, path: impl Into<String>) -> &mut Self {
        self.config.add_ignored(path);
        self
    }

    /// Drop every ignored path, including the defaults.
    pub fn clear_ignored(&mut self) -> &mut Self {
        self.config.ignored_paths.clear();
        self
    }

    /// Base directory of the walk.
    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    /// Currently configured exact ignored paths.
    pub fn ignored_paths(&self) -> &[String] {
        &self.config.ignored_paths
    }

    /// The walker's configuration.
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Check whether `path`, as produced by a walk of this base directory,
    /// is ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        is_ignored_under(self.matcher().as_ref(), &self.config.base_dir, path)
    }

    /// Walk the tree, calling `visit` for each regular file.
    ///
    /// The first visitor error stops the walk and is returned as
    /// [`ScanError::Visitor`]. Entries that cannot be inspected are skipped
    /// and reported in [`ScanSummary::warnings`].
    pub fn scan<F>(&self, mut visit: F) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&Path) -> VisitResult,
    {
        self.scan_with(&mut visit)
    }

    /// Walk the tree with any [`Visitor`].
    pub fn scan_with<V>(&self, visitor: &mut V) -> Result<ScanSummary, ScanError>
    where
        V: Visitor + ?Sized,
    {
        let start = Instant::now();
        let base = self.config.base_dir.as_path();
        let base_metadata = self.check_base()?;

        let matcher = self.matcher();
        let mut summary = ScanSummary::new();

        if matcher.is_ignored(base) {
            info!(base = %base.display(), "Base path is ignored, nothing to scan");
            summary.scan_duration = start.elapsed();
            return Ok(summary);
        }

        // A base that is not a directory is treated as the only entry.
        if !base_metadata.is_dir() {
            if base_metadata.is_file() {
                if let Err(source) = visitor.visit(base) {
                    return Err(ScanError::visitor(base, source));
                }
                summary.record_file();
            } else {
                debug!(base = %base.display(), "Base path is not a regular file");
                summary.record_skipped();
            }
            summary.scan_duration = start.elapsed();
            return Ok(summary);
        }

        info!(base = %base.display(), "Scanning tree");

        let ignored = Arc::new(AtomicU64::new(0));
        let walker = WalkDir::new(base)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir({
                let matcher = Arc::clone(&matcher);
                let root = base.to_path_buf();
                let ignored = Arc::clone(&ignored);
                move |_depth, _dir, _state, children| {
                    // Dropping an entry here also stops descent into it.
                    children.retain(|child| match child {
                        Ok(entry) => {
                            let path = entry.path();
                            if is_ignored_under(matcher.as_ref(), &root, &path) {
                                debug!(path = %path.display(), "Ignored");
                                ignored.fetch_add(1, Ordering::Relaxed);
                                false
                            } else {
                                true
                            }
                        }
                        Err(_) => true,
                    });
                }
            });

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| base.to_path_buf());
                    debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    summary.record_warning(read_warning(path, &err));
                    continue;
                }
            };

            // The base directory itself was checked above.
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                // jwalk reports a failed read_dir on the directory's own entry.
                match entry.read_children_error {
                    Some(ref err) => {
                        debug!(
                            path = %path.display(),
                            error = %err,
                            "Skipping unreadable directory"
                        );
                        summary.record_warning(read_warning(path, err));
                    }
                    None => summary.record_dir(),
                }
                continue;
            }

            // Follow symlinks here so a link to a file counts as a file.
            match fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => {
                    debug!(path = %path.display(), "Skipping non-regular file");
                    summary.record_skipped();
                    continue;
                }
                Err(err) => {
                    let dangling =
                        file_type.is_symlink() && err.kind() == std::io::ErrorKind::NotFound;
                    let warning = if dangling {
                        ScanWarning::broken_symlink(&path)
                    } else {
                        ScanWarning::metadata(&path, &err)
                    };
                    debug!(path = %path.display(), error = %err, "Skipping uninspectable entry");
                    summary.record_warning(warning);
                    continue;
                }
            }

            if let Err(source) = visitor.visit(&path) {
                debug!(path = %path.display(), "Visitor failed, aborting scan");
                return Err(ScanError::visitor(path, source));
            }
            summary.record_file();
        }

        summary.entries_ignored = ignored.load(Ordering::Relaxed);
        summary.scan_duration = start.elapsed();

        info!(
            files = summary.files_visited,
            dirs = summary.dirs_entered,
            ignored = summary.entries_ignored,
            warnings = summary.warnings.len(),
            "Scan complete"
        );

        Ok(summary)
    }

    /// Fail early if the base path is empty, missing or an unreadable
    /// directory.
    fn check_base(&self) -> Result<fs::Metadata, ScanError> {
        let base = self.config.base_dir.as_path();
        if base.as_os_str().is_empty() {
            return Err(ScanError::InvalidConfig {
                message: "Base directory cannot be empty".to_string(),
            });
        }

        let metadata = fs::metadata(base).map_err(|e| ScanError::io(base, e))?;
        if metadata.is_dir() {
            fs::read_dir(base).map_err(|e| ScanError::io(base, e))?;
        }
        Ok(metadata)
    }

    fn matcher(&self) -> Arc<dyn IgnoreMatcher> {
        match self.matcher {
            Some(ref matcher) => Arc::clone(matcher),
            None => Arc::new(ExactMatcher::new(&self.config.ignored_paths)),
        }
    }
}

/// Warning for a directory that could not be read.
fn read_warning(path: PathBuf, err: &jwalk::Error) -> ScanWarning {
    match err.io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            ScanWarning::permission_denied(path)
        }
        _ => ScanWarning::read_error(path, err),
    }
}

/// An entry is ignored if either its path relative to `root` or its full
/// path matches.
fn is_ignored_under(matcher: &dyn IgnoreMatcher, root: &Path, path: &Path) -> bool {
    if matcher.is_ignored(path) {
        return true;
    }
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => matcher.is_ignored(relative),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();

        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join(".git/config"), "[core]").unwrap();
        fs::write(root.join(".git/objects/pack"), "").unwrap();
        fs::write(root.join("sub/b.txt"), "beta").unwrap();
        fs::write(root.join("sub/deeper/c.txt"), "gamma").unwrap();

        temp
    }

    fn visited(walker: &TreeWalker) -> Vec<PathBuf> {
        let mut seen = Vec::new();
        walker
            .scan(|path| {
                seen.push(path.to_path_buf());
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_new_has_default_ignore() {
        let walker = TreeWalker::new("/src/pkg");
        assert_eq!(walker.base_dir(), Path::new("/src/pkg"));
        assert_eq!(walker.ignored_paths(), &[".git".to_string()]);
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(temp.path());

        let seen = visited(&walker);
        let root = temp.path();
        assert_eq!(
            seen,
            vec![
                root.join("a.txt"),
                root.join("sub/b.txt"),
                root.join("sub/deeper/c.txt"),
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(temp.path());

        let summary = walker.scan(|_| Ok(())).unwrap();
        assert_eq!(summary.files_visited, 3);
        assert_eq!(summary.dirs_entered, 2);
        assert_eq!(summary.entries_ignored, 1);
        assert!(!summary.has_warnings());
    }

    #[test]
    fn test_is_ignored_relative_and_full() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(temp.path());

        assert!(walker.is_ignored(&temp.path().join(".git")));
        assert!(walker.is_ignored(Path::new(".git")));
        assert!(!walker.is_ignored(&temp.path().join("sub/.git")));
        assert!(!walker.is_ignored(&temp.path().join("a.txt")));
    }

    #[test]
    fn test_clear_ignored_enters_git() {
        let temp = create_test_tree();
        let mut walker = TreeWalker::new(temp.path());
        walker.clear_ignored();

        let seen = visited(&walker);
        assert!(seen.contains(&temp.path().join(".git/config")));
        assert!(seen.contains(&temp.path().join(".git/objects/pack")));
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_custom_matcher() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(temp.path())
            .with_matcher(|path: &Path| {
                path.file_name().is_some_and(|n| n == "deeper" || n == ".git")
            });

        let seen = visited(&walker);
        assert_eq!(seen, vec![temp.path().join("a.txt"), temp.path().join("sub/b.txt")]);
    }

    #[test]
    fn test_empty_base_rejected() {
        let walker = TreeWalker::new("");
        let err = walker.scan(|_| Ok(())).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
    }
}
