//! Scan summary and statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// What a completed scan saw.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Files handed to the visitor.
    pub files_visited: u64,
    /// Directories descended into, excluding the base directory.
    pub dirs_entered: u64,
    /// Entries dropped by the ignore matcher.
    pub entries_ignored: u64,
    /// Entries that are neither regular files nor directories, or could
    /// not be inspected.
    pub entries_skipped: u64,
    /// Non-fatal problems, in traversal order.
    pub warnings: Vec<ScanWarning>,
    /// Wall time of the scan.
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visited file.
    pub fn record_file(&mut self) {
        self.files_visited += 1;
    }

    /// Record a directory that will be descended into.
    pub fn record_dir(&mut self) {
        self.dirs_entered += 1;
    }

    /// Record an entry that was skipped without a warning.
    pub fn record_skipped(&mut self) {
        self.entries_skipped += 1;
    }

    /// Record an entry that was skipped because it could not be inspected.
    pub fn record_warning(&mut self, warning: ScanWarning) {
        self.entries_skipped += 1;
        self.warnings.push(warning);
    }

    /// Whether any non-fatal problems were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
