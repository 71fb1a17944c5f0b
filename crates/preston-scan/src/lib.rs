//! Source tree traversal engine for preston.
//!
//! This crate walks a directory tree and hands every regular file to a
//! caller-supplied visitor. It is the front half of a license conformance
//! scanner: what happens to each file is entirely up to the visitor.
//!
//! # Overview
//!
//! - **Deterministic order**: depth first, lexical within each directory
//! - **Exact ignores**: `.git` by default, more via [`TreeWalker::ignore`]
//! - **Fail fast**: the first visitor error aborts the walk
//! - **Lenient**: entries that cannot be inspected become warnings
//!
//! # Example
//!
//! ```rust,no_run
//! use preston_scan::TreeWalker;
//!
//! let mut walker = TreeWalker::new("/path/to/source");
//! walker.ignore("vendor");
//!
//! let summary = walker
//!     .scan(|path| {
//!         eprintln!("Path: {}", path.display());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! println!("Visited {} files", summary.files_visited);
//! ```

mod visitor;
mod walker;

pub use visitor::{DiagnosticVisitor, VisitResult, Visitor};
pub use walker::TreeWalker;

// Re-export core types for convenience
pub use preston_core::{
    BoxError, DEFAULT_IGNORED_PATHS, ExactMatcher, IgnoreMatcher, ScanError, ScanSummary,
    ScanWarning, WalkerConfig, WarningKind,
};
