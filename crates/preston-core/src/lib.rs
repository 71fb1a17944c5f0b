//! Core types and traits for preston.
//!
//! This crate provides the configuration, error, ignore-matching and
//! summary types shared by the traversal engine and its callers.

mod config;
mod error;
mod ignore;
mod summary;

pub use config::{
    DEFAULT_IGNORED_PATHS, WalkerConfig, WalkerConfigBuilder, WalkerConfigBuilderError,
};
pub use error::{BoxError, ScanError, ScanWarning, WarningKind};
pub use ignore::{ExactMatcher, IgnoreMatcher};
pub use summary::ScanSummary;
