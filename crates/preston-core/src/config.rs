//! Walker configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Version-control metadata directory skipped by every new walker.
pub const DEFAULT_IGNORED_PATHS: &[&str] = &[".git"];

/// Configuration for a single tree walk.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkerConfig {
    /// Base directory to scan.
    pub base_dir: PathBuf,

    /// Exact paths that are never visited or descended into.
    #[builder(default = "default_ignored_paths()")]
    #[serde(default = "default_ignored_paths")]
    pub ignored_paths: Vec<String>,
}

fn default_ignored_paths() -> Vec<String> {
    DEFAULT_IGNORED_PATHS.iter().map(|p| (*p).to_string()).collect()
}

impl WalkerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.base_dir {
            Some(ref base) if base.as_os_str().is_empty() => {
                Err("Base directory cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Base directory is required".to_string()),
        }
    }

    /// Append a single ignored path, keeping the defaults.
    pub fn ignore(&mut self, path: impl Into<String>) -> &mut Self {
        self.ignored_paths
            .get_or_insert_with(default_ignored_paths)
            .push(path.into());
        self
    }
}

impl WalkerConfig {
    /// Create a new walker config builder.
    pub fn builder() -> WalkerConfigBuilder {
        WalkerConfigBuilder::default()
    }

    /// Create a config for scanning a directory with the default ignores.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ignored_paths: default_ignored_paths(),
        }
    }

    /// Add an exact ignored path. Duplicates are dropped.
    pub fn add_ignored(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.ignored_paths.contains(&path) {
            self.ignored_paths.push(path);
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkerConfig::builder()
            .base_dir("/src/pkg")
            .ignored_paths(vec!["vendor".to_string()])
            .build()
            .unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/src/pkg"));
        assert_eq!(config.ignored_paths, vec!["vendor".to_string()]);
    }

    #[test]
    fn test_builder_keeps_defaults() {
        let config = WalkerConfig::builder()
            .base_dir("/src/pkg")
            .ignore("build")
            .build()
            .unwrap();

        assert_eq!(config.ignored_paths, vec![".git".to_string(), "build".to_string()]);
    }

    #[test]
    fn test_builder_rejects_empty_base() {
        let err = WalkerConfig::builder().base_dir("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));

        assert!(WalkerConfig::builder().build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = WalkerConfig::new("/src/pkg");
        assert_eq!(config.base_dir, PathBuf::from("/src/pkg"));
        assert_eq!(config.ignored_paths, vec![".git".to_string()]);
    }

    #[test]
    fn test_add_ignored_dedups() {
        let mut config = WalkerConfig::default();
        config.add_ignored(".git");
        config.add_ignored("target");
        config.add_ignored("target");

        assert_eq!(config.ignored_paths, vec![".git".to_string(), "target".to_string()]);
    }
}
