//! preston - walk a source tree for license conformance scanning.
//!
//! Usage:
//!   preston [PATH]                 Print every file that would be scanned
//!   preston -I vendor [PATH]       Skip an exact path
//!   preston -c preston.json        Load the walker config from a file
//!   preston --help                 Show help

use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use preston_scan::{DiagnosticVisitor, TreeWalker, WalkerConfig};

#[derive(Parser)]
#[command(
    name = "preston",
    version,
    about = "Walk a source tree for license conformance scanning",
    long_about = "preston walks a source tree and reports every file that a \
                  license scan would inspect. Version-control metadata (.git) \
                  is skipped unless --no-default-ignores is given."
)]
struct Cli {
    /// Directory to scan (defaults to the config's base_dir, then ".")
    path: Option<PathBuf>,

    /// Exact path to skip, relative to PATH or absolute (repeatable)
    #[arg(short = 'I', long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,

    /// Do not skip .git
    #[arg(long)]
    no_default_ignores: bool,

    /// Load walker configuration from a JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let walker = TreeWalker::with_config(build_config(&cli)?);

    let mut visitor = DiagnosticVisitor::stderr();
    let summary = walker
        .scan_with(&mut visitor)
        .with_context(|| format!("Scan of {} failed", walker.base_dir().display()))?;

    eprintln!(
        "{} files, {} directories, {} ignored in {:.2}s",
        summary.files_visited,
        summary.dirs_entered,
        summary.entries_ignored,
        summary.scan_duration.as_secs_f64()
    );

    if summary.has_warnings() {
        eprintln!("{} warning(s) during scan", summary.warnings.len());
        for warning in &summary.warnings {
            tracing::warn!(
                path = %warning.path.display(),
                kind = ?warning.kind,
                "{}",
                warning.message
            );
        }
    }

    Ok(())
}

/// Merge the optional config file with command-line flags.
fn build_config(cli: &Cli) -> Result<WalkerConfig> {
    let mut config = match cli.config {
        Some(ref file) => {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("Cannot read config {}", file.display()))?;
            serde_json::from_str::<WalkerConfig>(&raw)
                .with_context(|| format!("Invalid config {}", file.display()))?
        }
        None => WalkerConfig::default(),
    };

    if let Some(ref path) = cli.path {
        config.base_dir = path.clone();
    }
    if cli.no_default_ignores {
        config.ignored_paths.retain(|p| p != ".git");
    }
    for path in &cli.ignore {
        config.add_ignored(path.as_str());
    }

    Ok(config)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_merge() {
        let cli = Cli::parse_from(["preston", "-I", "vendor", "--ignore", "build", "src"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.base_dir, PathBuf::from("src"));
        assert_eq!(config.ignored_paths, vec![".git", "vendor", "build"]);
    }

    #[test]
    fn test_no_default_ignores() {
        let cli = Cli::parse_from(["preston", "--no-default-ignores"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.base_dir, PathBuf::from("."));
        assert!(config.ignored_paths.is_empty());
    }

    #[test]
    fn test_config_file_then_flags() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("preston.json");
        fs::write(&file, r#"{ "base_dir": "/usr/src/pkg", "ignored_paths": ["debian"] }"#).unwrap();

        let cli = Cli::parse_from(["preston", "-c", file.to_str().unwrap(), "-I", "po"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/usr/src/pkg"));
        assert_eq!(config.ignored_paths, vec!["debian", "po"]);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["preston", "-c", "/nonexistent/preston.json"]);
        assert!(build_config(&cli).is_err());
    }
}
