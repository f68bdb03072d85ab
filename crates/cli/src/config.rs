//! Command-line configuration for `catq`.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CATQ_LOG_LEVEL` | warn | Log level |
//! | `CATQ_CONFIG` | - | JSON file holding compiler settings |
//! | `CATQ_PAGINATION_SIZE` | 10000 | Listing page size when no `limit` is given |
//! | `CATQ_DEFAULT_SEARCH_SIZE` | 10 | Search page size when the search gate is open |
//!
//! Variables override the values read from `CATQ_CONFIG`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use catalogue_query::QueryConfig;
use clap::{Args, Parser, Subcommand};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "catq")]
#[command(about = "Compile catalogue requests into search-engine queries")]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CATQ_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// JSON file holding compiler settings.
    #[arg(long, env = "CATQ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Listing page size used when a request carries no `limit`.
    #[arg(long, env = "CATQ_PAGINATION_SIZE", global = true)]
    pub pagination_size: Option<u32>,

    /// Search page size used when the search gate is open.
    #[arg(long, env = "CATQ_DEFAULT_SEARCH_SIZE", global = true)]
    pub default_search_size: Option<u32>,

    /// What to compile.
    #[command(subcommand)]
    pub command: Command,
}

/// The request kinds `catq` compiles.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compile a search request into a search body.
    Search(InputArgs),
    /// Resolve a relationship request into a query.
    Relationship(InputArgs),
    /// Build a listing request body.
    List(InputArgs),
}

impl Command {
    /// The input file, if one was given.
    pub fn input(&self) -> Option<&Path> {
        match self {
            Command::Search(args) | Command::Relationship(args) | Command::List(args) => {
                args.input.as_deref()
            }
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search(_) => "search",
            Command::Relationship(_) => "relationship",
            Command::List(_) => "list",
        }
    }
}

/// Input selection shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Read the request from this file instead of stdin.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl CliConfig {
    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if self.pagination_size == Some(0) {
            errors.push("Pagination size cannot be 0".to_string());
        }

        if self.default_search_size == Some(0) {
            errors.push("Default search size cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Loads the compiler settings, applying command-line overrides.
    pub fn query_config(&self) -> anyhow::Result<QueryConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str::<QueryConfig>(&raw)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => QueryConfig::default(),
        };

        if let Some(size) = self.pagination_size {
            config.pagination_size = size;
        }
        if let Some(size) = self.default_search_size {
            config.default_search_size = size;
        }

        config
            .validate()
            .map_err(|errors| anyhow::anyhow!("Invalid query configuration: {}", errors.join("; ")))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_subcommands() {
        let cli = parse(&["catq", "search", "--input", "req.json"]);
        assert_eq!(cli.command.name(), "search");
        assert_eq!(cli.command.input(), Some(Path::new("req.json")));

        let cli = parse(&["catq", "list"]);
        assert_eq!(cli.command.name(), "list");
        assert_eq!(cli.command.input(), None);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(CliConfig::try_parse_from(["catq"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "catq",
            "relationship",
            "--log-level",
            "debug",
            "--pagination-size",
            "500",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.pagination_size, Some(500));
    }

    #[test]
    fn test_validate() {
        let cli = parse(&["catq", "search", "--log-level", "loud", "--pagination-size", "0"]);
        let errors = cli.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("log level")));
        assert!(errors.iter().any(|e| e.contains("Pagination")));
    }

    #[test]
    fn test_query_config_from_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pagination_size": 200, "instance_field": "tenant" }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["catq", "list", "--config", path.as_str(), "--default-search-size", "5"]);
        let config = cli.query_config().unwrap();
        assert_eq!(config.pagination_size, 200);
        assert_eq!(config.default_search_size, 5);
        assert_eq!(config.instance_field, "tenant");
    }

    #[test]
    fn test_query_config_rejects_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["catq", "list", "--config", path.as_str()]);
        assert!(cli.query_config().is_err());
    }
}
