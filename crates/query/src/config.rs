//! Compiler configuration.
//!
//! [`QueryConfig`] holds the few tunables the compiler and listing builder
//! consult. Every field has a serde default, so an empty JSON object (or no
//! configuration at all) yields [`QueryConfig::default`].

use serde::{Deserialize, Serialize};

/// Tunables for query compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size assumed when a listing request carries no `limit`
    /// (default: 10000).
    #[serde(default = "default_pagination_size")]
    pub pagination_size: u32,

    /// Offset assumed when a listing request carries no `offset`
    /// (default: 0).
    #[serde(default)]
    pub pagination_from: u32,

    /// Search body `size` used when the search gate is open and the request
    /// carries no `limit` (default: 10).
    #[serde(default = "default_search_size")]
    pub default_search_size: u32,

    /// Field the search tenancy filter is applied to (default: `"instance"`).
    #[serde(default = "default_instance_field")]
    pub instance_field: String,

    /// Field the listing tenancy filter is applied to
    /// (default: `"instance.keyword"`).
    #[serde(default = "default_listing_instance_field")]
    pub listing_instance_field: String,
}

fn default_pagination_size() -> u32 {
    10_000
}

fn default_search_size() -> u32 {
    10
}

fn default_instance_field() -> String {
    "instance".to_string()
}

fn default_listing_instance_field() -> String {
    "instance.keyword".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            pagination_size: default_pagination_size(),
            pagination_from: 0,
            default_search_size: default_search_size(),
            instance_field: default_instance_field(),
            listing_instance_field: default_listing_instance_field(),
        }
    }
}

impl QueryConfig {
    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.pagination_size == 0 {
            errors.push("Pagination size cannot be 0".to_string());
        }

        if self.pagination_from > self.pagination_size {
            errors.push("Pagination start cannot exceed pagination size".to_string());
        }

        if self.default_search_size == 0 {
            errors.push("Default search size cannot be 0".to_string());
        }

        if self.instance_field.trim().is_empty() {
            errors.push("Instance field cannot be empty".to_string());
        }

        if self.listing_instance_field.trim().is_empty() {
            errors.push("Listing instance field cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.pagination_size, 10_000);
        assert_eq!(config.pagination_from, 0);
        assert_eq!(config.default_search_size, 10);
        assert_eq!(config.instance_field, "instance");
        assert_eq!(config.listing_instance_field, "instance.keyword");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: QueryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, QueryConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: QueryConfig =
            serde_json::from_str(r#"{"pagination_size": 50, "instance_field": "tenant"}"#)
                .unwrap();
        assert_eq!(config.pagination_size, 50);
        assert_eq!(config.instance_field, "tenant");
        assert_eq!(config.default_search_size, 10);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = QueryConfig {
            pagination_size: 0,
            pagination_from: 5,
            default_search_size: 0,
            instance_field: " ".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
