//! # Quote Configuration
//!
//! Settings for the quote CLI, read once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     PRESSWORK_CATALOG_PATH=/srv/catalog                                 │
//! │     PRESSWORK_LOG=debug                                                 │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or the platform default)           │
//! │     ~/.config/presswork/quote.toml (Linux)                              │
//! │     ~/Library/Application Support/com.presswork.quote/quote.toml        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quote.toml
//! [catalog]
//! path = "catalog"
//! strict = true
//!
//! [limits]
//! max_line_quantity = 1000000
//! search_limit = 20
//!
//! [order]
//! draft_path = "/var/lib/presswork/draft.json"
//!
//! [logging]
//! filter = "info,presswork=debug"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use presswork_core::MAX_LINE_QUANTITY;

/// Largest page a search may return.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,presswork=debug";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the product catalog lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Catalog file, or a directory of `*.json` files.
    pub path: PathBuf,

    /// Reject the whole catalog on the first invalid product.
    pub strict: bool,
}

impl Default for CatalogSection {
    fn default() -> Self {
        CatalogSection {
            path: PathBuf::from("catalog"),
            strict: true,
        }
    }
}

/// Request bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    /// Largest quantity a single line may order.
    pub max_line_quantity: i64,

    /// Search page size when the request does not give one.
    pub search_limit: usize,
}

impl Default for LimitsSection {
    fn default() -> Self {
        LimitsSection {
            max_line_quantity: MAX_LINE_QUANTITY,
            search_limit: 20,
        }
    }
}

/// Draft order persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderSection {
    /// Draft order file. Defaults to `draft.json` in the platform data dir.
    pub draft_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        LoggingSection {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// =============================================================================
// Quote Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuoteConfig {
    pub catalog: CatalogSection,
    pub limits: LimitsSection,
    pub order: OrderSection,
    pub logging: LoggingSection,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`quote.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading quote config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    message: "file not found".to_string(),
                });
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("catalog.path must not be empty".into()));
        }

        if self.limits.max_line_quantity <= 0 {
            return Err(ConfigError::Invalid(
                "limits.max_line_quantity must be greater than 0".into(),
            ));
        }

        if self.limits.search_limit == 0 || self.limits.search_limit > MAX_SEARCH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "limits.search_limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `PRESSWORK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable lookup.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("PRESSWORK_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(strict) = var("PRESSWORK_CATALOG_STRICT") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.catalog.strict = true,
                "0" | "false" | "no" => self.catalog.strict = false,
                _ => warn!(value = %strict, "Unknown PRESSWORK_CATALOG_STRICT value"),
            }
        }

        if let Some(max) = var("PRESSWORK_MAX_LINE_QUANTITY") {
            match max.parse::<i64>() {
                Ok(max) => self.limits.max_line_quantity = max,
                Err(_) => warn!(value = %max, "Ignoring non-numeric PRESSWORK_MAX_LINE_QUANTITY"),
            }
        }

        if let Some(limit) = var("PRESSWORK_SEARCH_LIMIT") {
            match limit.parse::<usize>() {
                Ok(limit) => self.limits.search_limit = limit,
                Err(_) => warn!(value = %limit, "Ignoring non-numeric PRESSWORK_SEARCH_LIMIT"),
            }
        }

        if let Some(path) = var("PRESSWORK_DRAFT_PATH") {
            self.order.draft_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = var("PRESSWORK_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the draft order file, falling back to the platform data dir.
    pub fn draft_path(&self) -> PathBuf {
        self.order
            .draft_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("draft.json")))
            .unwrap_or_else(|| PathBuf::from("presswork-draft.json"))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("quote.toml"))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "presswork", "quote")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = QuoteConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.catalog.strict);
        assert_eq!(config.limits.max_line_quantity, MAX_LINE_QUANTITY);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QuoteConfig::from_toml(
            r#"
            [catalog]
            path = "/srv/presswork/catalog"

            [limits]
            search_limit = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.path, PathBuf::from("/srv/presswork/catalog"));
        assert!(config.catalog.strict);
        assert_eq!(config.limits.search_limit, 50);
        assert_eq!(config.limits.max_line_quantity, MAX_LINE_QUANTITY);
        assert_eq!(config.order.draft_path, None);
    }

    #[test]
    fn test_malformed_toml() {
        let err = QuoteConfig::from_toml("[limits]\nsearch_limit = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PRESSWORK_CATALOG_PATH", "fixtures/catalog.json"),
            ("PRESSWORK_CATALOG_STRICT", "false"),
            ("PRESSWORK_MAX_LINE_QUANTITY", "5000"),
            ("PRESSWORK_SEARCH_LIMIT", "not-a-number"),
            ("PRESSWORK_DRAFT_PATH", "/tmp/draft.json"),
            ("PRESSWORK_LOG", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = QuoteConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.path, PathBuf::from("fixtures/catalog.json"));
        assert!(!config.catalog.strict);
        assert_eq!(config.limits.max_line_quantity, 5000);
        assert_eq!(config.limits.search_limit, 20);
        assert_eq!(config.draft_path(), PathBuf::from("/tmp/draft.json"));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = QuoteConfig::default();
        config.limits.max_line_quantity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = QuoteConfig::default();
        config.limits.search_limit = MAX_SEARCH_LIMIT + 1;
        assert!(config.validate().is_err());

        let mut config = QuoteConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("presswork-{}.toml", uuid::Uuid::new_v4()));
        let err = QuoteConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("presswork-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[limits]\nmax_line_quantity = 250\n").unwrap();

        let config = QuoteConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.limits.max_line_quantity, 250);

        std::fs::remove_file(&path).unwrap();
    }
}
