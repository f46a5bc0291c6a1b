//! # Catalog Error Types
//!
//! Error types for catalog loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds file path and product id             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (quote CLI) ← Serialized for the caller                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use presswork_core::ValidationError;
use thiserror::Error;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog path cannot be read.
    ///
    /// ## When This Occurs
    /// - Path does not exist
    /// - File permissions issue
    #[error("Cannot read catalog at {path}: {message}")]
    Io { path: String, message: String },

    /// Catalog file is not valid JSON or does not match the product schema.
    ///
    /// ## When This Occurs
    /// - Unknown `engine` or `pricing_mode` tag
    /// - Missing required field (e.g. an additive option without a price)
    #[error("Invalid catalog file {path}: {message}")]
    Parse { path: String, message: String },

    /// Product parsed but failed boundary validation.
    #[error("Invalid product {product_id}: {source}")]
    InvalidProduct {
        product_id: String,
        source: ValidationError,
    },

    /// Two catalog entries share an id.
    #[error("Duplicate product id: '{0}'")]
    DuplicateProduct(String),

    /// A catalog directory with no `*.json` files.
    #[error("No catalog files found in {0}")]
    Empty(String),
}

impl CatalogError {
    /// Creates an Io error for a given path.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Creates a Parse error for a given path.
    pub fn parse(path: &Path, err: serde_json::Error) -> Self {
        CatalogError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
