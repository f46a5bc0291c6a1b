//! # API Error Type
//!
//! Unified error type for quote commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in presswork-quote                        │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── CatalogError        (bad catalog file)     ─┐               │
//! │         ├── ValidationError     (request out of range) ─┤               │
//! │         ├── ConfigurationError  (cannot be priced)     ─┼─► ApiError    │
//! │         ├── CoreError           (not found, too large) ─┤               │
//! │         ├── ConfigError         (quote.toml)           ─┤               │
//! │         └── clap::Error         (command line)         ─┘               │
//! │                                                                         │
//! │  stdout: { "code": "NO_MATCHING_PRICE", "message": "..." }              │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use presswork_catalog::CatalogError;
use presswork_core::{ConfigurationError, CoreError, ValidationError};

use crate::config::ConfigError;

/// Error returned from quote commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: banner-13oz"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or order line not found
    NotFound,

    /// Request failed boundary validation
    ValidationError,

    /// Selection names a size, option or material the product lacks
    InvalidSelection,

    /// No tier or package covers the quantity
    NoMatchingPrice,

    /// Catalog could not be loaded
    CatalogError,

    /// Draft order operation failed
    OrderError,

    /// Malformed command line or request body
    BadRequest,

    /// CLI configuration is invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts pricing configuration errors to API errors.
impl From<ConfigurationError> for ApiError {
    fn from(err: ConfigurationError) -> Self {
        let code = match err {
            ConfigurationError::NoMatchingTier { .. }
            | ConfigurationError::NoMatchingFixedQuantity { .. }
            | ConfigurationError::ZeroTotalQuantity => ErrorCode::NoMatchingPrice,
            ConfigurationError::QuantityOverflow => ErrorCode::ValidationError,
            ConfigurationError::UnknownSize { .. }
            | ConfigurationError::UnknownOption { .. }
            | ConfigurationError::UnknownMaterial { .. } => ErrorCode::InvalidSelection,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::ProductInactive(id) => ApiError::new(
                ErrorCode::ValidationError,
                format!("Product is not available for quoting: {}", id),
            ),
            CoreError::OrderTooLarge { max } => ApiError::new(
                ErrorCode::OrderError,
                format!("Order cannot have more than {} lines", max),
            ),
            CoreError::LineNotFound(id) => ApiError::not_found("Order line", &id),
            CoreError::Configuration(e) => e.into(),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        tracing::error!("Catalog load failed: {}", err);
        ApiError::new(ErrorCode::CatalogError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts argument parsing failures to API errors.
impl From<clap::Error> for ApiError {
    fn from(err: clap::Error) -> Self {
        ApiError::bad_request(err.to_string().trim_end().to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid request JSON: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_codes() {
        let err: ApiError = ConfigurationError::ZeroTotalQuantity.into();
        assert_eq!(err.code, ErrorCode::NoMatchingPrice);

        let err: ApiError = ConfigurationError::UnknownSize {
            size_id: "A0".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
        assert_eq!(err.message, "unknown size: A0");
    }

    #[test]
    fn test_core_error_unwraps_nested() {
        let err: ApiError = CoreError::from(ConfigurationError::NoMatchingTier {
            quantity: 5,
            size_id: None,
        })
        .into();
        assert_eq!(err.code, ErrorCode::NoMatchingPrice);

        let err: ApiError = CoreError::LineNotFound("abc".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order line not found: abc");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "tee");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: tee");
    }
}
