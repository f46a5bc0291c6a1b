//! # Error Types
//!
//! Domain-specific error types for presswork-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  presswork-core errors (this file)                                      │
//! │  ├── ConfigurationError - A configuration the catalog cannot price      │
//! │  ├── ValidationError    - Boundary checks on catalog and input          │
//! │  └── CoreError          - Wraps both for callers                        │
//! │                                                                         │
//! │  presswork-catalog errors (separate crate)                              │
//! │  └── CatalogError       - Catalog file loading failures                 │
//! │                                                                         │
//! │  quote CLI errors (in app)                                              │
//! │  └── ApiError           - What the caller sees (serialized)             │
//! │                                                                         │
//! │  Flow: ConfigurationError → CoreError → ApiError → JSON response        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Missing optional fields, zero prices and empty option groups price as
//! "no contribution". A zero custom area is a valid, degenerate size.

use thiserror::Error;

// =============================================================================
// Configuration Error
// =============================================================================

/// A configuration that cannot be priced against its product.
///
/// These are the only failures the engines themselves produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Selected size id is not in the product's size catalog.
    #[error("unknown size: {size_id}")]
    UnknownSize { size_id: String },

    /// No tier covers the quantity in the applicable partition.
    ///
    /// ## When This Occurs
    /// ```text
    /// Size "large" has its own tiers [1-49]
    ///      │
    ///      ▼
    /// quantity = 60, global tiers [1-∞] exist
    ///      │
    ///      ▼
    /// Global tiers are NOT consulted for "large"
    ///      │
    ///      ▼
    /// NoMatchingTier { quantity: 60, size_id: Some("large") }
    /// ```
    #[error("no matching tier for quantity {quantity} (size: {})", display_size(.size_id))]
    NoMatchingTier {
        quantity: i64,
        size_id: Option<String>,
    },

    /// Fixed-quantity product has no entry for the exact quantity and no
    /// fallback unit price.
    #[error("no matching fixed quantity for {quantity} (size: {})", display_size(.size_id))]
    NoMatchingFixedQuantity {
        quantity: i64,
        size_id: Option<String>,
    },

    /// Multi-variant configuration has no row with a positive quantity.
    #[error("zero total quantity")]
    ZeroTotalQuantity,

    /// Multi-variant row quantities do not fit a single total.
    #[error("total quantity overflows")]
    QuantityOverflow,

    /// Selection names an option group or item the product does not define.
    #[error("unknown option: {group} / {item}")]
    UnknownOption { group: String, item: String },

    /// Selected material is not offered by the area product.
    #[error("unknown material: {material_id}")]
    UnknownMaterial { material_id: String },
}

fn display_size(size_id: &Option<String>) -> &str {
    size_id.as_deref().unwrap_or("none")
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced to callers of the pricing core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is not offered for quoting.
    #[error("Product is inactive: {0}")]
    ProductInactive(String),

    /// Draft order has exceeded maximum allowed lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Draft order line not found.
    #[error("Order line not found: {0}")]
    LineNotFound(String),

    /// The configuration could not be priced.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Boundary validation errors.
///
/// Raised while loading catalog entries and before a configuration reaches
/// the engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format or inconsistent fields.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate size id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_messages() {
        let err = ConfigurationError::UnknownSize {
            size_id: "xxl".to_string(),
        };
        assert_eq!(err.to_string(), "unknown size: xxl");

        let err = ConfigurationError::NoMatchingTier {
            quantity: 60,
            size_id: Some("large".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "no matching tier for quantity 60 (size: large)"
        );

        let err = ConfigurationError::NoMatchingFixedQuantity {
            quantity: 150,
            size_id: None,
        };
        assert_eq!(
            err.to_string(),
            "no matching fixed quantity for 150 (size: none)"
        );

        assert_eq!(
            ConfigurationError::ZeroTotalQuantity.to_string(),
            "zero total quantity"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::Duplicate {
            field: "size id".to_string(),
            value: "a4".to_string(),
        };
        assert_eq!(err.to_string(), "size id 'a4' already exists");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = ConfigurationError::ZeroTotalQuantity.into();
        assert!(matches!(core_err, CoreError::Configuration(_)));
    }
}
