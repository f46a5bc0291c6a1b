//! # presswork-core: Pure Pricing Engine for Presswork
//!
//! This crate is the **heart** of Presswork. It turns a product definition
//! plus a customer's configuration into a priced, itemised quote, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Presswork Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Order builder (presswork-quote)                 │   │
//! │  │    search ──► configure ──► quote ──► add to draft order        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ presswork-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │   size   │ │ options  │ │  tiers   │ │     engine       │  │   │
//! │  │   │ resolver │ │ resolver │ │ selector │ │ area / tiered /  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ │ fixed / multi    │  │   │
//! │  │                                          └──────────────────┘  │   │
//! │  │                  dispatch::quote ──► PriceResult               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SESSION STATE • DETERMINISTIC                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              presswork-catalog (catalog files)                  │   │
//! │  │              JSON loading, validation, product lookup           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog, configuration and result types
//! - [`money`] - Money type with integer arithmetic
//! - [`size`] - Size resolver
//! - [`options`] - Option modifier resolver
//! - [`tiers`] - Tier / fixed-quantity / volume discount selection
//! - [`engine`] - The four pricing engines
//! - [`dispatch`] - `quote`, the single entry point
//! - [`summary`] - Specification string for order lines
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Example Usage
//!
//! ```rust
//! use presswork_core::{quote, Configuration, PricingStrategy, Product, SizeOption};
//! use presswork_core::types::AreaUnit;
//!
//! let banner = Product::new(
//!     "banner",
//!     "Vinyl Banner",
//!     PricingStrategy::Area {
//!         base_price_per_area_cents: 250,
//!         minimum_price_cents: 1000,
//!         area_unit: AreaUnit::SquareFeet,
//!         materials: vec![],
//!     },
//! )
//! .with_sizes(vec![SizeOption::new("24x36", "24 × 36").with_dimensions(24.0, 36.0)]);
//!
//! let result = quote(&banner, &Configuration::new(1).with_size("24x36")).unwrap();
//! assert_eq!(result.total_price().to_string(), "2160.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod money;
pub mod options;
pub mod size;
pub mod summary;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dispatch::quote;
pub use error::{ConfigurationError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use summary::describe;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Size id marking user-entered dimensions.
pub const CUSTOM_SIZE_ID: &str = "custom";

/// Minimum order quantity when a product does not declare one.
pub const DEFAULT_MIN_QUANTITY: i64 = 1;

/// Maximum lines in a single draft order.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity on a single order line.
///
/// ## Business Reason
/// Catches typos (100000 instead of 1000) before they reach production.
/// The quote CLI can lower it per deployment.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;
