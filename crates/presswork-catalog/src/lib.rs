//! # presswork-catalog: Catalog Layer for Presswork
//!
//! Loads the product catalog from JSON and serves read-only lookups.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Presswork Data Flow                              │
//! │                                                                         │
//! │  Quote command (quote, search, order add)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                presswork-catalog (THIS CRATE)                   │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐                        │    │
//! │  │   │    Catalog    │    │  Repository   │                        │    │
//! │  │   │  (loader.rs)  │───►│ (product.rs)  │                        │    │
//! │  │   │               │    │               │                        │    │
//! │  │   │ tokio::fs     │    │ get_by_id     │                        │    │
//! │  │   │ serde_json    │    │ search        │                        │    │
//! │  │   │ validation    │    │ by_engine     │                        │    │
//! │  │   └───────────────┘    └───────────────┘                        │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog/products.json  (or a directory of *.json files)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`loader`] - Reading, parsing and validating catalog files
//! - [`error`] - Catalog error types
//! - [`repository`] - Product lookup and search
//!
//! ## Usage
//!
//! ```rust,ignore
//! use presswork_catalog::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::load(CatalogConfig::new("catalog/products.json")).await?;
//! let banners = catalog.products().search("banner", 20);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use loader::{Catalog, CatalogConfig};
pub use repository::product::ProductRepository;
