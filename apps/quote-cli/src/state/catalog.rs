//! # Catalog State
//!
//! Wraps the loaded catalog together with the request limits from
//! [`QuoteConfig`](crate::config::QuoteConfig).
//!
//! The catalog is read-only after startup, so no mutex is needed.

use presswork_catalog::{Catalog, CatalogConfig, ProductRepository};
use presswork_core::{CoreError, CoreResult, Product};
use tracing::info;

use crate::config::QuoteConfig;
use crate::error::ApiError;

/// Catalog state shared by the product, quote and order commands.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,

    /// Upper bound for a single line's quantity
    pub max_line_quantity: i64,

    /// Search page size when none is requested
    pub search_limit: usize,
}

impl CatalogState {
    /// Loads the configured catalog.
    pub async fn load(config: &QuoteConfig) -> Result<Self, ApiError> {
        let catalog_config =
            CatalogConfig::new(config.catalog.path.clone()).strict(config.catalog.strict);
        let catalog = Catalog::load(catalog_config).await?;

        info!(
            source = %catalog.source().display(),
            products = catalog.products().count(),
            "Catalog state initialized"
        );
        Ok(Self::new(catalog, config))
    }

    pub fn new(catalog: Catalog, config: &QuoteConfig) -> Self {
        CatalogState {
            catalog,
            max_line_quantity: config.limits.max_line_quantity,
            search_limit: config.limits.search_limit,
        }
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        self.catalog.products()
    }

    /// Looks up a product that may be quoted.
    ///
    /// ## Returns
    /// * `Err(CoreError::ProductNotFound)` - no such id
    /// * `Err(CoreError::ProductInactive)` - product is retired
    pub fn quotable_product(&self, id: &str) -> CoreResult<Product> {
        let products = self.catalog.products();
        let product = products
            .get_by_id(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if !product.is_active {
            return Err(CoreError::ProductInactive(id.to_string()));
        }
        Ok(product.clone())
    }
}
