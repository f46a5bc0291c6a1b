//! # Product Commands
//!
//! Catalog search and retrieval.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  presswork-quote search banner --limit 5                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_search_query() ← trims, rejects > 100 chars                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::search() ← id, name, category; active only          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductSummary> printed as JSON                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use presswork_core::validation::validate_search_query;
use presswork_core::{EngineKind, Product};

use crate::config::MAX_SEARCH_LIMIT;
use crate::error::ApiError;
use crate::state::CatalogState;

/// Search result entry.
///
/// Leaves out pricing tables; `get_product` returns the full definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub engine: EngineKind,
    pub min_quantity: i64,
    /// Size ids the product offers
    pub sizes: Vec<String>,
    /// Option group names
    pub option_groups: Vec<String>,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        ProductSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            engine: p.engine(),
            min_quantity: p.min_quantity,
            sizes: p.available_sizes.iter().map(|s| s.id.clone()).collect(),
            option_groups: p.option_groups.iter().map(|g| g.name.clone()).collect(),
        }
    }
}

/// Searches active products.
///
/// ## Arguments
/// * `query` - Search term (matches id, name, category); empty lists all
/// * `limit` - Maximum results (default from config, capped at 100)
pub fn search_products(
    catalog: &CatalogState,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<ProductSummary>, ApiError> {
    let start = Instant::now();
    let query = validate_search_query(query)?;
    let limit = limit.unwrap_or(catalog.search_limit).min(MAX_SEARCH_LIMIT);

    debug!(query = %query, limit = limit, "search_products command");

    let products = catalog.products();
    let results: Vec<ProductSummary> = products
        .search(&query, limit)
        .into_iter()
        .map(ProductSummary::from)
        .collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = results.len(),
        query = %query,
        "search_products complete"
    );

    Ok(results)
}

/// Gets a full product definition by id, including inactive products.
pub fn get_product(catalog: &CatalogState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    catalog
        .products()
        .get_by_id(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::catalog_state;
    use crate::error::ErrorCode;

    #[test]
    fn test_search_products() {
        let catalog = catalog_state();

        let results = search_products(&catalog, "  BANNER ", None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "banner-13oz");
        assert_eq!(results[0].engine, EngineKind::Area);
        assert_eq!(results[0].sizes, vec!["24x36", "custom"]);

        // inactive products are hidden
        assert!(search_products(&catalog, "retired", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_limit_and_empty_query() {
        let catalog = catalog_state();
        assert_eq!(search_products(&catalog, "", None).unwrap().len(), 4);
        assert_eq!(search_products(&catalog, "", Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_search_rejects_long_query() {
        let catalog = catalog_state();
        let err = search_products(&catalog, &"x".repeat(101), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_product() {
        let catalog = catalog_state();
        assert_eq!(get_product(&catalog, "tee").unwrap().name, "Crew Tee");
        assert!(get_product(&catalog, "retired-sign").is_ok());

        let err = get_product(&catalog, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
