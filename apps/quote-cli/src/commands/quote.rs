//! # Quote Command
//!
//! Prices one product configuration without touching the draft order.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest { product_id, configuration }                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogState::quotable_product()   ← NOT_FOUND / inactive              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_variant_rows()             ← apparel sizes from the catalog    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_configuration()           ← quantity bounds, custom size      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  presswork_core::quote()            ← engine dispatch                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteResponse { price, specification, ... }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use presswork_core::size::resolve_variant_rows;
use presswork_core::validation::validate_configuration;
use presswork_core::{describe, quote, Configuration, PriceResult, PricingStrategy, Product};

use crate::error::ApiError;
use crate::state::CatalogState;

/// Request body for `quote` and `order add`.
///
/// ```json
/// {
///   "product_id": "banner-13oz",
///   "configuration": { "size_id": "24x36", "quantity": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub product_id: String,

    #[serde(default)]
    pub configuration: Configuration,
}

/// A priced configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub product_id: String,
    pub product_name: String,
    pub specification: String,
    pub price: PriceResult,
}

/// A request priced against the catalog.
pub(crate) struct PricedRequest {
    pub product: Product,
    /// The request's configuration with apparel row sizes taken from the
    /// catalog
    pub configuration: Configuration,
    pub price: PriceResult,
}

/// Validates and prices a request.
///
/// Shared by [`quote_product`] and the draft order, which freezes the
/// returned result.
pub(crate) fn price_request(
    catalog: &CatalogState,
    request: QuoteRequest,
) -> Result<PricedRequest, ApiError> {
    let product = catalog.quotable_product(&request.product_id)?;

    let mut configuration = request.configuration;
    if matches!(product.strategy, PricingStrategy::MultiVariant { .. }) {
        configuration.variant_rows = resolve_variant_rows(&product, &configuration.variant_rows)?;
    }

    validate_configuration(&product, &configuration, catalog.max_line_quantity)?;
    let price = quote(&product, &configuration)?;
    Ok(PricedRequest {
        product,
        configuration,
        price,
    })
}

/// Prices a product configuration.
///
/// ## Returns
/// * `Ok(QuoteResponse)` - price, breakdown and specification string
/// * `Err(ApiError)` - unknown/inactive product, invalid request, or a
///   configuration the engine cannot price
pub fn quote_product(
    catalog: &CatalogState,
    request: QuoteRequest,
) -> Result<QuoteResponse, ApiError> {
    let start = Instant::now();
    debug!(product_id = %request.product_id, "quote_product command");

    let PricedRequest {
        product,
        configuration,
        price,
    } = price_request(catalog, request)?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        product_id = %product.id,
        total = %price.total_price(),
        "quote_product complete"
    );

    Ok(QuoteResponse {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        specification: describe(&product, &configuration),
        price,
    })
}
