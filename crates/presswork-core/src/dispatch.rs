//! # Engine Dispatcher
//!
//! Single entry point: `quote(product, configuration)`.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote(&Product, &Configuration)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  match product.strategy                                                 │
//! │       │                                                                 │
//! │       ├── Area ───────────┐                                             │
//! │       ├── TieredQuantity ─┼─► resolve_size + resolve_selections         │
//! │       ├── FixedQuantity ──┘        │                                    │
//! │       │                            ▼                                    │
//! │       │                      engine::price_* ──► PriceResult            │
//! │       │                                                                 │
//! │       └── MultiVariant ──► rows carry their own size/options            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure and synchronous: same inputs, same result. Re-pricing is the
//! caller's decision.

use tracing::{debug, instrument};

use crate::engine::{
    price_area, price_fixed_quantity, price_multi_variant, price_tiered, resolve_material,
    AreaInput, FixedQuantityInput, MultiVariantInput, TieredInput,
};
use crate::error::ConfigurationError;
use crate::money::Money;
use crate::options::{resolve_selections, ResolvedOptions};
use crate::size::{resolve_size, ResolvedSize};
use crate::types::{Configuration, PriceResult, PricingStrategy, Product};

/// Prices a configuration against its product.
///
/// ## Example
/// ```rust
/// use presswork_core::dispatch::quote;
/// use presswork_core::types::{Configuration, PricingStrategy, PricingTier, Product};
///
/// let flyer = Product::new(
///     "flyer",
///     "A5 Flyer",
///     PricingStrategy::TieredQuantity {
///         tiers: vec![
///             PricingTier::new(1, Some(99), 100),
///             PricingTier::new(100, Some(499), 80),
///         ],
///     },
/// );
///
/// let result = quote(&flyer, &Configuration::new(150)).unwrap();
/// assert_eq!(result.unit_price_cents, 80);
/// assert_eq!(result.total_price_cents, 12_000);
/// ```
#[instrument(skip_all, fields(product_id = %product.id, engine = %product.engine()))]
pub fn quote(product: &Product, config: &Configuration) -> Result<PriceResult, ConfigurationError> {
    match price(product, config) {
        Ok(result) => {
            debug!(
                quantity = result.quantity,
                unit_price = %result.unit_price(),
                total_price = %result.total_price(),
                "quoted"
            );
            Ok(result)
        }
        Err(e) => {
            debug!(error = %e, "configuration rejected");
            Err(e)
        }
    }
}

fn price(product: &Product, config: &Configuration) -> Result<PriceResult, ConfigurationError> {
    match &product.strategy {
        PricingStrategy::Area {
            base_price_per_area_cents,
            minimum_price_cents,
            area_unit,
            materials,
        } => {
            let size = configured_size(product, config)?;
            let options = configured_options(product, config)?;
            let material = resolve_material(materials, config.material_id.as_deref())?;
            Ok(price_area(&AreaInput {
                base_price_per_area: Money::from_cents(*base_price_per_area_cents),
                minimum_price: Money::from_cents(*minimum_price_cents),
                area_unit: *area_unit,
                material,
                size: &size,
                options: &options,
                quantity: config.quantity,
            }))
        }

        PricingStrategy::TieredQuantity { tiers } => {
            let size = configured_size(product, config)?;
            let options = configured_options(product, config)?;
            price_tiered(&TieredInput {
                tiers,
                size: &size,
                options: &options,
                quantity: config.quantity,
            })
        }

        PricingStrategy::FixedQuantity {
            entries,
            unit_price_cents,
        } => {
            let size = configured_size(product, config)?;
            let options = configured_options(product, config)?;
            price_fixed_quantity(&FixedQuantityInput {
                entries,
                unit_price: unit_price_cents.map(Money::from_cents),
                size: &size,
                options: &options,
                quantity: config.quantity,
            })
        }

        // rows carry their own size and option picks
        PricingStrategy::MultiVariant {
            base_price_cents,
            volume_discounts,
        } => price_multi_variant(&MultiVariantInput {
            base_price: Money::from_cents(*base_price_cents),
            volume_discounts,
            option_groups: &product.option_groups,
            rows: &config.variant_rows,
        }),
    }
}

fn configured_size(
    product: &Product,
    config: &Configuration,
) -> Result<ResolvedSize, ConfigurationError> {
    resolve_size(
        product,
        config.size_id.as_deref(),
        config.custom_width,
        config.custom_height,
    )
}

fn configured_options<'a>(
    product: &'a Product,
    config: &Configuration,
) -> Result<ResolvedOptions<'a>, ConfigurationError> {
    resolve_selections(
        &product.option_groups,
        &config.selected_options,
        &config.custom_quantities,
    )
}
