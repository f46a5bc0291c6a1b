//! # Commands Module
//!
//! Every operation the CLI exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── search_products, get_product
//! ├── quote.rs    ◄─── quote_product
//! └── order.rs    ◄─── add_to_order, remove_from_order, get_order, clear_order
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  echo '{"product_id": "flyer-a5", ...}' | presswork-quote quote         │
//! │         │                                                               │
//! │         │ (request JSON from stdin or file)                             │
//! │         ▼                                                               │
//! │  fn quote_product(                                                      │
//! │      catalog: &CatalogState,  ◄── Built once at startup                 │
//! │      request: QuoteRequest,   ◄── Parsed request body                   │
//! │  ) -> Result<QuoteResponse, ApiError>                                   │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: QuoteResponse or ApiError                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command borrows only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &CatalogState, ...)
//!
//! // Only needs the draft
//! fn get_order(order: &OrderDraftState)
//!
//! // Needs both
//! fn add_to_order(catalog: &CatalogState, order: &OrderDraftState, ...)
//! ```

pub mod order;
pub mod product;
pub mod quote;

#[cfg(test)]
pub(crate) mod test_support {
    use presswork_catalog::Catalog;
    use presswork_core::{
        FixedQuantityOption, OptionGroup, OptionItem, PricingStrategy, PricingTier, Product,
        SizeOption, VolumeDiscountTier,
    };

    use crate::config::QuoteConfig;
    use crate::state::CatalogState;

    fn banner() -> Product {
        let mut product = Product::new(
            "banner-13oz",
            "13oz Vinyl Banner",
            PricingStrategy::Area {
                base_price_per_area_cents: 250,
                minimum_price_cents: 1000,
                area_unit: Default::default(),
                materials: vec![],
            },
        )
        .with_sizes(vec![
            SizeOption::new("24x36", "24 × 36").with_dimensions(24.0, 36.0),
            SizeOption::new("custom", "Custom"),
        ])
        .with_option_groups(vec![OptionGroup::new(
            "Finishing",
            vec![OptionItem::per_piece("grommets", "Grommets", 50)],
        )]);
        product.category = Some("banners".to_string());
        product
    }

    fn flyer() -> Product {
        let mut product = Product::new(
            "flyer-a5",
            "A5 Flyer",
            PricingStrategy::TieredQuantity {
                tiers: vec![
                    PricingTier::new(1, Some(99), 100),
                    PricingTier::new(100, Some(499), 80),
                ],
            },
        );
        product.category = Some("flyers".to_string());
        product.min_quantity = 25;
        product
    }

    fn cards() -> Product {
        Product::new(
            "cards",
            "Business Cards",
            PricingStrategy::FixedQuantity {
                entries: vec![
                    FixedQuantityOption::new(100, 10000),
                    FixedQuantityOption::new(200, 18000),
                ],
                unit_price_cents: None,
            },
        )
    }

    fn tee() -> Product {
        let mut product = Product::new(
            "tee",
            "Crew Tee",
            PricingStrategy::MultiVariant {
                base_price_cents: 2000,
                volume_discounts: vec![
                    VolumeDiscountTier::new(50, 1000),
                    VolumeDiscountTier::new(100, 1500),
                ],
            },
        )
        .with_sizes(vec![
            SizeOption::new("S", "S"),
            SizeOption::new("M", "M"),
            SizeOption::new("XL", "XL").with_multiplier(1.2),
        ]);
        product.category = Some("apparel".to_string());
        product
    }

    fn retired() -> Product {
        let mut product = Product::new(
            "retired-sign",
            "Retired Sign",
            PricingStrategy::TieredQuantity {
                tiers: vec![PricingTier::new(1, None, 500)],
            },
        );
        product.is_active = false;
        product
    }

    /// Small in-memory catalog covering every engine.
    pub fn catalog_state() -> CatalogState {
        let catalog = Catalog::from_products(
            vec![banner(), flyer(), cards(), tee(), retired()],
            "memory",
        );
        CatalogState::new(catalog, &QuoteConfig::default())
    }
}
