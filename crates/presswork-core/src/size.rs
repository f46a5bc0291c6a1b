//! # Size Resolver
//!
//! Turns a size selection into effective dimensions and size knobs.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selected size id                                                       │
//! │       │                                                                 │
//! │       ├── None / ""   → neutral size (0 × 0, ×1, +0)                     │
//! │       │                                                                 │
//! │       ├── "custom"    → width/height from user input (bad input → 0)    │
//! │       │                 knobs from catalog "custom" entry, if any       │
//! │       │                                                                 │
//! │       ├── known id    → catalog entry as-is                             │
//! │       │                                                                 │
//! │       └── unknown id  → ConfigurationError::UnknownSize                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::types::{Product, SizeOption, VariantRow};
use crate::CUSTOM_SIZE_ID;

/// Effective size after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSize {
    /// Catalog size id; `None` for the neutral size.
    pub id: Option<String>,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub multiplier: f64,
    pub price_addon: Money,
    pub base_price_override: Option<Money>,
}

impl ResolvedSize {
    /// Size used when the product has no size selection.
    pub fn neutral() -> Self {
        ResolvedSize {
            id: None,
            name: String::new(),
            width: 0.0,
            height: 0.0,
            multiplier: 1.0,
            price_addon: Money::zero(),
            base_price_override: None,
        }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Size override if present, else the product's per-area base.
    pub fn effective_base(&self, product_base: Money) -> Money {
        self.base_price_override.unwrap_or(product_base)
    }

    pub fn size_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl From<&SizeOption> for ResolvedSize {
    fn from(size: &SizeOption) -> Self {
        ResolvedSize {
            id: Some(size.id.clone()),
            name: size.name.clone(),
            width: size.width,
            height: size.height,
            multiplier: size.multiplier,
            price_addon: size.price_addon(),
            base_price_override: size.base_price_override(),
        }
    }
}

/// Resolves the configured size against the product's size catalog.
///
/// ## Example
/// ```rust
/// use presswork_core::size::resolve_size;
/// use presswork_core::types::{PricingStrategy, Product, SizeOption};
///
/// let product = Product::new(
///     "flyer",
///     "Flyer",
///     PricingStrategy::TieredQuantity { tiers: vec![] },
/// )
/// .with_sizes(vec![SizeOption::new("a5", "A5").with_multiplier(1.5)]);
///
/// let size = resolve_size(&product, Some("a5"), None, None).unwrap();
/// assert_eq!(size.multiplier, 1.5);
/// assert!(resolve_size(&product, Some("a3"), None, None).is_err());
/// ```
pub fn resolve_size(
    product: &Product,
    selected_size_id: Option<&str>,
    custom_width: Option<f64>,
    custom_height: Option<f64>,
) -> Result<ResolvedSize, ConfigurationError> {
    let size_id = match selected_size_id {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(ResolvedSize::neutral()),
    };

    if size_id == CUSTOM_SIZE_ID {
        let mut resolved = match product.find_size(CUSTOM_SIZE_ID) {
            Some(entry) => ResolvedSize::from(entry),
            None => ResolvedSize {
                id: Some(CUSTOM_SIZE_ID.to_string()),
                name: "Custom".to_string(),
                ..ResolvedSize::neutral()
            },
        };
        resolved.width = sanitize_dimension(custom_width);
        resolved.height = sanitize_dimension(custom_height);
        return Ok(resolved);
    }

    product
        .find_size(size_id)
        .map(ResolvedSize::from)
        .ok_or_else(|| ConfigurationError::UnknownSize {
            size_id: size_id.to_string(),
        })
}

/// Replaces each priced row's size with the product's catalog entry.
///
/// Apparel rows arrive with a full size record; only its id is trusted.
/// Rows with a non-positive quantity are never priced and pass through.
///
/// ## Example
/// ```rust
/// use presswork_core::size::resolve_variant_rows;
/// use presswork_core::types::{PricingStrategy, Product, SizeOption, VariantRow};
///
/// let tee = Product::new(
///     "tee",
///     "Tee",
///     PricingStrategy::MultiVariant { base_price_cents: 2000, volume_discounts: vec![] },
/// )
/// .with_sizes(vec![SizeOption::new("xl", "XL").with_addon_cents(200)]);
///
/// let rows = vec![VariantRow::new(SizeOption::new("xl", "XL").with_addon_cents(-1900), 3)];
/// let resolved = resolve_variant_rows(&tee, &rows).unwrap();
/// assert_eq!(resolved[0].size.price_addon_cents, 200);
///
/// let rows = vec![VariantRow::new(SizeOption::new("made-up", "?"), 3)];
/// assert!(resolve_variant_rows(&tee, &rows).is_err());
/// ```
pub fn resolve_variant_rows(
    product: &Product,
    rows: &[VariantRow],
) -> Result<Vec<VariantRow>, ConfigurationError> {
    rows.iter()
        .map(|row| {
            if row.quantity <= 0 {
                return Ok(row.clone());
            }
            let size = product
                .find_size(&row.size.id)
                .ok_or_else(|| ConfigurationError::UnknownSize {
                    size_id: row.size.id.clone(),
                })?;
            Ok(VariantRow {
                size: size.clone(),
                ..row.clone()
            })
        })
        .collect()
}

/// Renders a dimension or area, dropping the decimals when whole.
///
/// `864.0` reads as `864`, `12.5` as `12.50`.
pub fn format_dimension(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Missing, non-positive and non-finite dimensions price as zero.
fn sanitize_dimension(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
