//! # Validation Module
//!
//! Boundary validation for catalog entries and configurations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Tagged unions reject unknown engines / pricing modes               │
//! │  └── Missing required fields fail to parse                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog load (validate_product)                               │
//! │  ├── ids, names, multipliers, tier ranges                               │
//! │  └── overlapping tiers → warn only                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Before quoting (validate_configuration)                       │
//! │  ├── quantity bounds                                                    │
//! │  └── custom dimensions                                                  │
//! │                                                                         │
//! │  The engines assume all three layers ran.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use tracing::warn;

use crate::error::ValidationError;
use crate::types::{
    Configuration, OptionGroup, OptionPricing, PricingStrategy, PricingTier, Product, SizeOption,
};
use crate::CUSTOM_SIZE_ID;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog id (product, size, option item).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, numbers, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use presswork_core::validation::validate_id;
///
/// assert!(validate_id("product id", "banner-vinyl").is_ok());
/// assert!(validate_id("product id", "").is_err());
/// assert!(validate_id("product id", "has space").is_err());
/// ```
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (products, sizes, groups, items).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an ordered quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must be at least the product's `min_quantity`
/// - Must not exceed `max_quantity`
///
/// ## Example
/// ```rust
/// use presswork_core::validation::validate_quantity;
///
/// assert!(validate_quantity(100, 50, 10_000).is_ok());
/// assert!(validate_quantity(0, 1, 10_000).is_err());
/// assert!(validate_quantity(20, 50, 10_000).is_err());
/// ```
pub fn validate_quantity(qty: i64, min_quantity: i64, max_quantity: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    let min = min_quantity.max(1);
    if qty < min || qty > max_quantity {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min,
            max: max_quantity,
        });
    }

    Ok(())
}

/// Validates a price in the smallest currency unit.
///
/// Zero is allowed (free add-ons).
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a scalar multiplier (size, material, option factor).
pub fn validate_multiplier(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount in basis points (0% to 100%).
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount_bps".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates user-entered custom dimensions.
///
/// The engine prices bad dimensions as a zero area; at the boundary they
/// are rejected so the customer sees why.
pub fn validate_custom_dimensions(width: Option<f64>, height: Option<f64>) -> ValidationResult<()> {
    for (field, value) in [("custom_width", width), ("custom_height", height)] {
        match value {
            None => {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                })
            }
            Some(v) if !v.is_finite() || v <= 0.0 => {
                return Err(ValidationError::MustBePositive {
                    field: field.to_string(),
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates one catalog product.
///
/// Overlapping tier ranges are allowed (first by ascending `min_qty` wins)
/// and only logged.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id("product id", &product.id)?;
    validate_name("product name", &product.name)?;

    if product.min_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "min_quantity".to_string(),
        });
    }

    validate_sizes(&product.available_sizes)?;
    validate_option_groups(&product.option_groups)?;

    match &product.strategy {
        PricingStrategy::Area {
            base_price_per_area_cents,
            minimum_price_cents,
            materials,
            ..
        } => {
            validate_price_cents("base_price_per_area_cents", *base_price_per_area_cents)?;
            validate_price_cents("minimum_price_cents", *minimum_price_cents)?;
            let mut seen = HashSet::new();
            for material in materials {
                validate_id("material id", &material.id)?;
                if !seen.insert(material.id.as_str()) {
                    return Err(ValidationError::Duplicate {
                        field: "material id".to_string(),
                        value: material.id.clone(),
                    });
                }
                validate_multiplier("material multiplier", material.multiplier)?;
            }
        }

        PricingStrategy::TieredQuantity { tiers } => {
            for tier in tiers {
                validate_tier(tier, &product.available_sizes)?;
            }
            warn_overlapping_tiers(&product.id, tiers);
        }

        PricingStrategy::FixedQuantity {
            entries,
            unit_price_cents,
        } => {
            let mut seen = HashSet::new();
            for entry in entries {
                if entry.quantity <= 0 {
                    return Err(ValidationError::MustBePositive {
                        field: "fixed quantity".to_string(),
                    });
                }
                validate_price_cents("total_price_cents", entry.total_price_cents)?;
                validate_variant(entry.variant_id.as_deref(), &product.available_sizes)?;
                if !seen.insert((entry.quantity, entry.variant_id.as_deref())) {
                    return Err(ValidationError::Duplicate {
                        field: "fixed quantity".to_string(),
                        value: entry.quantity.to_string(),
                    });
                }
            }
            if let Some(cents) = unit_price_cents {
                validate_price_cents("unit_price_cents", *cents)?;
            }
        }

        PricingStrategy::MultiVariant {
            base_price_cents,
            volume_discounts,
        } => {
            validate_price_cents("base_price_cents", *base_price_cents)?;
            for tier in volume_discounts {
                if tier.min_qty < 0 {
                    return Err(ValidationError::MustNotBeNegative {
                        field: "volume discount min_qty".to_string(),
                    });
                }
                validate_discount_bps(tier.discount_bps)?;
            }
        }
    }

    Ok(())
}

fn validate_sizes(sizes: &[SizeOption]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for size in sizes {
        validate_id("size id", &size.id)?;
        validate_name("size name", &size.name)?;
        if !seen.insert(size.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "size id".to_string(),
                value: size.id.clone(),
            });
        }
        if !size.width.is_finite() || size.width < 0.0 || !size.height.is_finite() || size.height < 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: format!("size {}", size.id),
                reason: "dimensions must be finite and not negative".to_string(),
            });
        }
        validate_multiplier("size multiplier", size.multiplier)?;
        validate_price_cents("price_addon_cents", size.price_addon_cents)?;
        if let Some(cents) = size.base_price_override_cents {
            validate_price_cents("base_price_override_cents", cents)?;
        }
    }
    Ok(())
}

fn validate_option_groups(groups: &[OptionGroup]) -> ValidationResult<()> {
    let mut group_names = HashSet::new();
    for group in groups {
        validate_name("option group name", &group.name)?;
        if !group_names.insert(group.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "option group".to_string(),
                value: group.name.clone(),
            });
        }

        let mut item_ids = HashSet::new();
        for item in &group.items {
            validate_id("option item id", &item.id)?;
            validate_name("option item name", &item.name)?;
            if !item_ids.insert(item.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: format!("option item in {}", group.name),
                    value: item.id.clone(),
                });
            }
            match &item.pricing {
                OptionPricing::Additive { price_cents, .. } => {
                    validate_price_cents("option price_cents", *price_cents)?;
                }
                OptionPricing::Multiplicative { factor } => {
                    validate_multiplier("option factor", *factor)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_tier(tier: &PricingTier, sizes: &[SizeOption]) -> ValidationResult<()> {
    if tier.min_qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "tier min_qty".to_string(),
        });
    }
    if let Some(max) = tier.max_qty {
        if max < tier.min_qty {
            return Err(ValidationError::InvalidFormat {
                field: "tier".to_string(),
                reason: format!("max_qty {} is below min_qty {}", max, tier.min_qty),
            });
        }
    }
    validate_price_cents("tier unit_price_cents", tier.unit_price_cents)?;
    validate_variant(tier.variant_id.as_deref(), sizes)
}

/// A scoped rule must name a size the product offers.
fn validate_variant(variant_id: Option<&str>, sizes: &[SizeOption]) -> ValidationResult<()> {
    match variant_id {
        Some(id) if !id.is_empty() && !sizes.iter().any(|s| s.id == id) => {
            Err(ValidationError::InvalidFormat {
                field: "variant_id".to_string(),
                reason: format!("unknown size '{}'", id),
            })
        }
        _ => Ok(()),
    }
}

/// Logs overlapping ranges within each partition.
fn warn_overlapping_tiers(product_id: &str, tiers: &[PricingTier]) {
    for (i, a) in tiers.iter().enumerate() {
        for b in &tiers[i + 1..] {
            if a.variant_id != b.variant_id {
                continue;
            }
            let a_max = a.max_qty.unwrap_or(i64::MAX);
            let b_max = b.max_qty.unwrap_or(i64::MAX);
            if a.min_qty <= b_max && b.min_qty <= a_max {
                warn!(
                    product_id,
                    variant_id = ?a.variant_id,
                    first = a.min_qty,
                    second = b.min_qty,
                    "Overlapping pricing tiers; lowest min_qty wins"
                );
            }
        }
    }
}

// =============================================================================
// Configuration Validators
// =============================================================================

/// Validates a configuration before it is priced.
///
/// Multi-variant rows with a non-positive quantity are not errors (the
/// engine skips them); each positive row and the summed total must still
/// respect the bounds.
pub fn validate_configuration(
    product: &Product,
    config: &Configuration,
    max_quantity: i64,
) -> ValidationResult<()> {
    match &product.strategy {
        PricingStrategy::MultiVariant { .. } => {
            let mut total: i64 = 0;
            for row in config.variant_rows.iter().filter(|row| row.quantity > 0) {
                validate_quantity(row.quantity, 1, max_quantity)?;
                total = total
                    .checked_add(row.quantity)
                    .ok_or_else(|| ValidationError::OutOfRange {
                        field: "quantity".to_string(),
                        min: product.min_quantity.max(1),
                        max: max_quantity,
                    })?;
            }
            // zero total is a pricing error, reported by the engine
            if total > 0 {
                validate_quantity(total, product.min_quantity, max_quantity)?;
            }
        }
        _ => {
            validate_quantity(config.quantity, product.min_quantity, max_quantity)?;
            if config.size_id.as_deref() == Some(CUSTOM_SIZE_ID) {
                validate_custom_dimensions(config.custom_width, config.custom_height)?;
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
