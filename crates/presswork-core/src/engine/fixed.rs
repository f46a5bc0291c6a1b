//! # Fixed-Quantity Engine
//!
//! Packages are sold at exact quantities ("250 business cards for 33.00").
//!
//! ```text
//! base  = package.total_price / package.quantity   (exact match)
//!       | product unit_price                        (fallback)
//! unit  = base × option factors                     (multiplicative first)
//!       × size.multiplier + size.price_addon        (global or fallback only)
//!       + additive_unit                             (additive last)
//! total = unit × quantity
//! ```
//!
//! `base` is rounded to the smallest unit before multiplying back out, so a
//! package whose total does not divide evenly bills `rounded unit × qty`.

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::options::ResolvedOptions;
use crate::size::ResolvedSize;
use crate::tiers::select_fixed_quantity;
use crate::types::{BreakdownLine, EngineKind, FixedQuantityOption, PriceResult};

use super::{not_applied_line, total_line};

/// Everything the fixed-quantity engine reads.
#[derive(Debug, Clone)]
pub struct FixedQuantityInput<'a> {
    pub entries: &'a [FixedQuantityOption],
    /// Fallback per-unit price when no package matches.
    pub unit_price: Option<Money>,
    pub size: &'a ResolvedSize,
    pub options: &'a ResolvedOptions<'a>,
    pub quantity: i64,
}

/// Prices a fixed-quantity configuration.
///
/// # Errors
/// `NoMatchingFixedQuantity` when no package matches the exact quantity
/// and the product has no fallback unit price.
pub fn price_fixed_quantity(
    input: &FixedQuantityInput<'_>,
) -> Result<PriceResult, ConfigurationError> {
    let mut breakdown = Vec::new();

    let matched = select_fixed_quantity(input.entries, input.quantity, input.size.size_id())
        .and_then(|m| m.rule.unit_price().map(|unit| (unit, m)));

    let (base, apply_size) = match (matched, input.unit_price) {
        (Some((unit, m)), _) => {
            breakdown.push(BreakdownLine::base(
                format!(
                    "Package of {}: {} ({} per unit)",
                    m.rule.quantity,
                    m.rule.total_price(),
                    unit
                ),
                unit,
            ));
            if !m.is_global() {
                breakdown.push(BreakdownLine::info(format!(
                    "Size-specific package for {}",
                    input.size.name
                )));
            }
            (unit, m.is_global())
        }
        (None, Some(fallback)) => {
            breakdown.push(BreakdownLine::base(
                format!("Unit price (no package of {})", input.quantity),
                fallback,
            ));
            (fallback, true)
        }
        (None, None) => {
            return Err(ConfigurationError::NoMatchingFixedQuantity {
                quantity: input.quantity,
                size_id: input.size.id.clone(),
            })
        }
    };

    let mut unit = base;
    for selection in input.options.iter().filter(|s| s.is_multiplicative()) {
        breakdown.push(BreakdownLine::multiply(
            selection.label(),
            selection.cost.multiplier,
        ));
    }
    if input.options.total.multiplier != 1.0 {
        unit = unit.scale(input.options.total.multiplier);
    }

    if apply_size {
        if input.size.multiplier != 1.0 {
            unit = unit.scale(input.size.multiplier);
            breakdown.push(BreakdownLine::multiply(
                format!("Size: {}", input.size.name),
                input.size.multiplier,
            ));
        }
        if !input.size.price_addon.is_zero() {
            unit += input.size.price_addon;
            breakdown.push(BreakdownLine::add(
                format!("Size add-on: {}", input.size.name),
                input.size.price_addon,
            ));
        }
    }

    for selection in input.options.iter().filter(|s| !s.is_multiplicative()) {
        if selection.is_area_scoped() {
            breakdown.push(not_applied_line(selection, "fixed-quantity"));
            continue;
        }
        unit += selection.cost.additive_unit;
        breakdown.push(BreakdownLine::add(
            selection.label(),
            selection.cost.additive_unit,
        ));
    }

    let total = unit.multiply_quantity(input.quantity);
    breakdown.push(total_line(unit, input.quantity, total));

    Ok(PriceResult::new(
        EngineKind::FixedQuantity,
        unit,
        total,
        input.quantity,
        breakdown,
    ))
}
