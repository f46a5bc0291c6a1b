//! # Tiered-Quantity Engine
//!
//! ```text
//! unit  = tier.unit_price × (global ? size.multiplier : 1)
//!       + (global ? size.price_addon : 0)
//!       + additive_unit
//! total = unit × quantity
//! ```
//!
//! Size-specific tiers already carry the size's pricing, so the size knobs
//! only apply to a global tier. Multiplicative and area-scoped options do
//! not contribute; they are listed as `info` lines.

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::options::ResolvedOptions;
use crate::size::ResolvedSize;
use crate::tiers::select_tier;
use crate::types::{BreakdownLine, EngineKind, PriceResult, PricingTier};

use super::{not_applied_line, total_line};

/// Everything the tiered engine reads.
#[derive(Debug, Clone)]
pub struct TieredInput<'a> {
    pub tiers: &'a [PricingTier],
    pub size: &'a ResolvedSize,
    pub options: &'a ResolvedOptions<'a>,
    pub quantity: i64,
}

/// Prices a tiered-quantity configuration.
///
/// # Errors
/// `NoMatchingTier` when no tier of the applicable partition covers the
/// quantity.
pub fn price_tiered(input: &TieredInput<'_>) -> Result<PriceResult, ConfigurationError> {
    let matched = select_tier(input.tiers, input.quantity, input.size.size_id()).ok_or_else(|| {
        ConfigurationError::NoMatchingTier {
            quantity: input.quantity,
            size_id: input.size.id.clone(),
        }
    })?;

    let tier_price = matched.rule.unit_price();
    let mut breakdown = vec![BreakdownLine::base(
        format!("Tier {}: {} per unit", tier_range(matched.rule), tier_price),
        tier_price,
    )];

    let mut unit = tier_price;
    if matched.is_global() {
        if input.size.multiplier != 1.0 {
            unit = tier_price.scale(input.size.multiplier);
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
    } else {
        breakdown.push(BreakdownLine::info(format!(
            "Size-specific tier for {}",
            input.size.name
        )));
    }

    let mut additions = Money::zero();
    for selection in input.options.iter() {
        if selection.is_multiplicative() || selection.is_area_scoped() {
            breakdown.push(not_applied_line(selection, "tiered"));
            continue;
        }
        additions += selection.cost.additive_unit;
        breakdown.push(BreakdownLine::add(
            selection.label(),
            selection.cost.additive_unit,
        ));
    }
    unit += additions;

    let total = unit.multiply_quantity(input.quantity);
    breakdown.push(total_line(unit, input.quantity, total));

    Ok(PriceResult::new(
        EngineKind::TieredQuantity,
        unit,
        total,
        input.quantity,
        breakdown,
    ))
}

fn tier_range(tier: &PricingTier) -> String {
    match tier.max_qty {
        Some(max) => format!("{}-{}", tier.min_qty, max),
        None => format!("{}+", tier.min_qty),
    }
}
