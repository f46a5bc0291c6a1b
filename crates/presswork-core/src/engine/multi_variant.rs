//! # Multi-Variant (Apparel) Engine
//!
//! One order, several size/option rows, one volume discount.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows: S × 60, XL × 40                                                  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  total_quantity = 100 ──► volume tier (highest min_qty ≤ 100) = 15%     │
//! │     │                                                                   │
//! │     ▼  per row                                                          │
//! │  row_unit  = base + base × (size.mult − 1) + size.addon                 │
//! │                   + base × (options.mult − 1) + additive_unit           │
//! │  row_final = row_unit − 15%                                             │
//! │  row_total = row_final × row.quantity                                   │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  grand_total = Σ row_total     unit_price = grand_total / 100           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount percent depends only on the summed quantity. The reported
//! unit price is the weighted average across rows.

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::options::resolve_selections;
use crate::tiers::select_volume_discount;
use crate::types::{
    BreakdownLine, DiscountRate, EngineKind, OptionGroup, PriceResult, VariantRow,
    VolumeDiscountTier,
};

use super::{not_applied_line, total_line};

/// Everything the multi-variant engine reads.
#[derive(Debug, Clone)]
pub struct MultiVariantInput<'a> {
    pub base_price: Money,
    pub volume_discounts: &'a [VolumeDiscountTier],
    pub option_groups: &'a [OptionGroup],
    pub rows: &'a [VariantRow],
}

/// Prices a multi-variant configuration.
///
/// Rows with a non-positive quantity are skipped.
///
/// # Errors
/// - `ZeroTotalQuantity` when no row has a positive quantity
/// - `QuantityOverflow` when the row quantities cannot be summed
/// - `UnknownOption` when a row selects an undefined option
pub fn price_multi_variant(
    input: &MultiVariantInput<'_>,
) -> Result<PriceResult, ConfigurationError> {
    let rows: Vec<&VariantRow> = input.rows.iter().filter(|r| r.quantity > 0).collect();
    let total_quantity = rows
        .iter()
        .try_fold(0i64, |total, r| total.checked_add(r.quantity))
        .ok_or(ConfigurationError::QuantityOverflow)?;
    if total_quantity == 0 {
        return Err(ConfigurationError::ZeroTotalQuantity);
    }

    let tier = select_volume_discount(input.volume_discounts, total_quantity);
    let rate = tier.map(VolumeDiscountTier::discount).unwrap_or_default();
    let base = input.base_price;

    let mut breakdown = vec![BreakdownLine::base("Base price per garment", base)];
    let mut grand_total = Money::zero();
    let mut discount_total = Money::zero();

    for row in rows {
        let options = resolve_selections(
            input.option_groups,
            &row.selected_options,
            &row.custom_quantities,
        )?;

        let mut row_unit = base
            + base.scale(row.size.multiplier - 1.0)
            + row.size.price_addon()
            + base.scale(options.total.multiplier - 1.0);

        let mut labels = Vec::new();
        for selection in options.iter() {
            if selection.is_area_scoped() {
                breakdown.push(not_applied_line(selection, "multi-variant"));
                continue;
            }
            row_unit += selection.cost.additive_unit;
            labels.push(selection.label());
        }

        let row_final = row_unit.apply_discount(rate);
        discount_total += (row_unit - row_final).multiply_quantity(row.quantity);
        grand_total += row_final.multiply_quantity(row.quantity);

        let name = if labels.is_empty() {
            row.size.name.clone()
        } else {
            format!("{} [{}]", row.size.name, labels.join(", "))
        };
        breakdown.push(BreakdownLine::add(
            format!("{} × {} @ {}", name, row.quantity, row_unit),
            row_unit.multiply_quantity(row.quantity),
        ));
    }

    if let Some(tier) = tier {
        breakdown.push(BreakdownLine::discount(
            discount_label(tier.discount(), tier.min_qty, total_quantity),
            discount_total,
        ));
    }

    let unit = grand_total
        .divide_rounded(total_quantity)
        .unwrap_or_default();
    breakdown.push(BreakdownLine::info(format!(
        "Average unit price: {} over {} pieces",
        unit, total_quantity
    )));
    breakdown.push(total_line(unit, total_quantity, grand_total));

    Ok(PriceResult::new(
        EngineKind::MultiVariant,
        unit,
        grand_total,
        total_quantity,
        breakdown,
    ))
}

fn discount_label(rate: DiscountRate, min_qty: i64, total_quantity: i64) -> String {
    format!(
        "Volume discount {}% ({} pieces, tier {}+)",
        rate.percentage(),
        total_quantity,
        min_qty
    )
}
