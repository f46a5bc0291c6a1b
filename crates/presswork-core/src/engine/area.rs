//! # Area Engine
//!
//! Prices by width × height at a per-area rate, with a per-unit floor.
//!
//! ```text
//! raw_unit = base × material × options × area
//!          + additive_area × area
//!          + additive_unit
//! unit     = max(raw_unit, minimum_price)
//! total    = unit × quantity
//! ```
//!
//! Size multiplier and add-on do not apply here; the size-specific knob is
//! `base_price_override`.

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::options::ResolvedOptions;
use crate::size::{format_dimension, ResolvedSize};
use crate::types::{AreaUnit, BreakdownLine, EngineKind, MaterialOption, PriceResult};

use super::total_line;

/// Everything the area engine reads.
#[derive(Debug, Clone)]
pub struct AreaInput<'a> {
    pub base_price_per_area: Money,
    pub minimum_price: Money,
    pub area_unit: AreaUnit,
    pub material: Option<&'a MaterialOption>,
    pub size: &'a ResolvedSize,
    pub options: &'a ResolvedOptions<'a>,
    pub quantity: i64,
}

/// Looks up the selected legacy material. Empty or absent means none.
pub fn resolve_material<'a>(
    materials: &'a [MaterialOption],
    material_id: Option<&str>,
) -> Result<Option<&'a MaterialOption>, ConfigurationError> {
    match material_id {
        Some(id) if !id.is_empty() => materials
            .iter()
            .find(|m| m.id == id)
            .map(Some)
            .ok_or_else(|| ConfigurationError::UnknownMaterial {
                material_id: id.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Prices an area configuration.
pub fn price_area(input: &AreaInput<'_>) -> PriceResult {
    let unit_label = input.area_unit.label();
    let area = input.size.area();
    let base = input.size.effective_base(input.base_price_per_area);

    let mut breakdown = Vec::new();
    breakdown.push(BreakdownLine::base(
        format!("Base: {} {} × {}", format_dimension(area), unit_label, base),
        base.scale(area),
    ));

    let material_multiplier = input.material.map_or(1.0, |m| m.multiplier);
    if let Some(material) = input.material {
        breakdown.push(BreakdownLine::multiply(
            format!("Material: {}", material.name),
            material.multiplier,
        ));
    }

    let mut additions = Money::zero();
    for selection in input.options.iter() {
        if selection.is_multiplicative() {
            breakdown.push(BreakdownLine::multiply(
                selection.label(),
                selection.cost.multiplier,
            ));
        } else if selection.is_area_scoped() {
            let amount = selection.cost.additive_area.scale(area);
            additions += amount;
            breakdown.push(BreakdownLine::add(
                format!(
                    "{} ({} {} × {})",
                    selection.label(),
                    format_dimension(area),
                    unit_label,
                    selection.cost.additive_area
                ),
                amount,
            ));
        } else {
            additions += selection.cost.additive_unit;
            breakdown.push(BreakdownLine::add(
                selection.label(),
                selection.cost.additive_unit,
            ));
        }
    }

    let factor = material_multiplier * input.options.total.multiplier * area;
    let raw_unit = base.scale(factor) + additions;

    let unit = if raw_unit < input.minimum_price {
        breakdown.push(BreakdownLine::info(format!(
            "Minimum price {} applied (calculated {})",
            input.minimum_price, raw_unit
        )));
        input.minimum_price
    } else {
        raw_unit
    };

    let total = unit.multiply_quantity(input.quantity);
    breakdown.push(total_line(unit, input.quantity, total));

    PriceResult::new(EngineKind::Area, unit, total, input.quantity, breakdown)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::options::resolve_selections;
    use crate::types::{BreakdownKind, OptionGroup, OptionItem};

    fn size(width: f64, height: f64) -> ResolvedSize {
        ResolvedSize {
            id: Some("s".to_string()),
            name: "Size".to_string(),
            width,
            height,
            ..ResolvedSize::neutral()
        }
    }

    fn input<'a>(
        size: &'a ResolvedSize,
        options: &'a ResolvedOptions<'a>,
        base: i64,
        minimum: i64,
        quantity: i64,
    ) -> AreaInput<'a> {
        AreaInput {
            base_price_per_area: Money::from_cents(base),
            minimum_price: Money::from_cents(minimum),
            area_unit: AreaUnit::SquareFeet,
            material: None,
            size,
            options,
            quantity,
        }
    }

    #[test]
    fn test_large_banner_above_minimum() {
        let size = size(24.0, 36.0);
        let options = ResolvedOptions::default();
        let result = price_area(&input(&size, &options, 250, 1000, 1));

        assert_eq!(result.unit_price_cents, 216_000);
        assert_eq!(result.total_price_cents, 216_000);
        assert_eq!(result.lines_of(BreakdownKind::Info).count(), 1);
    }

    #[test]
    fn test_small_banner_clamped_to_minimum() {
        let size = size(2.0, 3.0);
        let options = ResolvedOptions::default();
        let result = price_area(&input(&size, &options, 100, 1000, 5));

        assert_eq!(result.unit_price_cents, 1000);
        assert_eq!(result.total_price_cents, 5000);
        assert!(result
            .lines_of(BreakdownKind::Info)
            .any(|line| line.label().starts_with("Minimum price 10.00")));
    }

    #[test]
    fn test_zero_area_prices_at_minimum() {
        let size = size(0.0, 0.0);
        let options = ResolvedOptions::default();
        let result = price_area(&input(&size, &options, 250, 1000, 2));
        assert_eq!(result.unit_price_cents, 1000);
        assert_eq!(result.total_price_cents, 2000);
    }

    #[test]
    fn test_base_override_and_material() {
        let mut size = size(10.0, 10.0);
        size.base_price_override = Some(Money::from_cents(200));
        let options = ResolvedOptions::default();
        let matte = MaterialOption::new("matte", "Matte", 1.5);

        let mut area_input = input(&size, &options, 250, 0, 1);
        area_input.material = Some(&matte);
        let result = price_area(&area_input);

        // 200 × 1.5 × 100
        assert_eq!(result.unit_price_cents, 30_000);
        assert_eq!(result.lines_of(BreakdownKind::Multiply).count(), 1);
    }

    #[test]
    fn test_size_multiplier_and_addon_ignored() {
        let mut size = size(4.0, 5.0);
        size.multiplier = 3.0;
        size.price_addon = Money::from_cents(999);
        let options = ResolvedOptions::default();
        let result = price_area(&input(&size, &options, 100, 0, 1));
        assert_eq!(result.unit_price_cents, 2000);
    }

    #[test]
    fn test_options_by_scope() {
        let size = size(4.0, 5.0);
        let groups = vec![
            OptionGroup::new("Coating", vec![OptionItem::per_area("uv", "UV coat", 25)]),
            OptionGroup::new("Edges", vec![OptionItem::additive("hem", "Hem", 150)]),
            OptionGroup::new("Finish", vec![OptionItem::multiplicative("gloss", "Gloss", 1.1)]),
        ];
        let selected: BTreeMap<String, String> = [("Coating", "uv"), ("Edges", "hem"), ("Finish", "gloss")]
            .iter()
            .map(|(g, i)| (g.to_string(), i.to_string()))
            .collect();
        let options = resolve_selections(&groups, &selected, &BTreeMap::new()).unwrap();

        // 100 × 1.1 × 20 + 25 × 20 + 150
        let result = price_area(&input(&size, &options, 100, 0, 1));
        assert_eq!(result.unit_price_cents, 2850);
        assert_eq!(result.lines_of(BreakdownKind::Add).count(), 2);
        assert_eq!(result.lines_of(BreakdownKind::Multiply).count(), 1);
    }

    #[test]
    fn test_resolve_material() {
        let materials = vec![MaterialOption::new("matte", "Matte", 1.2)];
        assert_eq!(resolve_material(&materials, None).unwrap(), None);
        assert_eq!(resolve_material(&materials, Some("")).unwrap(), None);
        assert_eq!(
            resolve_material(&materials, Some("matte")).unwrap().map(|m| m.multiplier),
            Some(1.2)
        );
        assert_eq!(
            resolve_material(&materials, Some("satin")).unwrap_err(),
            ConfigurationError::UnknownMaterial {
                material_id: "satin".to_string()
            }
        );
    }
}
