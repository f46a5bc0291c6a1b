//! # Specification String
//!
//! Human-readable summary of a configuration, frozen into order lines.
//!
//! ```text
//! Vinyl Banner — 24 × 36 sq ft — Material: Matte — Finishing: Grommets (4) — Qty 5
//! Crew Tee — S × 60, M × 40 — Qty 100
//! ```
//!
//! Never fails: anything the catalog does not know is rendered by its id.

use crate::size::format_dimension;
use crate::types::{Configuration, PricingStrategy, Product, VariantRow};
use crate::CUSTOM_SIZE_ID;

const SEPARATOR: &str = " — ";

/// Renders the specification line for a configured product.
///
/// ## Example
/// ```rust
/// use presswork_core::summary::describe;
/// use presswork_core::types::{Configuration, PricingStrategy, PricingTier, Product, SizeOption};
///
/// let flyer = Product::new(
///     "flyer",
///     "Flyer",
///     PricingStrategy::TieredQuantity { tiers: vec![PricingTier::new(1, None, 100)] },
/// )
/// .with_sizes(vec![SizeOption::new("a5", "A5")]);
///
/// let config = Configuration::new(250).with_size("a5");
/// assert_eq!(describe(&flyer, &config), "Flyer — A5 — Qty 250");
/// ```
pub fn describe(product: &Product, config: &Configuration) -> String {
    let mut parts = vec![product.name.clone()];

    match &product.strategy {
        PricingStrategy::MultiVariant { .. } => {
            let rows: Vec<&VariantRow> = config
                .variant_rows
                .iter()
                .filter(|row| row.quantity > 0)
                .collect();
            if !rows.is_empty() {
                parts.push(
                    rows.iter()
                        .map(|row| describe_row(product, row))
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
            let total: i64 = rows.iter().map(|row| row.quantity).sum();
            parts.push(format!("Qty {}", total));
            return parts.join(SEPARATOR);
        }
        PricingStrategy::Area {
            area_unit,
            materials,
            ..
        } => {
            if let Some(size) = describe_area_size(product, config, area_unit.label()) {
                parts.push(size);
            }
            if let Some(material_id) = config.material_id.as_deref().filter(|id| !id.is_empty()) {
                let name = materials
                    .iter()
                    .find(|m| m.id == material_id)
                    .map_or(material_id, |m| m.name.as_str());
                parts.push(format!("Material: {}", name));
            }
        }
        PricingStrategy::TieredQuantity { .. } | PricingStrategy::FixedQuantity { .. } => {
            if let Some(size_id) = config.size_id.as_deref().filter(|id| !id.is_empty()) {
                parts.push(size_name(product, size_id).to_string());
            }
        }
    }

    parts.extend(describe_options(
        product,
        config.selected_options.iter(),
        &config.custom_quantities,
    ));
    parts.push(format!("Qty {}", config.quantity));
    parts.join(SEPARATOR)
}

fn size_name<'a>(product: &'a Product, size_id: &'a str) -> &'a str {
    product
        .find_size(size_id)
        .map_or(size_id, |size| size.name.as_str())
}

fn describe_area_size(product: &Product, config: &Configuration, unit: &str) -> Option<String> {
    let size_id = config.size_id.as_deref().filter(|id| !id.is_empty())?;

    let (width, height) = if size_id == CUSTOM_SIZE_ID {
        (
            config.custom_width.unwrap_or(0.0),
            config.custom_height.unwrap_or(0.0),
        )
    } else {
        match product.find_size(size_id) {
            Some(size) => (size.width, size.height),
            None => return Some(size_id.to_string()),
        }
    };

    Some(format!(
        "{} × {} {}",
        format_dimension(width),
        format_dimension(height),
        unit
    ))
}

/// `"Group: Item"` per selection, `"Group: Item (n)"` for counted items.
fn describe_options<'a>(
    product: &Product,
    selections: impl Iterator<Item = (&'a String, &'a String)>,
    custom_quantities: &std::collections::BTreeMap<String, i64>,
) -> Vec<String> {
    selections
        .filter(|(_, item_id)| !item_id.is_empty())
        .map(|(group_name, item_id)| {
            let item = product
                .find_option_group(group_name)
                .and_then(|group| group.find_item(item_id));
            match item {
                Some(item) if item.has_custom_quantity() => format!(
                    "{}: {} ({})",
                    group_name,
                    item.name,
                    custom_quantities.get(&item.id).copied().unwrap_or(0)
                ),
                Some(item) => format!("{}: {}", group_name, item.name),
                None => format!("{}: {}", group_name, item_id),
            }
        })
        .collect()
}

fn describe_row(product: &Product, row: &VariantRow) -> String {
    let options = describe_options(
        product,
        row.selected_options.iter(),
        &row.custom_quantities,
    );
    if options.is_empty() {
        format!("{} × {}", row.size.name, row.quantity)
    } else {
        format!("{} ({}) × {}", row.size.name, options.join(", "), row.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AreaUnit, MaterialOption, OptionGroup, OptionItem, SizeOption};

    fn banner() -> Product {
        Product::new(
            "banner",
            "Vinyl Banner",
            PricingStrategy::Area {
                base_price_per_area_cents: 250,
                minimum_price_cents: 1000,
                area_unit: AreaUnit::SquareFeet,
                materials: vec![MaterialOption::new("matte", "Matte", 1.1)],
            },
        )
        .with_sizes(vec![
            SizeOption::new("24x36", "24 × 36").with_dimensions(24.0, 36.0)
        ])
        .with_option_groups(vec![OptionGroup::new(
            "Finishing",
            vec![OptionItem::per_piece("grommets", "Grommets", 200)],
        )])
    }

    #[test]
    fn test_describe_area_product() {
        let config = Configuration::new(5)
            .with_size("24x36")
            .with_material("matte")
            .with_option("Finishing", "grommets")
            .with_custom_quantity("grommets", 4);

        assert_eq!(
            describe(&banner(), &config),
            "Vinyl Banner — 24 × 36 sq ft — Material: Matte — Finishing: Grommets (4) — Qty 5"
        );
    }

    #[test]
    fn test_describe_custom_dimensions() {
        let config = Configuration::new(1).with_custom_dimensions(2.5, 4.0);
        assert_eq!(
            describe(&banner(), &config),
            "Vinyl Banner — 2.50 × 4 sq ft — Qty 1"
        );
    }

    #[test]
    fn test_describe_multi_variant_rows() {
        let tee = Product::new(
            "tee",
            "Crew Tee",
            PricingStrategy::MultiVariant {
                base_price_cents: 2000,
                volume_discounts: vec![],
            },
        );
        let config = Configuration::default().with_rows(vec![
            VariantRow::new(SizeOption::new("s", "S"), 60),
            VariantRow::new(SizeOption::new("m", "M"), 40),
            VariantRow::new(SizeOption::new("l", "L"), 0),
        ]);

        assert_eq!(describe(&tee, &config), "Crew Tee — S × 60, M × 40 — Qty 100");
    }

    #[test]
    fn test_describe_unknown_ids_fall_back() {
        let config = Configuration::new(2).with_size("10x10").with_option("Paint", "red");
        assert_eq!(
            describe(&banner(), &config),
            "Vinyl Banner — 10x10 — Paint: red — Qty 2"
        );
    }
}
