//! # Option Modifier Resolver
//!
//! Normalizes selected option items into cost contributions.
//!
//! ## Contribution Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OptionItem.pricing                                                     │
//! │                                                                         │
//! │  "x" Multiplicative { factor }      → multiplier   (on the base)        │
//! │  "+" Additive { scope: unit }       → additive_unit (per produced unit) │
//! │  "+" Additive { scope: area }       → additive_area (× resolved area)   │
//! │                                                                         │
//! │  has_custom_quantity: price × user quantity (missing → 0)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Additive contributions sum and multiplicative factors multiply, so the
//! combined cost does not depend on selection order.

use std::collections::BTreeMap;

use crate::error::ConfigurationError;
use crate::money::Money;
use crate::types::{OptionGroup, OptionItem, OptionPricing, PriceScope};

/// Normalized cost of one or more option items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionCost {
    pub additive_unit: Money,
    pub additive_area: Money,
    pub multiplier: f64,
}

impl OptionCost {
    /// No contribution.
    pub const fn none() -> Self {
        OptionCost {
            additive_unit: Money::zero(),
            additive_area: Money::zero(),
            multiplier: 1.0,
        }
    }

    /// Sums additive parts and multiplies factors.
    pub fn combine(self, other: OptionCost) -> OptionCost {
        OptionCost {
            additive_unit: self.additive_unit + other.additive_unit,
            additive_area: self.additive_area + other.additive_area,
            multiplier: self.multiplier * other.multiplier,
        }
    }
}

impl Default for OptionCost {
    fn default() -> Self {
        OptionCost::none()
    }
}

/// Resolves one item's contribution.
///
/// `custom_qty` is only read for items with `has_custom_quantity`; a
/// missing or negative quantity contributes nothing.
///
/// ## Example
/// ```rust
/// use presswork_core::options::resolve_option_cost;
/// use presswork_core::types::OptionItem;
///
/// let grommets = OptionItem::per_piece("grommets", "Grommets", 200);
/// let cost = resolve_option_cost(&grommets, Some(4));
/// assert_eq!(cost.additive_unit.cents(), 800);
/// ```
pub fn resolve_option_cost(item: &OptionItem, custom_qty: Option<i64>) -> OptionCost {
    match &item.pricing {
        OptionPricing::Multiplicative { factor } => OptionCost {
            multiplier: *factor,
            ..OptionCost::none()
        },
        OptionPricing::Additive {
            price_cents,
            scope,
            has_custom_quantity,
        } => {
            let qty = if *has_custom_quantity {
                custom_qty.unwrap_or(0).max(0)
            } else {
                1
            };
            let cost = Money::from_cents(*price_cents).multiply_quantity(qty);

            match scope {
                PriceScope::Unit => OptionCost {
                    additive_unit: cost,
                    ..OptionCost::none()
                },
                PriceScope::Area => OptionCost {
                    additive_area: cost,
                    ..OptionCost::none()
                },
            }
        }
    }
}

/// One resolved selection, kept for breakdown lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedOption<'a> {
    pub group: &'a str,
    pub item: &'a OptionItem,
    pub custom_qty: Option<i64>,
    pub cost: OptionCost,
}

impl SelectedOption<'_> {
    /// Label such as `"Finishing: Grommets (4)"`.
    pub fn label(&self) -> String {
        match self.custom_qty {
            Some(qty) if self.item.has_custom_quantity() => {
                format!("{}: {} ({})", self.group, self.item.name, qty)
            }
            _ => format!("{}: {}", self.group, self.item.name),
        }
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self.item.pricing, OptionPricing::Multiplicative { .. })
    }

    pub fn is_area_scoped(&self) -> bool {
        matches!(
            self.item.pricing,
            OptionPricing::Additive {
                scope: PriceScope::Area,
                ..
            }
        )
    }
}

/// All selections of a configuration, in catalog group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions<'a> {
    pub selections: Vec<SelectedOption<'a>>,
    pub total: OptionCost,
}

impl<'a> ResolvedOptions<'a> {
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedOption<'a>> {
        self.selections.iter()
    }
}

/// Resolves one item per selected group.
///
/// `selected` maps group name → item id, `custom_quantities` maps item id →
/// quantity. Unselected groups and empty item ids contribute nothing.
///
/// # Errors
/// `UnknownOption` when a selection names a group or item the product does
/// not define.
pub fn resolve_selections<'a>(
    groups: &'a [OptionGroup],
    selected: &BTreeMap<String, String>,
    custom_quantities: &BTreeMap<String, i64>,
) -> Result<ResolvedOptions<'a>, ConfigurationError> {
    for (group_name, item_id) in selected {
        if !item_id.is_empty() && !groups.iter().any(|g| &g.name == group_name) {
            return Err(ConfigurationError::UnknownOption {
                group: group_name.clone(),
                item: item_id.clone(),
            });
        }
    }

    let mut resolved = ResolvedOptions::default();

    for group in groups {
        let item_id = match selected.get(&group.name) {
            Some(id) if !id.is_empty() => id,
            _ => continue,
        };

        let item = group
            .find_item(item_id)
            .ok_or_else(|| ConfigurationError::UnknownOption {
                group: group.name.clone(),
                item: item_id.clone(),
            })?;

        let custom_qty = custom_quantities.get(&item.id).copied();
        let cost = resolve_option_cost(item, custom_qty);

        resolved.total = resolved.total.combine(cost);
        resolved.selections.push(SelectedOption {
            group: &group.name,
            item,
            custom_qty,
            cost,
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<OptionGroup> {
        vec![
            OptionGroup::new(
                "Finishing",
                vec![
                    OptionItem::additive("hem", "Hemmed edges", 150),
                    OptionItem::per_piece("grommets", "Grommets", 200),
                ],
            ),
            OptionGroup::new(
                "Coating",
                vec![
                    OptionItem::per_area("uv", "UV coat", 25),
                    OptionItem::multiplicative("gloss", "Gloss", 1.1),
                ],
            ),
            OptionGroup::new(
                "Turnaround",
                vec![OptionItem::multiplicative("rush", "Rush", 1.5)],
            ),
        ]
    }

    fn select(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(g, i)| (g.to_string(), i.to_string()))
            .collect()
    }

    #[test]
    fn test_multiplicative_cost() {
        let item = OptionItem::multiplicative("rush", "Rush", 1.5);
        let cost = resolve_option_cost(&item, None);
        assert_eq!(cost.multiplier, 1.5);
        assert!(cost.additive_unit.is_zero());
        assert!(cost.additive_area.is_zero());
    }

    #[test]
    fn test_additive_scopes() {
        let unit = resolve_option_cost(&OptionItem::additive("hem", "Hem", 150), None);
        assert_eq!(unit.additive_unit.cents(), 150);
        assert!(unit.additive_area.is_zero());

        let area = resolve_option_cost(&OptionItem::per_area("uv", "UV", 25), None);
        assert_eq!(area.additive_area.cents(), 25);
        assert!(area.additive_unit.is_zero());
    }

    #[test]
    fn test_missing_custom_quantity_contributes_nothing() {
        let item = OptionItem::per_piece("grommets", "Grommets", 200);
        assert!(resolve_option_cost(&item, None).additive_unit.is_zero());
        assert!(resolve_option_cost(&item, Some(-3)).additive_unit.is_zero());
    }

    #[test]
    fn test_custom_quantity_ignored_without_flag() {
        let item = OptionItem::additive("hem", "Hem", 150);
        assert_eq!(resolve_option_cost(&item, Some(10)).additive_unit.cents(), 150);
    }

    #[test]
    fn test_resolve_selections_combines_costs() {
        let groups = groups();
        let mut qty = BTreeMap::new();
        qty.insert("grommets".to_string(), 4);

        let resolved = resolve_selections(
            &groups,
            &select(&[("Finishing", "grommets"), ("Coating", "gloss"), ("Turnaround", "rush")]),
            &qty,
        )
        .unwrap();

        assert_eq!(resolved.selections.len(), 3);
        assert_eq!(resolved.total.additive_unit.cents(), 800);
        assert!((resolved.total.multiplier - 1.65).abs() < 1e-9);
        assert_eq!(resolved.selections[0].label(), "Finishing: Grommets (4)");
    }

    #[test]
    fn test_multiplicative_selections_commute() {
        let a = OptionCost {
            multiplier: 1.1,
            ..OptionCost::none()
        };
        let b = OptionCost {
            multiplier: 1.5,
            ..OptionCost::none()
        };
        assert_eq!(a.combine(b).multiplier, b.combine(a).multiplier);
    }

    #[test]
    fn test_empty_selection_means_none() {
        let groups = groups();
        let resolved =
            resolve_selections(&groups, &select(&[("Finishing", "")]), &BTreeMap::new()).unwrap();
        assert!(resolved.is_empty());
        assert_eq!(resolved.total, OptionCost::none());
    }

    #[test]
    fn test_unknown_group_or_item() {
        let groups = groups();

        let err = resolve_selections(&groups, &select(&[("Paint", "red")]), &BTreeMap::new())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownOption {
                group: "Paint".to_string(),
                item: "red".to_string()
            }
        );

        let err = resolve_selections(&groups, &select(&[("Finishing", "lace")]), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownOption { .. }));
    }
}
