//! # Tier / Fixed-Quantity Selector
//!
//! Picks the quantity rule that applies to a configuration.
//!
//! ## Size-Specific Override
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rules ──► partition by variant_id                                      │
//! │              │                                                          │
//! │              ├── specific (variant_id == size_id) non-empty?            │
//! │              │        YES → search ONLY these (never fall back)         │
//! │              │                                                          │
//! │              └── otherwise → search global (variant_id absent)          │
//! │                                                                         │
//! │  Tiered: first by ascending min_qty with min ≤ qty ≤ max                │
//! │  Fixed:  first with quantity == qty (no nearest match)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{DiscountRate, FixedQuantityOption, PricingTier, VolumeDiscountTier};

/// A rule that may be scoped to one catalog size.
pub trait QuantityRule {
    /// Size id this rule is bound to; `None` for global rules.
    fn variant_id(&self) -> Option<&str>;

    /// Ordering key used when scanning candidates.
    fn sort_key(&self) -> i64;
}

impl QuantityRule for PricingTier {
    fn variant_id(&self) -> Option<&str> {
        self.variant_id.as_deref().filter(|id| !id.is_empty())
    }

    fn sort_key(&self) -> i64 {
        self.min_qty
    }
}

impl QuantityRule for FixedQuantityOption {
    fn variant_id(&self) -> Option<&str> {
        self.variant_id.as_deref().filter(|id| !id.is_empty())
    }

    fn sort_key(&self) -> i64 {
        self.quantity
    }
}

/// Which partition a matched rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Bound to the selected size. Size knobs are already priced in.
    Specific,
    Global,
}

/// A matched rule and its partition.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a, R> {
    pub rule: &'a R,
    pub scope: RuleScope,
}

impl<R> RuleMatch<'_, R> {
    #[inline]
    pub fn is_global(&self) -> bool {
        self.scope == RuleScope::Global
    }
}

/// Returns the candidate partition, sorted stably by `sort_key`.
fn candidates<'a, R: QuantityRule>(rules: &'a [R], size_id: Option<&str>) -> (Vec<&'a R>, RuleScope) {
    let specific: Vec<&R> = match size_id {
        Some(id) => rules.iter().filter(|r| r.variant_id() == Some(id)).collect(),
        None => Vec::new(),
    };

    let (mut chosen, scope) = if specific.is_empty() {
        let global = rules.iter().filter(|r| r.variant_id().is_none()).collect();
        (global, RuleScope::Global)
    } else {
        (specific, RuleScope::Specific)
    };

    chosen.sort_by_key(|r| r.sort_key());
    (chosen, scope)
}

/// Selects the tier covering `quantity` for the given size.
///
/// ## Example
/// ```rust
/// use presswork_core::tiers::{select_tier, RuleScope};
/// use presswork_core::types::PricingTier;
///
/// let tiers = vec![
///     PricingTier::new(1, Some(99), 100),
///     PricingTier::new(100, Some(499), 80),
/// ];
/// let matched = select_tier(&tiers, 150, None).unwrap();
/// assert_eq!(matched.rule.unit_price_cents, 80);
/// assert_eq!(matched.scope, RuleScope::Global);
/// ```
pub fn select_tier<'a>(
    tiers: &'a [PricingTier],
    quantity: i64,
    size_id: Option<&str>,
) -> Option<RuleMatch<'a, PricingTier>> {
    let (candidates, scope) = candidates(tiers, size_id);
    candidates
        .into_iter()
        .find(|tier| tier.covers(quantity))
        .map(|rule| RuleMatch { rule, scope })
}

/// Selects the fixed-quantity entry for exactly `quantity`.
pub fn select_fixed_quantity<'a>(
    entries: &'a [FixedQuantityOption],
    quantity: i64,
    size_id: Option<&str>,
) -> Option<RuleMatch<'a, FixedQuantityOption>> {
    let (candidates, scope) = candidates(entries, size_id);
    candidates
        .into_iter()
        .find(|entry| entry.quantity == quantity)
        .map(|rule| RuleMatch { rule, scope })
}

/// Qualifying volume tier with the highest `min_qty`.
///
/// Ties go to the earliest tier in catalog order.
pub fn select_volume_discount(
    tiers: &[VolumeDiscountTier],
    total_quantity: i64,
) -> Option<&VolumeDiscountTier> {
    let mut best: Option<&VolumeDiscountTier> = None;
    for tier in tiers.iter().filter(|t| t.min_qty <= total_quantity) {
        if best.map_or(true, |b| tier.min_qty > b.min_qty) {
            best = Some(tier);
        }
    }
    best
}

/// Discount rate for a summed quantity; zero when no tier qualifies.
pub fn resolve_volume_discount(tiers: &[VolumeDiscountTier], total_quantity: i64) -> DiscountRate {
    select_volume_discount(tiers, total_quantity)
        .map(VolumeDiscountTier::discount)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_tiers() -> Vec<PricingTier> {
        vec![
            PricingTier::new(100, Some(499), 80),
            PricingTier::new(1, Some(99), 100),
            PricingTier::new(500, None, 60),
        ]
    }

    #[test]
    fn test_select_tier_ascending_min_qty() {
        let tiers = global_tiers();
        assert_eq!(select_tier(&tiers, 1, None).unwrap().rule.unit_price_cents, 100);
        assert_eq!(select_tier(&tiers, 150, None).unwrap().rule.unit_price_cents, 80);
        assert_eq!(select_tier(&tiers, 10_000, None).unwrap().rule.unit_price_cents, 60);
        assert!(select_tier(&tiers, 0, None).is_none());
    }

    #[test]
    fn test_overlapping_tiers_first_wins() {
        let tiers = vec![
            PricingTier::new(50, None, 70),
            PricingTier::new(1, Some(100), 90),
        ];
        // both cover 75; min_qty 1 sorts first
        assert_eq!(select_tier(&tiers, 75, None).unwrap().rule.unit_price_cents, 90);
    }

    #[test]
    fn test_specific_tiers_override_globals() {
        let mut tiers = global_tiers();
        tiers.push(PricingTier::new(1, Some(49), 150).for_size("large"));

        let matched = select_tier(&tiers, 10, Some("large")).unwrap();
        assert_eq!(matched.rule.unit_price_cents, 150);
        assert_eq!(matched.scope, RuleScope::Specific);

        // outside every specific range: no fallback to global
        assert!(select_tier(&tiers, 60, Some("large")).is_none());

        // other sizes still see the globals
        let matched = select_tier(&tiers, 60, Some("small")).unwrap();
        assert!(matched.is_global());
    }

    #[test]
    fn test_select_fixed_quantity_exact_only() {
        let entries = vec![
            FixedQuantityOption::new(100, 10_000),
            FixedQuantityOption::new(200, 18_000),
        ];
        let matched = select_fixed_quantity(&entries, 200, None).unwrap();
        assert_eq!(matched.rule.total_price_cents, 18_000);
        assert!(select_fixed_quantity(&entries, 150, None).is_none());
    }

    #[test]
    fn test_fixed_quantity_specific_partition() {
        let entries = vec![
            FixedQuantityOption::new(100, 10_000),
            FixedQuantityOption::new(250, 5_000).for_size("85x55"),
        ];
        assert!(select_fixed_quantity(&entries, 100, Some("85x55")).is_none());

        let matched = select_fixed_quantity(&entries, 250, Some("85x55")).unwrap();
        assert_eq!(matched.scope, RuleScope::Specific);
    }

    #[test]
    fn test_volume_discount_highest_qualifying() {
        let tiers = vec![
            VolumeDiscountTier::new(50, 1000),
            VolumeDiscountTier::new(100, 1500),
        ];
        assert_eq!(resolve_volume_discount(&tiers, 49).bps(), 0);
        assert_eq!(resolve_volume_discount(&tiers, 50).bps(), 1000);
        assert_eq!(resolve_volume_discount(&tiers, 100).bps(), 1500);
        assert_eq!(resolve_volume_discount(&tiers, 5000).bps(), 1500);
    }

    #[test]
    fn test_volume_discount_tie_goes_to_first() {
        let tiers = vec![
            VolumeDiscountTier::new(100, 1500),
            VolumeDiscountTier::new(100, 2000),
        ];
        assert_eq!(resolve_volume_discount(&tiers, 120).bps(), 1500);
    }
}
