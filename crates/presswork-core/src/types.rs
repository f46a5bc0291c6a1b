//! # Domain Types
//!
//! Catalog, configuration and result types used by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  Configuration  │   │  PriceResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sizes          │   │  size_id        │   │  unit_price     │       │
//! │  │  option_groups  │   │  quantity       │   │  total_price    │       │
//! │  │  strategy ──┐   │   │  options        │   │  breakdown[]    │       │
//! │  └─────────────┼───┘   │  variant_rows   │   └─────────────────┘       │
//! │                ▼       └─────────────────┘                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ PricingStrategy (exactly one per product)                      │   │
//! │  │   Area │ TieredQuantity │ FixedQuantity │ MultiVariant         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money Fields
//! Catalog and result structs store raw `*_cents` integers (what the JSON
//! carries) and expose `Money` accessors for arithmetic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{CUSTOM_SIZE_ID, DEFAULT_MIN_QUANTITY};

fn default_multiplier() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_min_quantity() -> i64 {
    DEFAULT_MIN_QUANTITY
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1500 bps = 15%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Engine Kind
// =============================================================================

/// The four mutually exclusive pricing engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Width × height × per-area rate.
    Area,
    /// Per-unit rate picked from quantity-range tiers.
    TieredQuantity,
    /// Exact quantity match against a price table.
    FixedQuantity,
    /// Apparel rows aggregated under one volume discount.
    MultiVariant,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Area => write!(f, "area"),
            EngineKind::TieredQuantity => write!(f, "tiered_quantity"),
            EngineKind::FixedQuantity => write!(f, "fixed_quantity"),
            EngineKind::MultiVariant => write!(f, "multi_variant"),
        }
    }
}

// =============================================================================
// Area Unit
// =============================================================================

/// Unit shared by a product's dimensions and its per-area base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    SquareFeet,
    SquareInches,
    SquareMeters,
    SquareCentimeters,
}

impl AreaUnit {
    /// Short label used in breakdown lines.
    pub fn label(&self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "sq ft",
            AreaUnit::SquareInches => "sq in",
            AreaUnit::SquareMeters => "sq m",
            AreaUnit::SquareCentimeters => "sq cm",
        }
    }
}

// =============================================================================
// Sizes
// =============================================================================

/// One entry in a product's size catalog.
///
/// `width`/`height` are zero for products that are not priced by area.
/// The id `"custom"` marks the user-entered dimensions entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeOption {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,

    /// Scales the base price (1.0 = no effect).
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Flat surcharge per unit.
    #[serde(default)]
    pub price_addon_cents: i64,

    /// Area engine only: replaces the product's per-area base price.
    #[serde(default)]
    pub base_price_override_cents: Option<i64>,
}

impl SizeOption {
    /// Creates a neutral size (no dimensions, multiplier 1, no add-on).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        SizeOption {
            id: id.into(),
            name: name.into(),
            width: 0.0,
            height: 0.0,
            multiplier: 1.0,
            price_addon_cents: 0,
            base_price_override_cents: None,
        }
    }

    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_addon_cents(mut self, cents: i64) -> Self {
        self.price_addon_cents = cents;
        self
    }

    pub fn with_base_override_cents(mut self, cents: i64) -> Self {
        self.base_price_override_cents = Some(cents);
        self
    }

    #[inline]
    pub fn price_addon(&self) -> Money {
        Money::from_cents(self.price_addon_cents)
    }

    #[inline]
    pub fn base_price_override(&self) -> Option<Money> {
        self.base_price_override_cents.map(Money::from_cents)
    }

    /// True for the sentinel custom-dimensions entry.
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_SIZE_ID
    }
}

// =============================================================================
// Quantity Rules
// =============================================================================

/// A quantity-range price tier.
///
/// `max_qty` is inclusive; `None` means unbounded. `variant_id` scopes the
/// tier to one size id; `None` applies globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingTier {
    pub min_qty: i64,

    #[serde(default)]
    pub max_qty: Option<i64>,

    pub unit_price_cents: i64,

    #[serde(default)]
    pub variant_id: Option<String>,
}

impl PricingTier {
    pub fn new(min_qty: i64, max_qty: Option<i64>, unit_price_cents: i64) -> Self {
        PricingTier {
            min_qty,
            max_qty,
            unit_price_cents,
            variant_id: None,
        }
    }

    /// Scopes this tier to a single size.
    pub fn for_size(mut self, size_id: impl Into<String>) -> Self {
        self.variant_id = Some(size_id.into());
        self
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Whether `quantity` falls inside this tier's range.
    pub fn covers(&self, quantity: i64) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }
}

/// A point in a fixed-quantity price table (exact quantity, total price).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixedQuantityOption {
    pub quantity: i64,

    pub total_price_cents: i64,

    #[serde(default)]
    pub variant_id: Option<String>,
}

impl FixedQuantityOption {
    pub fn new(quantity: i64, total_price_cents: i64) -> Self {
        FixedQuantityOption {
            quantity,
            total_price_cents,
            variant_id: None,
        }
    }

    pub fn for_size(mut self, size_id: impl Into<String>) -> Self {
        self.variant_id = Some(size_id.into());
        self
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Per-unit price implied by this entry; `None` for a zero quantity.
    pub fn unit_price(&self) -> Option<Money> {
        self.total_price().divide_rounded(self.quantity)
    }
}

/// Multi-variant volume discount: applies once the summed row quantity
/// reaches `min_qty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VolumeDiscountTier {
    pub min_qty: i64,

    /// Discount in basis points (1500 = 15%).
    pub discount_bps: u32,
}

impl VolumeDiscountTier {
    pub fn new(min_qty: i64, discount_bps: u32) -> Self {
        VolumeDiscountTier {
            min_qty,
            discount_bps,
        }
    }

    #[inline]
    pub fn discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }
}

// =============================================================================
// Options
// =============================================================================

/// What an additive option's price is charged per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceScope {
    /// Flat amount per produced unit.
    #[default]
    Unit,
    /// Amount per area unit, multiplied by the resolved area.
    Area,
}

/// How an option item prices: `"+"` additive or `"x"` multiplicative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "pricing_mode")]
pub enum OptionPricing {
    #[serde(rename = "+")]
    Additive {
        price_cents: i64,

        #[serde(default)]
        scope: PriceScope,

        /// Multiply by a user-entered quantity instead of 1
        /// (e.g. "extra grommets: 4 @ 2.00").
        #[serde(default)]
        has_custom_quantity: bool,
    },

    #[serde(rename = "x")]
    Multiplicative {
        #[serde(default = "default_multiplier")]
        factor: f64,
    },
}

/// A selectable entry inside an option group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
    pub pricing: OptionPricing,
}

impl OptionItem {
    /// Flat per-unit add-on.
    pub fn additive(id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        OptionItem {
            id: id.into(),
            name: name.into(),
            pricing: OptionPricing::Additive {
                price_cents,
                scope: PriceScope::Unit,
                has_custom_quantity: false,
            },
        }
    }

    /// Add-on charged per area unit.
    pub fn per_area(id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        OptionItem {
            id: id.into(),
            name: name.into(),
            pricing: OptionPricing::Additive {
                price_cents,
                scope: PriceScope::Area,
                has_custom_quantity: false,
            },
        }
    }

    /// Per-piece add-on multiplied by a user-entered count.
    pub fn per_piece(id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        OptionItem {
            id: id.into(),
            name: name.into(),
            pricing: OptionPricing::Additive {
                price_cents,
                scope: PriceScope::Unit,
                has_custom_quantity: true,
            },
        }
    }

    pub fn multiplicative(id: impl Into<String>, name: impl Into<String>, factor: f64) -> Self {
        OptionItem {
            id: id.into(),
            name: name.into(),
            pricing: OptionPricing::Multiplicative { factor },
        }
    }

    /// True when the caller must supply a quantity for this item.
    pub fn has_custom_quantity(&self) -> bool {
        matches!(
            self.pricing,
            OptionPricing::Additive {
                has_custom_quantity: true,
                ..
            }
        )
    }
}

/// Named single-select set of option items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionGroup {
    pub name: String,

    #[serde(default)]
    pub items: Vec<OptionItem>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, items: Vec<OptionItem>) -> Self {
        OptionGroup {
            name: name.into(),
            items,
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OptionItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Legacy single-material choice on area products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialOption {
    pub id: String,
    pub name: String,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl MaterialOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, multiplier: f64) -> Self {
        MaterialOption {
            id: id.into(),
            name: name.into(),
            multiplier,
        }
    }
}

// =============================================================================
// Pricing Strategy
// =============================================================================

/// The pricing strategy a product is bound to.
///
/// Each variant carries only the fields its engine reads, so the
/// dispatcher is a single exhaustive match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum PricingStrategy {
    Area {
        base_price_per_area_cents: i64,

        /// Per-unit floor.
        #[serde(default)]
        minimum_price_cents: i64,

        #[serde(default)]
        area_unit: AreaUnit,

        #[serde(default)]
        materials: Vec<MaterialOption>,
    },

    TieredQuantity {
        #[serde(default)]
        tiers: Vec<PricingTier>,
    },

    FixedQuantity {
        #[serde(default)]
        entries: Vec<FixedQuantityOption>,

        /// Fallback per-unit price when no entry matches.
        #[serde(default)]
        unit_price_cents: Option<i64>,
    },

    MultiVariant {
        base_price_cents: i64,

        #[serde(default)]
        volume_discounts: Vec<VolumeDiscountTier>,
    },
}

impl PricingStrategy {
    pub fn kind(&self) -> EngineKind {
        match self {
            PricingStrategy::Area { .. } => EngineKind::Area,
            PricingStrategy::TieredQuantity { .. } => EngineKind::TieredQuantity,
            PricingStrategy::FixedQuantity { .. } => EngineKind::FixedQuantity,
            PricingStrategy::MultiVariant { .. } => EngineKind::MultiVariant,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,

    /// Display name shown on quotes and order lines.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Free-form grouping used by catalog search ("banners", "apparel").
    #[serde(default)]
    pub category: Option<String>,

    /// Inactive products stay loadable but are hidden from search.
    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default = "default_min_quantity")]
    pub min_quantity: i64,

    #[serde(default)]
    pub available_sizes: Vec<SizeOption>,

    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,

    pub strategy: PricingStrategy,
}

impl Product {
    /// Creates an active product with no sizes or options.
    pub fn new(id: impl Into<String>, name: impl Into<String>, strategy: PricingStrategy) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            is_active: true,
            min_quantity: DEFAULT_MIN_QUANTITY,
            available_sizes: Vec::new(),
            option_groups: Vec::new(),
            strategy,
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<SizeOption>) -> Self {
        self.available_sizes = sizes;
        self
    }

    pub fn with_option_groups(mut self, groups: Vec<OptionGroup>) -> Self {
        self.option_groups = groups;
        self
    }

    #[inline]
    pub fn engine(&self) -> EngineKind {
        self.strategy.kind()
    }

    pub fn find_size(&self, size_id: &str) -> Option<&SizeOption> {
        self.available_sizes.iter().find(|s| s.id == size_id)
    }

    pub fn find_option_group(&self, name: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.name == name)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// One apparel row: a size, its option picks and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantRow {
    pub size: SizeOption,

    /// Option group name → selected item id.
    #[serde(default)]
    pub selected_options: BTreeMap<String, String>,

    /// Option item id → user-entered quantity.
    #[serde(default)]
    pub custom_quantities: BTreeMap<String, i64>,

    pub quantity: i64,
}

impl VariantRow {
    pub fn new(size: SizeOption, quantity: i64) -> Self {
        VariantRow {
            size,
            selected_options: BTreeMap::new(),
            custom_quantities: BTreeMap::new(),
            quantity,
        }
    }

    pub fn with_option(mut self, group: impl Into<String>, item_id: impl Into<String>) -> Self {
        self.selected_options.insert(group.into(), item_id.into());
        self
    }

    pub fn with_custom_quantity(mut self, item_id: impl Into<String>, quantity: i64) -> Self {
        self.custom_quantities.insert(item_id.into(), quantity);
        self
    }
}

/// A customer's choices for one product, supplied by the order builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Configuration {
    /// Selected size id, `"custom"` for user-entered dimensions.
    pub size_id: Option<String>,

    pub custom_width: Option<f64>,

    pub custom_height: Option<f64>,

    pub quantity: i64,

    /// Area products: selected legacy material id.
    pub material_id: Option<String>,

    /// Option group name → selected item id.
    pub selected_options: BTreeMap<String, String>,

    /// Option item id → user-entered quantity.
    pub custom_quantities: BTreeMap<String, i64>,

    /// Multi-variant products only.
    pub variant_rows: Vec<VariantRow>,
}

impl Configuration {
    pub fn new(quantity: i64) -> Self {
        Configuration {
            quantity,
            ..Configuration::default()
        }
    }

    pub fn with_size(mut self, size_id: impl Into<String>) -> Self {
        self.size_id = Some(size_id.into());
        self
    }

    /// Selects the custom size with the given dimensions.
    pub fn with_custom_dimensions(mut self, width: f64, height: f64) -> Self {
        self.size_id = Some(CUSTOM_SIZE_ID.to_string());
        self.custom_width = Some(width);
        self.custom_height = Some(height);
        self
    }

    pub fn with_material(mut self, material_id: impl Into<String>) -> Self {
        self.material_id = Some(material_id.into());
        self
    }

    pub fn with_option(mut self, group: impl Into<String>, item_id: impl Into<String>) -> Self {
        self.selected_options.insert(group.into(), item_id.into());
        self
    }

    pub fn with_custom_quantity(mut self, item_id: impl Into<String>, quantity: i64) -> Self {
        self.custom_quantities.insert(item_id.into(), quantity);
        self
    }

    pub fn with_rows(mut self, rows: Vec<VariantRow>) -> Self {
        self.variant_rows = rows;
        self
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// Kind tag of a breakdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    Base,
    Add,
    Multiply,
    Discount,
    Info,
}

/// One entry in the audit trail of a quote.
///
/// `base`, `add` and `discount` carry a currency amount, `multiply` a
/// scalar factor, `info` nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakdownLine {
    Base { label: String, value_cents: i64 },
    Add { label: String, value_cents: i64 },
    Multiply { label: String, factor: f64 },
    Discount { label: String, value_cents: i64 },
    Info { label: String },
}

impl BreakdownLine {
    pub fn base(label: impl Into<String>, value: Money) -> Self {
        BreakdownLine::Base {
            label: label.into(),
            value_cents: value.cents(),
        }
    }

    pub fn add(label: impl Into<String>, value: Money) -> Self {
        BreakdownLine::Add {
            label: label.into(),
            value_cents: value.cents(),
        }
    }

    pub fn multiply(label: impl Into<String>, factor: f64) -> Self {
        BreakdownLine::Multiply {
            label: label.into(),
            factor,
        }
    }

    pub fn discount(label: impl Into<String>, value: Money) -> Self {
        BreakdownLine::Discount {
            label: label.into(),
            value_cents: value.cents(),
        }
    }

    pub fn info(label: impl Into<String>) -> Self {
        BreakdownLine::Info {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BreakdownLine::Base { label, .. }
            | BreakdownLine::Add { label, .. }
            | BreakdownLine::Multiply { label, .. }
            | BreakdownLine::Discount { label, .. }
            | BreakdownLine::Info { label } => label,
        }
    }

    pub fn kind(&self) -> BreakdownKind {
        match self {
            BreakdownLine::Base { .. } => BreakdownKind::Base,
            BreakdownLine::Add { .. } => BreakdownKind::Add,
            BreakdownLine::Multiply { .. } => BreakdownKind::Multiply,
            BreakdownLine::Discount { .. } => BreakdownKind::Discount,
            BreakdownLine::Info { .. } => BreakdownKind::Info,
        }
    }

    /// Currency amount for `base`, `add` and `discount` lines.
    pub fn amount(&self) -> Option<Money> {
        match self {
            BreakdownLine::Base { value_cents, .. }
            | BreakdownLine::Add { value_cents, .. }
            | BreakdownLine::Discount { value_cents, .. } => Some(Money::from_cents(*value_cents)),
            BreakdownLine::Multiply { .. } | BreakdownLine::Info { .. } => None,
        }
    }

    /// Scalar factor for `multiply` lines.
    pub fn factor(&self) -> Option<f64> {
        match self {
            BreakdownLine::Multiply { factor, .. } => Some(*factor),
            _ => None,
        }
    }
}

/// A priced, itemised quote.
///
/// For the multi-variant engine `unit_price_cents` is the weighted average
/// `total / quantity` across heterogeneous rows, not any single row's
/// price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceResult {
    pub engine: EngineKind,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub quantity: i64,
    pub breakdown: Vec<BreakdownLine>,
}

impl PriceResult {
    pub fn new(
        engine: EngineKind,
        unit_price: Money,
        total_price: Money,
        quantity: i64,
        breakdown: Vec<BreakdownLine>,
    ) -> Self {
        PriceResult {
            engine,
            unit_price_cents: unit_price.cents(),
            total_price_cents: total_price.cents(),
            quantity,
            breakdown,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Lines of the given kind, in audit-trail order.
    pub fn lines_of(&self, kind: BreakdownKind) -> impl Iterator<Item = &BreakdownLine> {
        self.breakdown.iter().filter(move |line| line.kind() == kind)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_percentage() {
        let rate = DiscountRate::from_bps(1500);
        assert_eq!(rate.bps(), 1500);
        assert!((rate.percentage() - 15.0).abs() < 0.001);
        assert!(DiscountRate::default().is_zero());
    }

    #[test]
    fn test_tier_covers_inclusive_bounds() {
        let tier = PricingTier::new(100, Some(499), 80);
        assert!(!tier.covers(99));
        assert!(tier.covers(100));
        assert!(tier.covers(499));
        assert!(!tier.covers(500));

        let open = PricingTier::new(500, None, 60);
        assert!(open.covers(1_000_000));
    }

    #[test]
    fn test_strategy_deserializes_from_engine_tag() {
        let json = r#"{
            "id": "flyer-a5",
            "name": "A5 Flyer",
            "strategy": {
                "engine": "tiered_quantity",
                "tiers": [{ "min_qty": 1, "max_qty": 99, "unit_price_cents": 100 }]
            }
        }"#;

        let product: Product = serde_json::from_str(json).expect("valid product");
        assert_eq!(product.engine(), EngineKind::TieredQuantity);
        assert_eq!(product.min_quantity, 1);
        assert!(product.is_active);
    }

    #[test]
    fn test_option_item_pricing_mode_tags() {
        let additive: OptionItem = serde_json::from_str(
            r#"{ "id": "grommets", "name": "Grommets",
                 "pricing": { "pricing_mode": "+", "price_cents": 200, "has_custom_quantity": true } }"#,
        )
        .expect("additive item");
        assert!(additive.has_custom_quantity());

        let multiplicative: OptionItem = serde_json::from_str(
            r#"{ "id": "rush", "name": "Rush", "pricing": { "pricing_mode": "x" } }"#,
        )
        .expect("multiplicative item");
        assert_eq!(
            multiplicative.pricing,
            OptionPricing::Multiplicative { factor: 1.0 }
        );
    }

    #[test]
    fn test_additive_item_without_price_is_rejected() {
        let result: Result<OptionItem, _> = serde_json::from_str(
            r#"{ "id": "lam", "name": "Laminate", "pricing": { "pricing_mode": "+" } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_breakdown_line_accessors() {
        let line = BreakdownLine::add("Lamination", Money::from_cents(150));
        assert_eq!(line.kind(), BreakdownKind::Add);
        assert_eq!(line.amount(), Some(Money::from_cents(150)));
        assert_eq!(line.factor(), None);

        let info = BreakdownLine::info("Total");
        assert_eq!(info.amount(), None);
        assert_eq!(info.label(), "Total");
    }

    #[test]
    fn test_breakdown_line_serializes_with_kind_tag() {
        let json = serde_json::to_value(BreakdownLine::multiply("Rush", 1.5)).expect("json");
        assert_eq!(json["kind"], "multiply");
        assert_eq!(json["factor"], 1.5);
    }
}
