//! # Pricing Engines
//!
//! The four mutually exclusive pricing algorithms.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Engine Inputs                                   │
//! │                                                                         │
//! │   ResolvedSize ──┐                                                      │
//! │                  ├──► area / tiered / fixed ──► PriceResult             │
//! │   ResolvedOptions┘                                                      │
//! │                                                                         │
//! │   VariantRow[] ─────► multi_variant ──────────► PriceResult             │
//! │   (each row resolves its own size and options)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engines never look up catalog entries by id; the dispatcher resolves
//! sizes, options and materials first, so every lookup failure surfaces
//! before any arithmetic runs.

pub mod area;
pub mod fixed;
pub mod multi_variant;
pub mod tiered;

pub use area::{price_area, resolve_material, AreaInput};
pub use fixed::{price_fixed_quantity, FixedQuantityInput};
pub use multi_variant::{price_multi_variant, MultiVariantInput};
pub use tiered::{price_tiered, TieredInput};

use crate::money::Money;
use crate::options::SelectedOption;
use crate::types::BreakdownLine;

/// Closing `info` line shared by every engine.
pub(crate) fn total_line(unit: Money, quantity: i64, total: Money) -> BreakdownLine {
    BreakdownLine::info(format!("Total: {} × {} = {}", unit, quantity, total))
}

/// `info` line for a selection the engine does not price.
pub(crate) fn not_applied_line(selection: &SelectedOption<'_>, engine: &str) -> BreakdownLine {
    BreakdownLine::info(format!(
        "{} (not applied to {} pricing)",
        selection.label(),
        engine
    ))
}
