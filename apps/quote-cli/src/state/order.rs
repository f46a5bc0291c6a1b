//! # Draft Order State
//!
//! The order being assembled from priced quotes.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>`; only one command modifies it
//! at a time.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Order Operations                               │
//! │                                                                         │
//! │  CLI                      Command                  Draft Change         │
//! │  ───                      ───────                  ────────────         │
//! │                                                                         │
//! │  order add ──────────────► add_to_order() ───────► lines.push(line)     │
//! │                                                                         │
//! │  order remove ID ────────► remove_from_order() ──► lines.remove(i)      │
//! │                                                                         │
//! │  order clear ────────────► clear_order() ────────► lines.clear()        │
//! │                                                                         │
//! │  order show ─────────────► get_order() ──────────► (read only)          │
//! │                                                                         │
//! │  Between invocations the draft lives in draft.json.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use presswork_core::{
    describe, BreakdownLine, Configuration, CoreError, CoreResult, EngineKind, Money, PriceResult,
    Product, MAX_ORDER_LINES,
};

use crate::error::{ApiError, ErrorCode};

/// A priced line frozen into the draft.
///
/// Everything needed to display or submit the line is copied at the time
/// of adding, so later catalog edits or re-quotes never change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Line id (UUID v4)
    pub id: String,

    pub product_id: String,

    /// Product name at time of adding (frozen)
    pub product_name: String,

    /// Human-readable configuration, e.g. "A5 Flyer — Qty 250"
    pub specification: String,

    pub engine: EngineKind,

    /// The configuration that was priced
    pub configuration: Configuration,

    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,

    /// Audit trail returned by the engine (frozen)
    pub breakdown: Vec<BreakdownLine>,

    pub added_at: DateTime<Utc>,
}

impl OrderLine {
    /// Freezes a priced configuration into a line.
    pub fn freeze(product: &Product, configuration: Configuration, result: PriceResult) -> Self {
        OrderLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            specification: describe(product, &configuration),
            engine: result.engine,
            configuration,
            quantity: result.quantity,
            unit_price_cents: result.unit_price_cents,
            total_price_cents: result.total_price_cents,
            breakdown: result.breakdown,
            added_at: Utc::now(),
        }
    }

    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// The draft order.
///
/// ## Invariants
/// - Every line is an independent configuration; lines are never merged
/// - At most `MAX_ORDER_LINES` lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,

    /// When the draft was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    pub fn new() -> Self {
        OrderDraft {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a frozen line.
    pub fn add_line(&mut self, line: OrderLine) -> CoreResult<&OrderLine> {
        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        self.lines.push(line);
        let index = self.lines.len() - 1;
        Ok(&self.lines[index])
    }

    /// Removes a line by id and returns it.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<OrderLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::total_price).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Draft totals summary for responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&OrderDraft> for OrderTotals {
    fn from(draft: &OrderDraft) -> Self {
        OrderTotals {
            line_count: draft.line_count(),
            total_quantity: draft.total_quantity(),
            total_cents: draft.total().cents(),
        }
    }
}

/// Shared draft order state.
///
/// ## Usage
/// ```rust,ignore
/// let totals = order_state.with_order(|draft| OrderTotals::from(draft));
/// order_state.with_order_mut(|draft| draft.remove_line(&id))?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderDraftState {
    draft: Arc<Mutex<OrderDraft>>,
}

impl OrderDraftState {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::from_draft(OrderDraft::new())
    }

    pub fn from_draft(draft: OrderDraft) -> Self {
        OrderDraftState {
            draft: Arc::new(Mutex::new(draft)),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderDraft) -> R,
    {
        let draft = self.lock();
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderDraft) -> R,
    {
        let mut draft = self.lock();
        f(&mut draft)
    }

    // A panic while holding the lock leaves the draft itself intact.
    fn lock(&self) -> MutexGuard<'_, OrderDraft> {
        self.draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads a draft file; a missing file is an empty draft.
    pub async fn load(path: &Path) -> Result<Self, ApiError> {
        match fs::read_to_string(path).await {
            Ok(raw) => {
                let draft: OrderDraft = serde_json::from_str(&raw).map_err(|e| {
                    ApiError::new(
                        ErrorCode::OrderError,
                        format!("Corrupt draft order {}: {}", path.display(), e),
                    )
                })?;
                debug!(path = %path.display(), lines = draft.line_count(), "Loaded draft order");
                Ok(Self::from_draft(draft))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No draft order yet, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(draft_io_error(path, e)),
        }
    }

    /// Writes the draft to disk, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), ApiError> {
        let (contents, lines) = self.with_order(|draft| {
            (serde_json::to_string_pretty(draft), draft.line_count())
        });
        let contents = contents.map_err(|e| ApiError::internal(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| draft_io_error(parent, e))?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| draft_io_error(path, e))?;

        info!(path = %path.display(), lines, "Draft order saved");
        Ok(())
    }
}

impl Default for OrderDraftState {
    fn default() -> Self {
        Self::new()
    }
}

fn draft_io_error(path: &Path, err: std::io::Error) -> ApiError {
    ApiError::new(
        ErrorCode::OrderError,
        format!("Cannot access draft order {}: {}", path.display(), err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswork_core::{quote, PricingStrategy, PricingTier};

    fn flyer() -> Product {
        Product::new(
            "flyer-a5",
            "A5 Flyer",
            PricingStrategy::TieredQuantity {
                tiers: vec![
                    PricingTier::new(1, Some(99), 100),
                    PricingTier::new(100, None, 80),
                ],
            },
        )
    }

    fn line(qty: i64) -> OrderLine {
        let product = flyer();
        let config = Configuration::new(qty);
        let result = quote(&product, &config).unwrap();
        OrderLine::freeze(&product, config, result)
    }

    #[test]
    fn test_freeze_copies_result() {
        let line = line(150);
        assert_eq!(line.product_name, "A5 Flyer");
        assert_eq!(line.unit_price_cents, 80);
        assert_eq!(line.total_price_cents, 12000);
        assert_eq!(line.specification, "A5 Flyer — Qty 150");
        assert!(!line.breakdown.is_empty());
        assert!(Uuid::parse_str(&line.id).is_ok());
    }

    #[test]
    fn test_lines_are_not_merged() {
        let mut draft = OrderDraft::new();
        draft.add_line(line(150)).unwrap();
        draft.add_line(line(50)).unwrap();

        let totals = OrderTotals::from(&draft);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 200);
        assert_eq!(totals.total_cents, 12000 + 5000);
    }

    #[test]
    fn test_remove_line() {
        let mut draft = OrderDraft::new();
        let id = draft.add_line(line(10)).unwrap().id.clone();

        assert!(matches!(
            draft.remove_line("missing"),
            Err(CoreError::LineNotFound(_))
        ));
        assert_eq!(draft.remove_line(&id).unwrap().quantity, 10);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_max_lines() {
        let mut draft = OrderDraft::new();
        let template = line(1);
        for _ in 0..MAX_ORDER_LINES {
            draft.add_line(template.clone()).unwrap();
        }
        assert!(matches!(
            draft.add_line(template),
            Err(CoreError::OrderTooLarge { .. })
        ));
    }

    #[test]
    fn test_state_shared_between_clones() {
        let state = OrderDraftState::new();
        let other = state.clone();
        state.with_order_mut(|d| d.add_line(line(5)).map(|_| ())).unwrap();
        assert_eq!(other.with_order(|d| d.line_count()), 1);

        other.with_order_mut(|d| d.clear());
        assert!(state.with_order(|d| d.is_empty()));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("presswork-draft-{}", Uuid::new_v4()))
            .join("draft.json");

        let empty = OrderDraftState::load(&path).await.unwrap();
        assert!(empty.with_order(|d| d.is_empty()));

        let state = OrderDraftState::new();
        state.with_order_mut(|d| d.add_line(line(150)).map(|_| ())).unwrap();
        state.save(&path).await.unwrap();

        let loaded = OrderDraftState::load(&path).await.unwrap();
        let original = state.with_order(|d| d.clone());
        assert_eq!(loaded.with_order(|d| d.clone()), original);

        fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }
}
