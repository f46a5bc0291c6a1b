//! # Draft Order Commands
//!
//! Builds up a draft order from priced configurations.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────────┐                 │
//! │  │  Empty   │────►│  Lines   │────►│ Order submission │                 │
//! │  │  Draft   │     │ (frozen) │     │ (outside scope)  │                 │
//! │  └──────────┘     └──────────┘     └──────────────────┘                 │
//! │                        │                                                │
//! │                   add_to_order                                          │
//! │                   remove_from_order                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_order ─────────────► (back to empty)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::quote::{price_request, QuoteRequest};
use crate::error::ApiError;
use crate::state::{CatalogState, OrderDraft, OrderDraftState, OrderLine, OrderTotals};

/// Draft response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub created_at: DateTime<Utc>,
}

impl From<&OrderDraft> for OrderResponse {
    fn from(draft: &OrderDraft) -> Self {
        OrderResponse {
            lines: draft.lines.clone(),
            totals: OrderTotals::from(draft),
            created_at: draft.created_at,
        }
    }
}

/// Gets the current draft.
pub fn get_order(order: &OrderDraftState) -> OrderResponse {
    debug!("get_order command");
    order.with_order(|draft| OrderResponse::from(draft))
}

/// Prices a configuration and appends it to the draft as a frozen line.
///
/// ## Price Freezing
/// The line keeps the price, breakdown and specification computed now;
/// quoting the same product again later never changes it.
pub fn add_to_order(
    catalog: &CatalogState,
    order: &OrderDraftState,
    request: QuoteRequest,
) -> Result<OrderResponse, ApiError> {
    debug!(product_id = %request.product_id, "add_to_order command");

    let priced = price_request(catalog, request)?;
    let line = OrderLine::freeze(&priced.product, priced.configuration, priced.price);

    order.with_order_mut(|draft| -> Result<OrderResponse, ApiError> {
        let added = draft.add_line(line)?;
        info!(
            line_id = %added.id,
            product_id = %added.product_id,
            total = %added.total_price(),
            "Line added to draft order"
        );
        Ok(OrderResponse::from(&*draft))
    })
}

/// Removes a line by id.
pub fn remove_from_order(order: &OrderDraftState, line_id: &str) -> Result<OrderResponse, ApiError> {
    debug!(line_id = %line_id, "remove_from_order command");

    order.with_order_mut(|draft| -> Result<OrderResponse, ApiError> {
        draft.remove_line(line_id)?;
        Ok(OrderResponse::from(&*draft))
    })
}

/// Removes every line.
pub fn clear_order(order: &OrderDraftState) -> OrderResponse {
    debug!("clear_order command");

    order.with_order_mut(|draft| {
        draft.clear();
        OrderResponse::from(&*draft)
    })
}
