//! # State Module
//!
//! Application state for the quote CLI, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌────────────────────────────┐   ┌────────────────────────────────┐    │
//! │  │   CatalogState             │   │   OrderDraftState              │    │
//! │  │                            │   │                                │    │
//! │  │   Catalog (read-only)      │   │   Arc<Mutex<OrderDraft>>       │    │
//! │  │   max_line_quantity        │   │   persisted to draft.json      │    │
//! │  │   search_limit             │   │                                │    │
//! │  └────────────────────────────┘   └────────────────────────────────┘    │
//! │                                                                         │
//! │  Commands borrow only the state they need:                              │
//! │  quote_product(&CatalogState, ..)                                       │
//! │  add_to_order(&CatalogState, &OrderDraftState, ..)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod order;

pub use catalog::CatalogState;
pub use order::{OrderDraft, OrderDraftState, OrderLine, OrderTotals};
