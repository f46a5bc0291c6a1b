//! # Repository Module
//!
//! Read-only views over a loaded catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quote command                                                          │
//! │       │                                                                 │
//! │       │  catalog.products().get_by_id("banner-13oz")                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── search(&self, query, limit)                                        │
//! │  ├── list_active(&self, limit)                                          │
//! │  └── by_engine(&self, kind)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Vec<Product>> (loaded once, never mutated)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
