//! # Product Repository
//!
//! Read-only lookup over a loaded catalog.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "BANNER"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase, match against: id, name, category                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  banner-13oz   | 13oz Vinyl Banner | banners  ← MATCH                   │
//! │  mesh-banner   | Mesh Banner       | banners  ← MATCH                   │
//! │  flyer-a5      | A5 Flyer          | flyers                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  active only, sorted by name, truncated to limit                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use presswork_core::{EngineKind, Product};

/// Repository over an immutable product list.
///
/// Cloning is cheap; all clones share the same products.
///
/// ## Usage
/// ```rust
/// use presswork_catalog::ProductRepository;
/// use presswork_core::{PricingStrategy, Product};
///
/// let repo = ProductRepository::new(vec![Product::new(
///     "flyer-a5",
///     "A5 Flyer",
///     PricingStrategy::TieredQuantity { tiers: vec![] },
/// )]);
///
/// assert!(repo.get_by_id("flyer-a5").is_some());
/// assert_eq!(repo.search("flyer", 20).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Arc<Vec<Product>>,
    by_id: Arc<HashMap<String, usize>>,
}

impl ProductRepository {
    /// Creates a repository. On duplicate ids the first entry wins.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            by_id.entry(product.id.clone()).or_insert(index);
        }

        ProductRepository {
            products: Arc::new(products),
            by_id: Arc::new(by_id),
        }
    }

    /// Gets a product by id, active or not.
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&index| &self.products[index])
    }

    /// Searches active products by id, name and category.
    ///
    /// An empty query lists active products.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let query = query.trim().to_lowercase();

        debug!(query = %query, limit = limit, "Searching products");

        if query.is_empty() {
            return self.list_active(limit);
        }

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.is_active && matches_query(p, &query))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);

        debug!(count = matches.len(), "Search returned products");
        matches
    }

    /// Lists active products sorted by name.
    pub fn list_active(&self, limit: usize) -> Vec<&Product> {
        let mut active: Vec<&Product> = self.products.iter().filter(|p| p.is_active).collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        active.truncate(limit);
        active
    }

    /// Lists active products priced by the given engine, in catalog order.
    pub fn by_engine(&self, kind: EngineKind) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_active && p.engine() == kind)
            .collect()
    }

    /// Counts active products.
    pub fn count(&self) -> usize {
        self.products.iter().filter(|p| p.is_active).count()
    }

    /// Total entries, including inactive ones.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn matches_query(product: &Product, query: &str) -> bool {
    product.id.to_lowercase().contains(query)
        || product.name.to_lowercase().contains(query)
        || product
            .category
            .as_deref()
            .map_or(false, |c| c.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswork_core::{PricingStrategy, PricingTier};

    fn tiered(id: &str, name: &str, category: &str) -> Product {
        let mut product = Product::new(
            id,
            name,
            PricingStrategy::TieredQuantity {
                tiers: vec![PricingTier::new(1, None, 100)],
            },
        );
        product.category = Some(category.to_string());
        product
    }

    fn repo() -> ProductRepository {
        let mut retired = tiered("banner-old", "Old Banner", "banners");
        retired.is_active = false;

        ProductRepository::new(vec![
            tiered("mesh-banner", "Mesh Banner", "banners"),
            tiered("flyer-a5", "A5 Flyer", "flyers"),
            tiered("banner-13oz", "13oz Vinyl Banner", "banners"),
            retired,
            Product::new(
                "tee",
                "Crew Tee",
                PricingStrategy::MultiVariant {
                    base_price_cents: 2000,
                    volume_discounts: vec![],
                },
            ),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let repo = repo();
        assert_eq!(repo.get_by_id("flyer-a5").map(|p| p.name.as_str()), Some("A5 Flyer"));
        assert!(repo.get_by_id("banner-old").is_some());
        assert!(repo.get_by_id("missing").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_and_hides_inactive() {
        let repo = repo();
        let names: Vec<&str> = repo
            .search("BANNER", 20)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["13oz Vinyl Banner", "Mesh Banner"]);
    }

    #[test]
    fn test_search_matches_category_and_limit() {
        let repo = repo();
        assert_eq!(repo.search("flyers", 20).len(), 1);
        assert_eq!(repo.search("banners", 1).len(), 1);
    }

    #[test]
    fn test_empty_query_lists_active() {
        let repo = repo();
        assert_eq!(repo.search("  ", 20).len(), 4);
        assert_eq!(repo.count(), 4);
        assert_eq!(repo.len(), 5);
    }

    #[test]
    fn test_by_engine() {
        let repo = repo();
        assert_eq!(repo.by_engine(EngineKind::TieredQuantity).len(), 3);
        assert_eq!(repo.by_engine(EngineKind::MultiVariant).len(), 1);
        assert!(repo.by_engine(EngineKind::Area).is_empty());
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let repo = ProductRepository::new(vec![
            tiered("flyer", "First", "flyers"),
            tiered("flyer", "Second", "flyers"),
        ]);
        assert_eq!(repo.get_by_id("flyer").map(|p| p.name.as_str()), Some("First"));
    }
}
