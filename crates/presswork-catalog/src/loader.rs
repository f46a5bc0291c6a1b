//! # Catalog Loading
//!
//! Reads catalog files once at startup.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Load                                       │
//! │                                                                         │
//! │  CatalogConfig::new(path) ← file or directory                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::load(config).await                                            │
//! │       │                                                                 │
//! │       ├── file       → { "products": [...] }                            │
//! │       └── directory  → every *.json, sorted by file name                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_product() per entry, duplicate id check                       │
//! │       │   strict: first failure aborts the load                         │
//! │       │   lenient: failures are logged and skipped                      │
//! │       ▼                                                                 │
//! │  ProductRepository (read-only, shared via Arc)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info, warn};

use presswork_core::validation::validate_product;
use presswork_core::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Catalog loading configuration.
///
/// ## Example
/// ```rust
/// use presswork_catalog::CatalogConfig;
///
/// let config = CatalogConfig::new("catalog/products.json").strict(false);
/// assert!(!config.strict);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog file, or a directory of `*.json` catalog files.
    pub path: PathBuf,

    /// Abort on the first invalid or duplicate product.
    /// Default: true
    pub strict: bool,
}

impl CatalogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            path: path.into(),
            strict: true,
        }
    }

    /// Sets strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// On-disk catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A loaded catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: ProductRepository,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Loads and validates a catalog.
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - every accepted product is valid
    /// * `Err(CatalogError)` - unreadable path, malformed JSON, or (strict)
    ///   an invalid/duplicate product
    pub async fn load(config: CatalogConfig) -> CatalogResult<Self> {
        info!(path = %config.path.display(), strict = config.strict, "Loading product catalog");

        let metadata = fs::metadata(&config.path)
            .await
            .map_err(|e| CatalogError::io(&config.path, e))?;

        let files = if metadata.is_dir() {
            list_catalog_files(&config.path).await?
        } else {
            vec![config.path.clone()]
        };

        let mut parsed = Vec::new();
        for file in &files {
            let raw = fs::read_to_string(file)
                .await
                .map_err(|e| CatalogError::io(file, e))?;
            let catalog_file: CatalogFile =
                serde_json::from_str(&raw).map_err(|e| CatalogError::parse(file, e))?;

            debug!(
                path = %file.display(),
                count = catalog_file.products.len(),
                "Parsed catalog file"
            );
            parsed.extend(catalog_file.products);
        }

        let products = accept_products(parsed, config.strict)?;
        let catalog = Catalog::from_products(products, config.path);

        info!(
            products = catalog.products.len(),
            active = catalog.products.count(),
            files = files.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from products already in memory (tests, fixtures).
    ///
    /// Products are not validated.
    pub fn from_products(products: Vec<Product>, source: impl Into<PathBuf>) -> Self {
        Catalog {
            products: ProductRepository::new(products),
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        self.products.clone()
    }

    /// Path the catalog was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// `*.json` files directly inside `dir`, sorted by file name.
async fn list_catalog_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| CatalogError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CatalogError::io(dir, e))?
    {
        let path = entry.path();
        if !path.extension().map_or(false, |ext| ext == "json") {
            continue;
        }

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| CatalogError::io(&path, e))?;
        // symlinks are followed
        let is_file = if file_type.is_symlink() {
            fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)
        } else {
            file_type.is_file()
        };
        if is_file {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CatalogError::Empty(dir.display().to_string()));
    }

    files.sort();
    Ok(files)
}

/// Validates products and drops duplicates according to `strict`.
fn accept_products(products: Vec<Product>, strict: bool) -> CatalogResult<Vec<Product>> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(products.len());

    for product in products {
        if let Err(source) = validate_product(&product) {
            if strict {
                return Err(CatalogError::InvalidProduct {
                    product_id: product.id,
                    source,
                });
            }
            warn!(product_id = %product.id, error = %source, "Skipping invalid product");
            continue;
        }

        if !seen.insert(product.id.clone()) {
            if strict {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
            warn!(product_id = %product.id, "Skipping duplicate product");
            continue;
        }

        accepted.push(product);
    }

    Ok(accepted)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use presswork_core::EngineKind;
    use uuid::Uuid;

    const FLYERS: &str = r#"{
        "products": [
            {
                "id": "flyer-a5",
                "name": "A5 Flyer",
                "category": "flyers",
                "strategy": {
                    "engine": "tiered_quantity",
                    "tiers": [
                        { "min_qty": 1, "max_qty": 99, "unit_price_cents": 100 },
                        { "min_qty": 100, "max_qty": 499, "unit_price_cents": 80 }
                    ]
                }
            }
        ]
    }"#;

    const BANNERS: &str = r#"{
        "products": [
            {
                "id": "banner-13oz",
                "name": "13oz Vinyl Banner",
                "available_sizes": [
                    { "id": "24x36", "name": "24 × 36", "width": 24, "height": 36 }
                ],
                "strategy": {
                    "engine": "area",
                    "base_price_per_area_cents": 250,
                    "minimum_price_cents": 1000
                }
            }
        ]
    }"#;

    const INVALID: &str = r#"{
        "products": [
            {
                "id": "bad tier",
                "name": "Broken",
                "strategy": { "engine": "tiered_quantity", "tiers": [] }
            },
            {
                "id": "cards",
                "name": "Business Cards",
                "strategy": {
                    "engine": "fixed_quantity",
                    "entries": [{ "quantity": 250, "total_price_cents": 3300 }]
                }
            }
        ]
    }"#;

    /// Fresh directory under the system temp dir.
    async fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("presswork-catalog-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_single_file() {
        let dir = temp_dir().await;
        let path = dir.join("products.json");
        fs::write(&path, FLYERS).await.unwrap();

        let catalog = Catalog::load(CatalogConfig::new(&path)).await.unwrap();
        let products = catalog.products();
        assert_eq!(products.len(), 1);
        assert_eq!(
            products.get_by_id("flyer-a5").map(|p| p.engine()),
            Some(EngineKind::TieredQuantity)
        );
        assert_eq!(catalog.source(), path.as_path());

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_directory_sorted() {
        let dir = temp_dir().await;
        fs::write(dir.join("20-flyers.json"), FLYERS).await.unwrap();
        fs::write(dir.join("10-banners.json"), BANNERS).await.unwrap();
        fs::write(dir.join("notes.txt"), "ignored").await.unwrap();
        fs::create_dir_all(dir.join("archive.json")).await.unwrap();

        let catalog = Catalog::load(CatalogConfig::new(&dir)).await.unwrap();
        let ids: Vec<String> = catalog
            .products()
            .by_engine(EngineKind::Area)
            .into_iter()
            .chain(catalog.products().by_engine(EngineKind::TieredQuantity))
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["banner-13oz", "flyer-a5"]);
        assert_eq!(catalog.products().len(), 2);

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_strict_rejects_invalid_product() {
        let dir = temp_dir().await;
        let path = dir.join("products.json");
        fs::write(&path, INVALID).await.unwrap();

        let err = Catalog::load(CatalogConfig::new(&path)).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidProduct { ref product_id, .. } if product_id == "bad tier"));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_lenient_skips_invalid_product() {
        let dir = temp_dir().await;
        let path = dir.join("products.json");
        fs::write(&path, INVALID).await.unwrap();

        let catalog = Catalog::load(CatalogConfig::new(&path).strict(false))
            .await
            .unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.products().get_by_id("cards").is_some());

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_across_files() {
        let dir = temp_dir().await;
        fs::write(dir.join("a.json"), FLYERS).await.unwrap();
        fs::write(dir.join("b.json"), FLYERS).await.unwrap();

        let err = Catalog::load(CatalogConfig::new(&dir)).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(ref id) if id == "flyer-a5"));

        let catalog = Catalog::load(CatalogConfig::new(&dir).strict(false))
            .await
            .unwrap();
        assert_eq!(catalog.products().len(), 1);

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let dir = temp_dir().await;
        let path = dir.join("products.json");
        fs::write(
            &path,
            r#"{ "products": [{ "id": "x", "name": "X", "strategy": { "engine": "laser" } }] }"#,
        )
        .await
        .unwrap();

        let err = Catalog::load(CatalogConfig::new(&path)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_bundled_catalog_is_valid() {
        let dir = temp_dir().await;
        let path = dir.join("products.json");
        fs::write(&path, include_str!("../../../catalog/products.json"))
            .await
            .unwrap();

        let catalog = Catalog::load(CatalogConfig::new(&path)).await.unwrap();
        let products = catalog.products();
        assert_eq!(products.count(), 4);
        for kind in [
            EngineKind::Area,
            EngineKind::TieredQuantity,
            EngineKind::FixedQuantity,
            EngineKind::MultiVariant,
        ] {
            assert_eq!(products.by_engine(kind).len(), 1, "{}", kind);
        }

        let tee = products.get_by_id("crew-tee").unwrap();
        let sizes: Vec<&str> = tee.available_sizes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(sizes, ["s", "m", "l", "xl", "xxl"]);
        assert_eq!(tee.find_size("xxl").map(|s| s.price_addon_cents), Some(300));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_path_and_empty_dir() {
        let dir = temp_dir().await;

        let err = Catalog::load(CatalogConfig::new(dir.join("nope.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));

        let err = Catalog::load(CatalogConfig::new(&dir)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Empty(_)));

        fs::remove_dir_all(&dir).await.unwrap();
    }
}
