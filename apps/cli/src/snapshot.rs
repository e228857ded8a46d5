//! # Catalog Snapshot
//!
//! The CLI does not own persistence. It reads one JSON document holding
//! everything the engine needs:
//!
//! ```json
//! {
//!   "settings":  { "spot_price_per_gram": "0.82", "loss_percentage": "10" },
//!   "materials": [ { "id": "STN-KR", "name": "Carnelian", ... } ],
//!   "products":  [ { "sku": "XR2020", "weight_g": "10", ... } ]
//! }
//! ```

use std::path::Path;

use atelier_core::validation::validate_product;
use atelier_core::{
    CostEngine, EngineConfig, GlobalSettings, Material, MaterialCatalog, Product, ProductCatalog,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Raw snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub settings: GlobalSettings,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogSnapshot {
    /// Reads a snapshot file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;
        info!(
            ?path,
            products = snapshot.products.len(),
            materials = snapshot.materials.len(),
            "Loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    /// Parses and checks a snapshot document.
    ///
    /// Settings must be valid. Product records that fail validation are
    /// logged and kept; the engine falls back on them the same way the
    /// product form does.
    pub fn from_json(json: &str) -> CliResult<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        snapshot.settings.validate()?;

        for product in &snapshot.products {
            if let Err(e) = validate_product(product) {
                warn!(sku = %product.sku, error = %e, "Product record fails validation");
            }
        }
        Ok(snapshot)
    }
}

/// Keyed catalogs plus the effective settings and config for one run.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub products: ProductCatalog,
    pub materials: MaterialCatalog,
    pub settings: GlobalSettings,
    pub config: EngineConfig,
}

impl Workspace {
    /// Builds a workspace, applying the config's market overrides.
    pub fn new(snapshot: CatalogSnapshot, config: &AppConfig) -> Self {
        Workspace {
            settings: config.market.apply(&snapshot.settings),
            products: ProductCatalog::new(snapshot.products),
            materials: MaterialCatalog::new(snapshot.materials),
            config: config.engine(),
        }
    }

    /// Loads the snapshot at `path`.
    pub fn open(path: &Path, config: &AppConfig) -> CliResult<Self> {
        Ok(Self::new(CatalogSnapshot::load(path)?, config))
    }

    pub fn engine(&self) -> CostEngine<'_> {
        CostEngine::new(&self.products, &self.materials, &self.settings, &self.config)
    }

    /// Looks up a product, case-insensitively.
    pub fn product(&self, sku: &str) -> CliResult<&Product> {
        self.products
            .get(sku)
            .ok_or_else(|| CliError::ProductNotFound(sku.trim().to_uppercase()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
