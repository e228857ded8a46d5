//! # Catalogs
//!
//! Read-only, keyed views over the product and material lists the caller
//! fetched from storage. The cost engine walks the recipe graph through
//! these maps instead of following references between products.
//!
//! Insertion order is kept so bulk operations report in the caller's order.

use std::collections::HashMap;

use tracing::warn;

use crate::sku::normalize_sku;
use crate::types::{Material, Product};

// =============================================================================
// Product Catalog
// =============================================================================

/// Products keyed by uppercase SKU.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl ProductCatalog {
    /// Builds the catalog. On a duplicate SKU the first record is kept.
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = ProductCatalog::default();
        for product in products {
            let key = normalize_sku(&product.sku);
            if catalog.index.contains_key(&key) {
                warn!(sku = %key, "Duplicate SKU in catalog, keeping first record");
                catalog.duplicates.push(key);
                continue;
            }
            catalog.index.insert(key, catalog.products.len());
            catalog.products.push(product);
        }
        catalog
    }

    /// Case-insensitive lookup.
    pub fn get(&self, sku: &str) -> Option<&Product> {
        self.index
            .get(&normalize_sku(sku))
            .map(|&i| &self.products[i])
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.get(sku).is_some()
    }

    /// Normalized SKUs of the records skipped as duplicates, one entry per
    /// skipped record.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        ProductCatalog::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Material Catalog
// =============================================================================

/// Materials keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialCatalog {
    /// Builds the catalog. On a duplicate id the first record is kept.
    pub fn new(materials: Vec<Material>) -> Self {
        let mut catalog = MaterialCatalog::default();
        for material in materials {
            if catalog.index.contains_key(&material.id) {
                warn!(material_id = %material.id, "Duplicate material id, keeping first record");
                continue;
            }
            catalog
                .index
                .insert(material.id.clone(), catalog.materials.len());
            catalog.materials.push(material);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        self.index.get(id).map(|&i| &self.materials[i])
    }

    /// The stone material that supplies a suffix stone code.
    pub fn find_stone(&self, code: &str) -> Option<&Material> {
        self.materials.iter().find(|m| {
            m.is_stone()
                && m.variant_code
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(code))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<Material> for MaterialCatalog {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        MaterialCatalog::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
