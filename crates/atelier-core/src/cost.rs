//! # Cost Resolution Engine
//!
//! Rolls a product's manufacturing cost up through its bill of materials.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve(RING-A)                           path = [RING-A]              │
//! │  ├── metal      weight × spot × (1 + loss/100)                          │
//! │  ├── materials  Σ material.cost_per_unit × qty     (missing → 0 + warn) │
//! │  ├── components Σ resolve(sku) × qty               path = [RING-A, ..]  │
//! │  │     └── sku already on path? ──► CostError::CircularRecipe           │
//! │  └── labor      LaborCost::recompute (manual lines kept)                │
//! │                                                                         │
//! │  total = metal + materials + components + labor                         │
//! │                                                                         │
//! │  Imported: total = supplier quote; the in-house counterfactual above    │
//! │  feeds the SupplierAnalysis instead of the total.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every line is rounded to cents before it is summed. The engine holds only
//! shared references, so one instance can serve any number of calls.
//!
//! A component reached through several recipe lines is resolved once per
//! call and reused; only `path` decides what is circular.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::{MaterialCatalog, ProductCatalog};
use crate::error::{CostError, CostResult};
use crate::labor::{LaborCost, LaborInputs};
use crate::money::Money;
use crate::settings::{EngineConfig, GlobalSettings};
use crate::sku::normalize_sku;
use crate::supplier::{analyze_supplier_value, SupplierAnalysis};
use crate::types::{Product, ProductionMode, RecipeItem};

/// Component nesting limit. Deeper recipes fail with
/// [`CostError::RecipeTooDeep`].
pub const MAX_RECIPE_DEPTH: usize = 32;

/// Breakdowns already resolved during one call, by normalized SKU.
type Resolved = HashMap<String, CostBreakdown>;

// =============================================================================
// Warnings
// =============================================================================

/// A recoverable problem found while costing.
///
/// The affected line is costed at zero and the warning travels with the
/// result so the form can flag it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostWarning {
    MissingMaterial { sku: String, material_id: String },
    MissingComponent { sku: String, component_sku: String },
    MissingSupplierQuote { sku: String },
    UnknownStoneMaterial { sku: String, stone_code: String },
    UnrecognizedSuffix { sku: String, suffix: String },
}

impl std::fmt::Display for CostWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostWarning::MissingMaterial { sku, material_id } => {
                write!(f, "{}: material '{}' not found, costed at zero", sku, material_id)
            }
            CostWarning::MissingComponent { sku, component_sku } => {
                write!(f, "{}: component '{}' not found, costed at zero", sku, component_sku)
            }
            CostWarning::MissingSupplierQuote { sku } => {
                write!(f, "{}: imported without a supplier quote", sku)
            }
            CostWarning::UnknownStoneMaterial { sku, stone_code } => {
                write!(f, "{}: no stone material for code '{}'", sku, stone_code)
            }
            CostWarning::UnrecognizedSuffix { sku, suffix } => {
                write!(f, "{}: suffix '{}' does not decode", sku, suffix)
            }
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// A costed `Raw` recipe line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialLine {
    pub material_id: String,
    /// `None` when the material is missing from the catalog.
    pub name: Option<String>,
    #[ts(type = "string")]
    pub quantity: Decimal,
    pub cost: Money,
}

/// A costed `Component` recipe line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComponentLine {
    pub component_sku: String,
    #[ts(type = "string")]
    pub quantity: Decimal,
    /// Resolved total of one unit.
    pub unit_cost: Money,
    pub cost: Money,
}

/// Engine output for one product. Recomputed on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostBreakdown {
    pub sku: String,
    pub production: ProductionMode,

    pub metal: Money,
    pub materials: Money,
    pub material_lines: Vec<MaterialLine>,
    pub components: Money,
    pub component_lines: Vec<ComponentLine>,
    pub labor: Money,
    /// Recomputed labor lines for in-house products.
    pub labor_detail: Option<LaborCost>,
    /// Supplier quote for imported products.
    pub purchase: Money,

    pub total: Money,
    /// Metal and materials, including those of components.
    pub intrinsic_value: Money,

    pub warnings: Vec<CostWarning>,
    pub supplier_analysis: Option<SupplierAnalysis>,
}

impl CostBreakdown {
    /// Returns a copy of `product` with the total written into
    /// `active_price` and `draft_price`, and the recomputed labor lines.
    ///
    /// Persisting the copy is up to the caller.
    pub fn apply_to(&self, product: &Product) -> Product {
        let mut updated = product.clone();
        updated.active_price = self.total;
        updated.draft_price = self.total;
        if let Some(labor) = self.labor_detail {
            updated.labor = labor;
        }
        updated
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of repricing one catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepriceOutcome {
    pub sku: String,
    pub result: CostResult<CostBreakdown>,
}

// =============================================================================
// Engine
// =============================================================================

/// Resolves product costs against a fixed catalog snapshot.
///
/// ## Example
/// ```rust
/// use atelier_core::catalog::{MaterialCatalog, ProductCatalog};
/// use atelier_core::cost::CostEngine;
/// use atelier_core::money::Money;
/// use atelier_core::settings::{EngineConfig, GlobalSettings};
/// use atelier_core::types::Product;
/// use rust_decimal_macros::dec;
///
/// let products = ProductCatalog::new(vec![Product::new("XR2020", dec!(10))]);
/// let materials = MaterialCatalog::default();
/// let settings = GlobalSettings::new(Money::new(dec!(0.82)), dec!(10));
/// let config = EngineConfig::default();
///
/// let engine = CostEngine::new(&products, &materials, &settings, &config);
/// let cost = engine.resolve(products.get("XR2020").unwrap()).unwrap();
/// assert_eq!(cost.metal, Money::new(dec!(9.02)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostEngine<'a> {
    pub products: &'a ProductCatalog,
    pub materials: &'a MaterialCatalog,
    pub settings: &'a GlobalSettings,
    pub config: &'a EngineConfig,
}

impl<'a> CostEngine<'a> {
    pub fn new(
        products: &'a ProductCatalog,
        materials: &'a MaterialCatalog,
        settings: &'a GlobalSettings,
        config: &'a EngineConfig,
    ) -> Self {
        CostEngine {
            products,
            materials,
            settings,
            config,
        }
    }

    /// Resolves the full cost of a product.
    ///
    /// ## Errors
    /// - [`CostError::CircularRecipe`] if the recipe reaches itself
    /// - [`CostError::RecipeTooDeep`] past [`MAX_RECIPE_DEPTH`] levels
    pub fn resolve(&self, product: &Product) -> CostResult<CostBreakdown> {
        let mut path = Vec::new();
        let mut resolved = Resolved::new();
        self.resolve_on_path(product, &mut path, &mut resolved)
    }

    /// Resolves every catalog product, in catalog order.
    ///
    /// Components shared between products are resolved once for the whole
    /// pass.
    pub fn reprice_catalog(&self) -> Vec<RepriceOutcome> {
        let mut resolved = Resolved::new();
        self.products
            .iter()
            .map(|product| {
                let mut path = Vec::new();
                RepriceOutcome {
                    sku: product.sku.clone(),
                    result: self.resolve_on_path(product, &mut path, &mut resolved),
                }
            })
            .collect()
    }

    /// Labor lines of a product as they stand for the current inputs.
    pub fn recompute_labor(&self, product: &Product) -> LaborCost {
        let inputs = LaborInputs::from_product(product, self.materials);
        product.labor.recompute(&inputs, &self.config.rates)
    }

    fn resolve_on_path(
        &self,
        product: &Product,
        path: &mut Vec<String>,
        resolved: &mut Resolved,
    ) -> CostResult<CostBreakdown> {
        let sku = normalize_sku(&product.sku);

        if let Some(done) = resolved.get(&sku) {
            return Ok(done.clone());
        }
        if path.contains(&sku) {
            let mut cycle = path.clone();
            cycle.push(sku.clone());
            warn!(sku = %sku, path = %cycle.join(" -> "), "Circular recipe detected");
            return Err(CostError::CircularRecipe { sku, path: cycle });
        }
        if path.len() >= MAX_RECIPE_DEPTH {
            warn!(sku = %sku, depth = MAX_RECIPE_DEPTH, "Recipe nesting limit reached");
            return Err(CostError::RecipeTooDeep {
                sku,
                depth: MAX_RECIPE_DEPTH,
            });
        }

        path.push(sku.clone());
        let result = match product.production {
            ProductionMode::InHouse => self.make_cost(product, path, resolved),
            ProductionMode::Imported => self.purchase_cost(product, path, resolved),
        };
        path.pop();

        if let Ok(breakdown) = &result {
            resolved.insert(sku, breakdown.clone());
        }
        result
    }

    /// In-house cost. The product's SKU is already on `path`.
    fn make_cost(
        &self,
        product: &Product,
        path: &mut Vec<String>,
        resolved: &mut Resolved,
    ) -> CostResult<CostBreakdown> {
        let sku = normalize_sku(&product.sku);
        let mut warnings = Vec::new();

        let metal = (self.settings.spot_price_per_gram
            * product.weight_g
            * self.settings.loss_factor())
        .round_cents();

        let mut material_lines = Vec::new();
        let mut component_lines = Vec::new();
        let mut component_intrinsic = Money::zero();

        for item in &product.recipe {
            match item {
                RecipeItem::Raw {
                    material_id,
                    quantity,
                } => match self.materials.get(material_id) {
                    Some(material) => material_lines.push(MaterialLine {
                        material_id: material_id.clone(),
                        name: Some(material.name.clone()),
                        quantity: *quantity,
                        cost: (material.cost_per_unit * *quantity).round_cents(),
                    }),
                    None => {
                        warn!(sku = %sku, material_id = %material_id, "Material not found, costed at zero");
                        warnings.push(CostWarning::MissingMaterial {
                            sku: sku.clone(),
                            material_id: material_id.clone(),
                        });
                        material_lines.push(MaterialLine {
                            material_id: material_id.clone(),
                            name: None,
                            quantity: *quantity,
                            cost: Money::zero(),
                        });
                    }
                },
                RecipeItem::Component {
                    component_sku,
                    quantity,
                } => match self.products.get(component_sku) {
                    Some(component) => {
                        let sub = self.resolve_on_path(component, path, resolved)?;
                        component_intrinsic += (sub.intrinsic_value * *quantity).round_cents();
                        component_lines.push(ComponentLine {
                            component_sku: normalize_sku(component_sku),
                            quantity: *quantity,
                            unit_cost: sub.total,
                            cost: (sub.total * *quantity).round_cents(),
                        });
                        for warning in sub.warnings {
                            if !warnings.contains(&warning) {
                                warnings.push(warning);
                            }
                        }
                    }
                    None => {
                        warn!(sku = %sku, component_sku = %component_sku, "Component not found, costed at zero");
                        warnings.push(CostWarning::MissingComponent {
                            sku: sku.clone(),
                            component_sku: normalize_sku(component_sku),
                        });
                        component_lines.push(ComponentLine {
                            component_sku: normalize_sku(component_sku),
                            quantity: *quantity,
                            unit_cost: Money::zero(),
                            cost: Money::zero(),
                        });
                    }
                },
            }
        }

        let materials: Money = material_lines.iter().map(|l| l.cost).sum();
        let components: Money = component_lines.iter().map(|l| l.cost).sum();
        let labor_detail = self.recompute_labor(product);
        let labor = labor_detail.total();
        let total = metal + materials + components + labor;

        debug!(sku = %sku, total = %total, "Resolved in-house cost");

        Ok(CostBreakdown {
            sku,
            production: ProductionMode::InHouse,
            metal,
            materials,
            material_lines,
            components,
            component_lines,
            labor,
            labor_detail: Some(labor_detail),
            purchase: Money::zero(),
            total,
            intrinsic_value: metal + materials + component_intrinsic,
            warnings,
            supplier_analysis: None,
        })
    }

    /// Imported cost: the quote, audited against the in-house counterfactual.
    fn purchase_cost(
        &self,
        product: &Product,
        path: &mut Vec<String>,
        resolved: &mut Resolved,
    ) -> CostResult<CostBreakdown> {
        let theoretical = self.make_cost(product, path, resolved)?;
        let mut warnings = theoretical.warnings.clone();

        let (purchase, supplier_analysis) = match product.supplier_cost {
            Some(quote) => {
                let analysis = analyze_supplier_value(
                    quote,
                    theoretical.total,
                    theoretical.intrinsic_value,
                    &self.config.verdict,
                );
                debug!(
                    sku = %theoretical.sku,
                    verdict = %analysis.verdict,
                    premium_percent = %analysis.premium_percent,
                    "Audited supplier quote"
                );
                (quote.round_cents(), Some(analysis))
            }
            None => {
                warn!(sku = %theoretical.sku, "Imported product has no supplier quote");
                warnings.push(CostWarning::MissingSupplierQuote {
                    sku: theoretical.sku.clone(),
                });
                (Money::zero(), None)
            }
        };

        Ok(CostBreakdown {
            sku: theoretical.sku,
            production: ProductionMode::Imported,
            metal: Money::zero(),
            materials: Money::zero(),
            material_lines: Vec::new(),
            components: Money::zero(),
            component_lines: Vec::new(),
            labor: Money::zero(),
            labor_detail: None,
            purchase,
            total: purchase,
            intrinsic_value: theoretical.intrinsic_value,
            warnings,
            supplier_analysis,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
