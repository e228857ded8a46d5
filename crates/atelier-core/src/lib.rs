//! # atelier-core: SKU & Cost Resolution Engine
//!
//! This crate is the **heart** of Atelier. It decodes manufacturer SKUs and
//! rolls up manufacturing costs as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Product form / bulk repricing / CLI                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data in, plain data out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ atelier-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   SKU side                      Cost side                       │   │
//! │  │   ┌────────────┐ ┌──────────┐   ┌──────────┐ ┌──────────────┐  │   │
//! │  │   │ dictionary │ │  suffix  │   │   cost   │ │   variant    │  │   │
//! │  │   │    sku     │ │  range   │   │  labor   │ │   supplier   │  │   │
//! │  │   └────────────┘ └──────────┘   └──────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     Persistence (external): products, materials, settings      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dictionary`] - Finish and stone code tables
//! - [`suffix`] - Variant suffix decoder
//! - [`sku`] - SKU prefix grammar and master/variant analyzer
//! - [`range`] - Bulk-entry range expansion
//! - [`money`] - Decimal money with line-level rounding
//! - [`types`] - Products, materials, recipes
//! - [`catalog`] - Keyed catalog views
//! - [`labor`] - Overridable labor lines
//! - [`cost`] - Recursive cost resolution
//! - [`variant`] - Variant cost estimates
//! - [`supplier`] - Supplier quote audit
//! - [`settings`] - Global settings and engine tunables
//! - [`validation`] - Input rules for callers
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inputs, same outputs, on every keystroke
//! 2. **No I/O**: catalogs and settings are passed in by the caller
//! 3. **Decimal Money**: every cost line is rounded to cents before summing
//! 4. **Fallbacks, not failures**: only a circular recipe is an error
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::{analyze_sku, Gender};
//!
//! let a = analyze_sku("XR2020PKR", Some(Gender::Men));
//! assert!(a.is_variant);
//! assert_eq!(a.master_sku, "XR2020");
//! assert_eq!(a.variant_description.as_deref(), Some("Patina - Carnelian"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod cost;
pub mod dictionary;
pub mod error;
pub mod labor;
pub mod money;
pub mod range;
pub mod settings;
pub mod sku;
pub mod suffix;
pub mod supplier;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{MaterialCatalog, ProductCatalog};
pub use cost::{CostBreakdown, CostEngine, CostWarning, RepriceOutcome, MAX_RECIPE_DEPTH};
pub use dictionary::{CodeDictionary, Gender, PlatingType};
pub use error::{CostError, CostResult, ValidationError};
pub use labor::{LaborCost, LaborField, LaborInputs, LaborKind};
pub use money::Money;
pub use range::{expand_sku_range, parse_bulk_skus};
pub use settings::{CostRates, EngineConfig, GlobalSettings, SkuRules, VerdictThresholds};
pub use sku::{analyze_sku, normalize_sku, parse_sku, Category, SkuAnalysis, SkuInfo};
pub use suffix::{decode_suffix, SuffixDecoding};
pub use supplier::{analyze_supplier_value, SupplierAnalysis, Verdict};
pub use types::*;
pub use variant::{estimate_all_variants, estimate_variant, VariantEstimate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest number of SKUs a single range token may expand to.
pub const DEFAULT_MAX_RANGE_SPAN: u32 = 1000;

/// Longest SKU accepted at the input boundary.
pub const MAX_SKU_LENGTH: usize = 50;

/// Heaviest metal weight accepted at the input boundary, in grams.
pub const MAX_WEIGHT_GRAMS: u32 = 10_000;
