//! # Variant Cost Estimator
//!
//! Estimates a variant's cost as a delta on its master's resolved cost, so
//! the form can price each suffix as it is typed without walking the recipe
//! graph again.
//!
//! ```text
//! master total ──┬── + stone substitution   suffix stone ≠ master stones
//!                │      (new stone − master stones) × same quantity
//!                │      + setting labor if the master had no stones
//!                │
//!                └── + plating labor        finish plates, per plating line
//!                                           the master left at zero
//!
//! estimate = max(0, master total + deltas)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cost::{CostBreakdown, CostEngine, CostWarning};
use crate::dictionary::{Gender, PlatingType};
use crate::labor::{LaborInputs, LaborKind};
use crate::money::Money;
use crate::sku::{normalize_sku, parse_sku};
use crate::suffix::decode_suffix;
use crate::types::{Material, Product, ProductVariant, RecipeItem};

/// Estimated cost of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantEstimate {
    pub suffix: String,
    pub description: String,
    pub plating: PlatingType,
    pub total: Money,
    pub warnings: Vec<CostWarning>,
}

impl VariantEstimate {
    /// Returns a copy of `variant` with the estimate written into
    /// `active_price`. The selling price is left alone.
    pub fn apply_to(&self, variant: &ProductVariant) -> ProductVariant {
        ProductVariant {
            active_price: self.total,
            ..variant.clone()
        }
    }
}

/// Estimates the cost of `master` + `suffix`.
///
/// `master_cost` must be the engine's breakdown for `master`. A suffix that
/// does not decode completely leaves the master total unchanged and adds a
/// [`CostWarning::UnrecognizedSuffix`].
pub fn estimate_variant(
    engine: &CostEngine<'_>,
    master: &Product,
    master_cost: &CostBreakdown,
    suffix: &str,
) -> VariantEstimate {
    let sku = normalize_sku(&master.sku);
    let suffix = normalize_sku(suffix);
    let gender = master
        .gender
        .or_else(|| parse_sku(&sku).gender)
        .unwrap_or(Gender::Unisex);
    let decoding = decode_suffix(&suffix, gender);

    let mut warnings = Vec::new();
    let mut total = master_cost.total;

    if !decoding.is_complete() {
        warn!(sku = %sku, suffix = %suffix, "Variant suffix does not decode");
        warnings.push(CostWarning::UnrecognizedSuffix {
            sku,
            suffix: suffix.clone(),
        });
        return VariantEstimate {
            suffix,
            description: decoding.description(),
            plating: PlatingType::None,
            total,
            warnings,
        };
    }

    if decoding.stone_known {
        match engine.materials.find_stone(&decoding.stone.code) {
            Some(stone) => total += stone_delta(engine, master, stone),
            None => warnings.push(CostWarning::UnknownStoneMaterial {
                sku: sku.clone(),
                stone_code: decoding.stone.code.clone(),
            }),
        }
    }

    if decoding.plating.is_plated() {
        let inputs = LaborInputs {
            plating: decoding.plating,
            ..LaborInputs::from_product(master, engine.materials)
        };
        let rates = &engine.config.rates;
        for kind in [LaborKind::PlatingPrimary, LaborKind::PlatingSecondary] {
            let costed = master_cost
                .labor_detail
                .is_some_and(|labor| !labor.field(kind).value().is_zero());
            if !costed {
                total += inputs.formula(kind, rates);
            }
        }
    }

    if total.is_negative() {
        total = Money::zero();
    }

    debug!(sku = %sku, suffix = %suffix, total = %total, "Estimated variant cost");

    VariantEstimate {
        suffix,
        description: decoding.description(),
        plating: decoding.plating,
        total,
        warnings,
    }
}

/// Estimates every variant stored on `master`, in stored order.
pub fn estimate_all_variants(
    engine: &CostEngine<'_>,
    master: &Product,
    master_cost: &CostBreakdown,
) -> Vec<VariantEstimate> {
    master
        .variants
        .iter()
        .map(|v| estimate_variant(engine, master, master_cost, &v.suffix))
        .collect()
}

/// Cost change from swapping the master's stones for `stone`.
fn stone_delta(engine: &CostEngine<'_>, master: &Product, stone: &Material) -> Money {
    let baseline: Vec<(&Material, Decimal)> = master
        .recipe
        .iter()
        .filter_map(|item| match item {
            RecipeItem::Raw {
                material_id,
                quantity,
            } => engine
                .materials
                .get(material_id)
                .filter(|m| m.is_stone())
                .map(|m| (m, *quantity)),
            RecipeItem::Component { .. } => None,
        })
        .collect();

    if baseline.iter().any(|(m, _)| m.id == stone.id) {
        return Money::zero();
    }

    if baseline.is_empty() {
        let added = stone.cost_per_unit.round_cents();
        let setting = if master.labor.setting.is_manual() {
            Money::zero()
        } else {
            engine.config.rates.setting_per_stone.round_cents()
        };
        return added + setting;
    }

    let quantity: Decimal = baseline.iter().map(|(_, q)| *q).sum();
    let removed: Money = baseline
        .iter()
        .map(|(m, q)| (m.cost_per_unit * *q).round_cents())
        .sum();
    (stone.cost_per_unit * quantity).round_cents() - removed
}

// =============================================================================
// Unit Tests
// =============================================================================
