//! # Labor Costs
//!
//! Five labor lines, each either derived from a formula or pinned by staff.
//!
//! ## Recompute Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  form edit (weight, plating, recipe)                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  LaborInputs::from_product ──► LaborCost::recompute(inputs, rates)      │
//! │                                        │                                │
//! │              ┌─────────────────────────┴──────────────────────┐         │
//! │              ▼                                                ▼         │
//! │     Auto(_)  → Auto(formula output)           Manual(v) → Manual(v)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formulas
//! | Line              | Formula                                              |
//! |-------------------|------------------------------------------------------|
//! | casting           | (primary + secondary weight) × casting rate          |
//! | setting           | stone units in the recipe × setting rate             |
//! | technician        | primary weight × schedule rate for that weight       |
//! | plating primary   | primary weight × plating rate, if the primary metal  |
//! |                   | is plated                                            |
//! | plating secondary | secondary weight × plating rate, if plated at all    |
//!
//! Two-tone pieces plate only the secondary metal when one is recorded;
//! otherwise the primary weight carries the plating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::MaterialCatalog;
use crate::dictionary::PlatingType;
use crate::money::Money;
use crate::settings::CostRates;
use crate::types::{Product, RecipeItem};

// =============================================================================
// Labor Field
// =============================================================================

/// One overridable labor line.
///
/// `Auto` holds the last formula output and is replaced on every recompute.
/// `Manual` is pinned and survives recompute untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum LaborField {
    Auto(Money),
    Manual(Money),
}

impl Default for LaborField {
    fn default() -> Self {
        LaborField::Auto(Money::zero())
    }
}

impl LaborField {
    pub fn value(&self) -> Money {
        match self {
            LaborField::Auto(v) | LaborField::Manual(v) => *v,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, LaborField::Manual(_))
    }

    fn refreshed(self, formula: Money) -> LaborField {
        match self {
            LaborField::Auto(_) => LaborField::Auto(formula),
            manual @ LaborField::Manual(_) => manual,
        }
    }
}

/// Names a labor line for [`LaborCost::pin`] and [`LaborCost::unpin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LaborKind {
    Casting,
    Setting,
    Technician,
    PlatingPrimary,
    PlatingSecondary,
}

impl LaborKind {
    pub const ALL: [LaborKind; 5] = [
        LaborKind::Casting,
        LaborKind::Setting,
        LaborKind::Technician,
        LaborKind::PlatingPrimary,
        LaborKind::PlatingSecondary,
    ];
}

// =============================================================================
// Labor Inputs
// =============================================================================

/// Everything the labor formulas read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborInputs {
    pub weight_g: Decimal,
    pub secondary_weight_g: Option<Decimal>,
    pub plating: PlatingType,
    /// Stone units in the recipe (sum of quantities of stone materials).
    pub stone_count: Decimal,
}

impl LaborInputs {
    /// Reads the formula inputs off a product.
    ///
    /// Recipe lines whose material is missing from the catalog do not count
    /// as stones.
    pub fn from_product(product: &Product, materials: &MaterialCatalog) -> Self {
        let stone_count = product
            .recipe
            .iter()
            .filter_map(|item| match item {
                RecipeItem::Raw {
                    material_id,
                    quantity,
                } => materials
                    .get(material_id)
                    .filter(|m| m.is_stone())
                    .map(|_| *quantity),
                RecipeItem::Component { .. } => None,
            })
            .sum();

        LaborInputs {
            weight_g: product.weight_g,
            secondary_weight_g: product.secondary_weight_g,
            plating: product.plating,
            stone_count,
        }
    }

    /// Formula output for one line, rounded to cents.
    pub fn formula(&self, kind: LaborKind, rates: &CostRates) -> Money {
        let secondary = self.secondary_weight_g.unwrap_or_default();
        let raw = match kind {
            LaborKind::Casting => rates.casting_per_gram * (self.weight_g + secondary),
            LaborKind::Setting => rates.setting_per_stone * self.stone_count,
            LaborKind::Technician => rates.technician_rate(self.weight_g) * self.weight_g,
            LaborKind::PlatingPrimary if self.plates_primary() => {
                rates.plating_per_gram * self.weight_g
            }
            LaborKind::PlatingSecondary if self.plating.is_plated() => {
                rates.plating_per_gram * secondary
            }
            LaborKind::PlatingPrimary | LaborKind::PlatingSecondary => Money::zero(),
        };
        raw.round_cents()
    }

    fn plates_primary(&self) -> bool {
        match self.plating {
            PlatingType::None => false,
            PlatingType::GoldPlated | PlatingType::Platinum => true,
            PlatingType::TwoTone => self.secondary_weight_g.is_none(),
        }
    }
}

// =============================================================================
// Labor Cost
// =============================================================================

/// The labor lines of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct LaborCost {
    pub casting: LaborField,
    pub setting: LaborField,
    pub technician: LaborField,
    pub plating_primary: LaborField,
    pub plating_secondary: LaborField,
}

impl LaborCost {
    pub fn field(&self, kind: LaborKind) -> &LaborField {
        match kind {
            LaborKind::Casting => &self.casting,
            LaborKind::Setting => &self.setting,
            LaborKind::Technician => &self.technician,
            LaborKind::PlatingPrimary => &self.plating_primary,
            LaborKind::PlatingSecondary => &self.plating_secondary,
        }
    }

    fn field_mut(&mut self, kind: LaborKind) -> &mut LaborField {
        match kind {
            LaborKind::Casting => &mut self.casting,
            LaborKind::Setting => &mut self.setting,
            LaborKind::Technician => &mut self.technician,
            LaborKind::PlatingPrimary => &mut self.plating_primary,
            LaborKind::PlatingSecondary => &mut self.plating_secondary,
        }
    }

    /// Sum of all five lines.
    pub fn total(&self) -> Money {
        LaborKind::ALL.iter().map(|&k| self.field(k).value()).sum()
    }

    /// Returns a copy with every `Auto` line replaced by its formula output.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::labor::{LaborCost, LaborField, LaborInputs, LaborKind};
    /// use atelier_core::dictionary::PlatingType;
    /// use atelier_core::money::Money;
    /// use atelier_core::settings::CostRates;
    /// use rust_decimal_macros::dec;
    ///
    /// let mut labor = LaborCost::default();
    /// labor.pin(LaborKind::Technician, Money::from_cents(500));
    ///
    /// let inputs = LaborInputs {
    ///     weight_g: dec!(10),
    ///     secondary_weight_g: None,
    ///     plating: PlatingType::None,
    ///     stone_count: dec!(0),
    /// };
    /// let labor = labor.recompute(&inputs, &CostRates::default());
    /// assert_eq!(labor.casting, LaborField::Auto(Money::from_cents(200)));
    /// assert_eq!(labor.technician, LaborField::Manual(Money::from_cents(500)));
    /// ```
    pub fn recompute(&self, inputs: &LaborInputs, rates: &CostRates) -> LaborCost {
        let mut next = *self;
        for kind in LaborKind::ALL {
            let field = next.field_mut(kind);
            *field = field.refreshed(inputs.formula(kind, rates));
        }
        next
    }

    /// Pins a line to a manual value.
    pub fn pin(&mut self, kind: LaborKind, value: Money) {
        *self.field_mut(kind) = LaborField::Manual(value);
    }

    /// Releases a pinned line back to its formula.
    pub fn unpin(&mut self, kind: LaborKind, inputs: &LaborInputs, rates: &CostRates) {
        *self.field_mut(kind) = LaborField::Auto(inputs.formula(kind, rates));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
