//! # Settings
//!
//! Inputs that are not part of a product record.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GlobalSettings  (owned by the persistence layer, edited by staff)     │
//! │  ├── spot_price_per_gram   market price of the metal                   │
//! │  └── loss_percentage       fabrication waste surcharge                 │
//! │                                                                         │
//! │  EngineConfig    (deployment tunables, loaded by the app)              │
//! │  ├── rates       casting / plating / setting / technician schedule     │
//! │  ├── verdict     supplier premium cut points                           │
//! │  └── sku         range expansion ceiling                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Global Settings
// =============================================================================

/// Shop-wide values read by the cost engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GlobalSettings {
    /// Metal spot price per gram.
    pub spot_price_per_gram: Money,

    /// Fabrication waste surcharge, in percent (10 = +10% metal).
    #[ts(type = "string")]
    pub loss_percentage: Decimal,

    /// Label width in millimetres. Used by print layouts only.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub label_width_mm: Option<Decimal>,

    /// Label height in millimetres. Used by print layouts only.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub label_height_mm: Option<Decimal>,
}

impl GlobalSettings {
    /// Settings with no label dimensions.
    pub fn new(spot_price_per_gram: Money, loss_percentage: Decimal) -> Self {
        GlobalSettings {
            spot_price_per_gram,
            loss_percentage,
            label_width_mm: None,
            label_height_mm: None,
        }
    }

    /// `1 + loss/100`.
    pub fn loss_factor(&self) -> Decimal {
        Decimal::ONE + self.loss_percentage / Decimal::ONE_HUNDRED
    }

    /// Validates the settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spot_price_per_gram.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "spot_price_per_gram".to_string(),
                min: "0".to_string(),
                max: "∞".to_string(),
            });
        }
        crate::validation::validate_percentage("loss_percentage", self.loss_percentage)
    }
}

// =============================================================================
// Cost Rates
// =============================================================================

/// One band of the technician schedule.
///
/// Applies to primary weights up to and including `up_to_grams`; the last
/// band has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TechnicianTier {
    #[ts(type = "string | null")]
    pub up_to_grams: Option<Decimal>,
    pub rate_per_gram: Money,
}

/// Per-gram and per-unit labor rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostRates {
    /// Casting, charged on total (primary + secondary) weight.
    #[serde(default = "default_casting_per_gram")]
    pub casting_per_gram: Money,

    /// Plating, charged on the plated weight.
    #[serde(default = "default_plating_per_gram")]
    pub plating_per_gram: Money,

    /// Stone setting, charged per stone unit in the recipe.
    #[serde(default = "default_setting_per_stone")]
    pub setting_per_stone: Money,

    /// Technician schedule on primary weight, lightest band first.
    #[serde(default = "default_technician_schedule")]
    pub technician_schedule: Vec<TechnicianTier>,
}

fn default_casting_per_gram() -> Money {
    Money::from_cents(20)
}

fn default_plating_per_gram() -> Money {
    Money::from_cents(35)
}

fn default_setting_per_stone() -> Money {
    Money::from_cents(25)
}

fn default_technician_schedule() -> Vec<TechnicianTier> {
    vec![
        TechnicianTier {
            up_to_grams: Some(dec!(2.2)),
            rate_per_gram: Money::from_cents(130),
        },
        TechnicianTier {
            up_to_grams: Some(dec!(4.2)),
            rate_per_gram: Money::from_cents(90),
        },
        TechnicianTier {
            up_to_grams: Some(dec!(8.2)),
            rate_per_gram: Money::from_cents(70),
        },
        TechnicianTier {
            up_to_grams: None,
            rate_per_gram: Money::from_cents(50),
        },
    ]
}

impl Default for CostRates {
    fn default() -> Self {
        CostRates {
            casting_per_gram: default_casting_per_gram(),
            plating_per_gram: default_plating_per_gram(),
            setting_per_stone: default_setting_per_stone(),
            technician_schedule: default_technician_schedule(),
        }
    }
}

impl CostRates {
    /// Technician rate for a primary weight. Zero if the schedule is empty.
    pub fn technician_rate(&self, grams: Decimal) -> Money {
        self.technician_schedule
            .iter()
            .find(|tier| tier.up_to_grams.map_or(true, |max| grams <= max))
            .or_else(|| self.technician_schedule.last())
            .map_or(Money::zero(), |tier| tier.rate_per_gram)
    }

    /// Validates the rates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("casting_per_gram", self.casting_per_gram),
            ("plating_per_gram", self.plating_per_gram),
            ("setting_per_stone", self.setting_per_stone),
        ];
        for (field, rate) in rates {
            if rate.is_negative() {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: "0".to_string(),
                    max: "∞".to_string(),
                });
            }
        }

        let bounds: Vec<Decimal> = self
            .technician_schedule
            .iter()
            .filter_map(|t| t.up_to_grams)
            .collect();
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ValidationError::InvalidFormat {
                field: "technician_schedule".to_string(),
                reason: "bands must be in increasing weight order".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Verdict Thresholds
// =============================================================================

/// Cut points, in percent premium over theoretical make cost.
///
/// ```text
///   premium% ≤ excellent_max  → Excellent
///   premium% ≤ fair_max       → Fair
///   premium% ≤ expensive_max  → Expensive
///   otherwise                 → Overpriced
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VerdictThresholds {
    #[ts(type = "string")]
    pub excellent_max: Decimal,
    #[ts(type = "string")]
    pub fair_max: Decimal,
    #[ts(type = "string")]
    pub expensive_max: Decimal,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        VerdictThresholds {
            excellent_max: Decimal::ZERO,
            fair_max: dec!(20),
            expensive_max: dec!(50),
        }
    }
}

impl VerdictThresholds {
    /// Cut points must be strictly increasing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.excellent_max >= self.fair_max || self.fair_max >= self.expensive_max {
            return Err(ValidationError::InvalidFormat {
                field: "verdict".to_string(),
                reason: "excellent_max < fair_max < expensive_max".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// SKU Rules
// =============================================================================

/// Limits for bulk SKU entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkuRules {
    /// Ranges spanning more SKUs than this stay literal.
    #[serde(default = "default_max_range_span")]
    pub max_range_span: u32,
}

fn default_max_range_span() -> u32 {
    crate::DEFAULT_MAX_RANGE_SPAN
}

impl Default for SkuRules {
    fn default() -> Self {
        SkuRules {
            max_range_span: default_max_range_span(),
        }
    }
}

// =============================================================================
// Engine Config
// =============================================================================

/// All engine tunables.
///
/// ## Example (TOML, as loaded by the CLI)
/// ```toml
/// [rates]
/// casting_per_gram = "0.20"
/// plating_per_gram = "0.35"
///
/// [verdict]
/// excellent_max = "0"
/// fair_max = "20"
/// expensive_max = "50"
///
/// [sku]
/// max_range_span = 1000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineConfig {
    #[serde(default)]
    pub rates: CostRates,
    #[serde(default)]
    pub verdict: VerdictThresholds,
    #[serde(default)]
    pub sku: SkuRules,
}

impl EngineConfig {
    /// Validates every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.rates.validate()?;
        self.verdict.validate()?;
        if self.sku.max_range_span == 0 {
            return Err(ValidationError::MustBePositive {
                field: "max_range_span".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
