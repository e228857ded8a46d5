//! # Supplier Value Analyzer
//!
//! Audits a supplier quote against what the same piece would cost to make
//! in the workshop.
//!
//! ```text
//!  intrinsic value        theoretical make cost        supplier quote
//!  (metal + materials)    (+ components + labor)
//! ───────┼──────────────────────────┼─────────────────────────┼────────► €
//!                                   └──────── premium ────────┘
//!
//!  premium %  = premium / theoretical × 100     (0 when theoretical is 0)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::settings::VerdictThresholds;

/// Classification of a supplier premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Fair,
    Expensive,
    Overpriced,
}

impl Verdict {
    /// Places a premium percentage against the configured cut points.
    pub fn classify(premium_percent: Decimal, thresholds: &VerdictThresholds) -> Verdict {
        if premium_percent <= thresholds.excellent_max {
            Verdict::Excellent
        } else if premium_percent <= thresholds.fair_max {
            Verdict::Fair
        } else if premium_percent <= thresholds.expensive_max {
            Verdict::Expensive
        } else {
            Verdict::Overpriced
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Excellent => write!(f, "excellent"),
            Verdict::Fair => write!(f, "fair"),
            Verdict::Expensive => write!(f, "expensive"),
            Verdict::Overpriced => write!(f, "overpriced"),
        }
    }
}

/// Result of auditing a supplier quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierAnalysis {
    pub supplier_cost: Money,
    pub theoretical_make_cost: Money,
    /// Metal and materials only, no labor.
    pub intrinsic_value: Money,
    /// Quote minus theoretical make cost. Negative when the quote is cheaper.
    pub premium: Money,
    #[ts(type = "string")]
    pub premium_percent: Decimal,
    pub verdict: Verdict,
}

/// Compares a supplier quote with the in-house counterfactual.
///
/// ## Example
/// ```rust
/// use atelier_core::money::Money;
/// use atelier_core::settings::VerdictThresholds;
/// use atelier_core::supplier::{analyze_supplier_value, Verdict};
///
/// let a = analyze_supplier_value(
///     Money::from_cents(2500),
///     Money::from_cents(1000),
///     Money::from_cents(600),
///     &VerdictThresholds::default(),
/// );
/// assert_eq!(a.premium, Money::from_cents(1500));
/// assert_eq!(a.verdict, Verdict::Overpriced);
/// ```
pub fn analyze_supplier_value(
    supplier_cost: Money,
    theoretical_make_cost: Money,
    intrinsic_value: Money,
    thresholds: &VerdictThresholds,
) -> SupplierAnalysis {
    let premium = (supplier_cost - theoretical_make_cost).round_cents();
    let premium_percent = premium.percent_of(theoretical_make_cost);

    SupplierAnalysis {
        supplier_cost,
        theoretical_make_cost,
        intrinsic_value,
        premium,
        premium_percent,
        verdict: Verdict::classify(premium_percent, thresholds),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
