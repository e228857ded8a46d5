//! # SKU Grammar
//!
//! Turns a manufacturer SKU into structured metadata.
//!
//! ## Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   X R 2 0 2 0 P K R                                                     │
//! │   └┬┘ └──┬──┘ └─┬─┘                                                     │
//! │ prefix  body  suffix                                                    │
//! │    │      │      └──► Suffix Decoder ──► finish + stone + plating      │
//! │    │      │                                                             │
//! │    └──────┴──► master SKU "XR2020"                                     │
//! │    │                                                                    │
//! │    └──► prefix tables ──► { category: Bracelet, gender: Men }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both entry points are total: unknown input degrades to a generic category
//! or a master classification, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::dictionary::{CodeDictionary, Gender, PlatingType};
use crate::suffix::decode_suffix_with;

// =============================================================================
// Category
// =============================================================================

/// Product category implied by a SKU prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ring,
    Bracelet,
    Necklace,
    Pendant,
    Earrings,
    Cross,
    Chain,
    Cufflinks,
    /// Sentinel for prefixes no table knows.
    #[default]
    Generic,
}

impl Category {
    /// Display label for form auto-fill.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ring => "Ring",
            Category::Bracelet => "Bracelet",
            Category::Necklace => "Necklace",
            Category::Pendant => "Pendant",
            Category::Earrings => "Earrings",
            Category::Cross => "Cross",
            Category::Chain => "Chain",
            Category::Cufflinks => "Cufflinks",
            Category::Generic => "Generic",
        }
    }
}

// =============================================================================
// Prefix Tables
// =============================================================================

struct PrefixRule {
    prefix: &'static str,
    category: Category,
}

const MEN_PREFIXES: &[PrefixRule] = &[
    PrefixRule { prefix: "XR", category: Category::Bracelet },
    PrefixRule { prefix: "RN", category: Category::Ring },
    PrefixRule { prefix: "PN", category: Category::Pendant },
    PrefixRule { prefix: "CR", category: Category::Cross },
    PrefixRule { prefix: "MN", category: Category::Necklace },
    PrefixRule { prefix: "KF", category: Category::Cufflinks },
];

const WOMEN_PREFIXES: &[PrefixRule] = &[
    PrefixRule { prefix: "DA", category: Category::Ring },
    PrefixRule { prefix: "BR", category: Category::Bracelet },
    PrefixRule { prefix: "PD", category: Category::Pendant },
    PrefixRule { prefix: "SK", category: Category::Earrings },
    PrefixRule { prefix: "KL", category: Category::Necklace },
    // Also in the men's table; the men's table is scanned first.
    PrefixRule { prefix: "CR", category: Category::Cross },
];

const UNISEX_PREFIXES: &[PrefixRule] = &[
    PrefixRule { prefix: "AL", category: Category::Chain },
];

/// Tables in scan order. First match wins.
const PREFIX_TABLES: &[(Gender, &[PrefixRule])] = &[
    (Gender::Men, MEN_PREFIXES),
    (Gender::Women, WOMEN_PREFIXES),
    (Gender::Unisex, UNISEX_PREFIXES),
];

/// `PREFIX` + `DIGITS` + anything.
static SKU_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+)(\d+)(.*)$").expect("SKU body pattern is valid")
});

// =============================================================================
// Parser
// =============================================================================

/// Category and product line of a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkuInfo {
    pub category: Category,
    pub gender: Option<Gender>,
}

impl SkuInfo {
    /// The fallback for prefixes no table knows.
    pub const fn generic() -> Self {
        SkuInfo {
            category: Category::Generic,
            gender: None,
        }
    }
}

/// Uppercases and strips all whitespace.
pub fn normalize_sku(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Leading alphabetic run of a normalized SKU.
pub(crate) fn alpha_prefix(sku: &str) -> &str {
    let end = sku
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map_or(sku.len(), |(i, _)| i);
    &sku[..end]
}

/// Maps a SKU's prefix to `{category, gender}`.
///
/// ## Example
/// ```rust
/// use atelier_core::sku::{parse_sku, Category};
/// use atelier_core::dictionary::Gender;
///
/// let info = parse_sku("XR2020");
/// assert_eq!(info.category, Category::Bracelet);
/// assert_eq!(info.gender, Some(Gender::Men));
///
/// assert_eq!(parse_sku("ZZ999").category, Category::Generic);
/// ```
pub fn parse_sku(raw: &str) -> SkuInfo {
    let sku = normalize_sku(raw);
    let prefix = alpha_prefix(&sku);
    if prefix.is_empty() {
        return SkuInfo::generic();
    }

    PREFIX_TABLES
        .iter()
        .find_map(|(gender, rules)| {
            rules
                .iter()
                .find(|r| r.prefix == prefix)
                .map(|r| SkuInfo {
                    category: r.category,
                    gender: Some(*gender),
                })
        })
        .unwrap_or_else(SkuInfo::generic)
}

// =============================================================================
// Master / Variant Analyzer
// =============================================================================

/// Structured result of analyzing a raw SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkuAnalysis {
    /// The normalized input.
    pub sku: String,
    pub info: SkuInfo,
    pub is_variant: bool,
    pub master_sku: String,
    /// Empty for masters.
    pub suffix: String,
    pub variant_description: Option<String>,
    pub detected_plating: PlatingType,
}

impl SkuAnalysis {
    fn master(sku: String, info: SkuInfo) -> Self {
        SkuAnalysis {
            master_sku: sku.clone(),
            sku,
            info,
            is_variant: false,
            suffix: String::new(),
            variant_description: None,
            detected_plating: PlatingType::None,
        }
    }
}

/// Splits a SKU into master and variant suffix using the standard dictionary.
///
/// `gender` is the known line of the product; when `None`, the gender from the
/// prefix tables is used, then [`Gender::Unisex`].
///
/// ## Example
/// ```rust
/// use atelier_core::sku::analyze_sku;
/// use atelier_core::dictionary::Gender;
///
/// let a = analyze_sku("DA1005P", Some(Gender::Women));
/// assert!(a.is_variant);
/// assert_eq!(a.master_sku, "DA1005");
/// assert_eq!(a.suffix, "P");
/// ```
pub fn analyze_sku(raw: &str, gender: Option<Gender>) -> SkuAnalysis {
    analyze_sku_with(&CodeDictionary::standard(), raw, gender)
}

/// Splits a SKU into master and variant suffix using the given dictionary.
///
/// A suffix only makes a variant when it decodes completely; otherwise the
/// whole string is kept as a master SKU.
pub fn analyze_sku_with(dict: &CodeDictionary, raw: &str, gender: Option<Gender>) -> SkuAnalysis {
    let sku = normalize_sku(raw);
    let info = parse_sku(&sku);

    let body = SKU_BODY
        .captures(&sku)
        .map(|caps| (format!("{}{}", &caps[1], &caps[2]), caps[3].to_string()));
    let Some((master_sku, suffix)) = body else {
        return SkuAnalysis::master(sku, info);
    };
    if suffix.is_empty() {
        return SkuAnalysis::master(sku, info);
    }

    let gender = gender.or(info.gender).unwrap_or(Gender::Unisex);
    let decoding = decode_suffix_with(dict, &suffix, gender);
    if !decoding.is_complete() {
        debug!(sku = %sku, suffix = %suffix, "Unrecognized suffix, treating as master");
        return SkuAnalysis::master(sku, info);
    }

    SkuAnalysis {
        suffix,
        master_sku,
        variant_description: Some(decoding.description()),
        detected_plating: decoding.plating,
        is_variant: true,
        info,
        sku,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_men_prefix() {
        let info = parse_sku("XR2020");
        assert_eq!(info.category, Category::Bracelet);
        assert_eq!(info.gender, Some(Gender::Men));
    }

    #[test]
    fn test_parse_women_prefix() {
        let info = parse_sku("da1005");
        assert_eq!(info.category, Category::Ring);
        assert_eq!(info.gender, Some(Gender::Women));
    }

    #[test]
    fn test_parse_unknown_prefix_is_generic() {
        assert_eq!(parse_sku("ZZ999"), SkuInfo::generic());
        assert_eq!(parse_sku("12345"), SkuInfo::generic());
        assert_eq!(parse_sku(""), SkuInfo::generic());
    }

    #[test]
    fn test_shared_prefix_first_table_wins() {
        let info = parse_sku("CR100");
        assert_eq!(info.category, Category::Cross);
        assert_eq!(info.gender, Some(Gender::Men));
    }

    #[test]
    fn test_prefix_must_match_whole_alpha_run() {
        // "XRA" is not "XR"
        assert_eq!(parse_sku("XRA100").category, Category::Generic);
    }

    #[test]
    fn test_analyze_variant() {
        let a = analyze_sku("DA1005P", Some(Gender::Women));
        assert!(a.is_variant);
        assert_eq!(a.master_sku, "DA1005");
        assert_eq!(a.suffix, "P");
        assert_eq!(a.variant_description.as_deref(), Some("Patina"));
        assert_eq!(a.detected_plating, PlatingType::None);
    }

    #[test]
    fn test_analyze_detects_plating() {
        let a = analyze_sku("xr2020xtg", None);
        assert!(a.is_variant);
        assert_eq!(a.master_sku, "XR2020");
        assert_eq!(a.suffix, "XTG");
        assert_eq!(a.detected_plating, PlatingType::GoldPlated);
        assert_eq!(
            a.variant_description.as_deref(),
            Some("Gold Plated - Tiger's Eye")
        );
    }

    #[test]
    fn test_analyze_master() {
        let a = analyze_sku("XR2020", None);
        assert!(!a.is_variant);
        assert_eq!(a.master_sku, "XR2020");
        assert!(a.suffix.is_empty());
        assert!(a.variant_description.is_none());
    }

    #[test]
    fn test_analyze_noise_suffix_stays_master() {
        let a = analyze_sku("XR2020QQ", None);
        assert!(!a.is_variant);
        assert_eq!(a.master_sku, "XR2020QQ");
    }

    #[test]
    fn test_analyze_uses_prefix_gender_when_unknown() {
        // KR is a men's stone; XR is a men's prefix.
        assert!(analyze_sku("XR2020KR", None).is_variant);
        // Forcing the women's line makes KR unknown.
        assert!(!analyze_sku("XR2020KR", Some(Gender::Women)).is_variant);
    }

    #[test]
    fn test_analyze_without_digits() {
        let a = analyze_sku("SAMPLE", None);
        assert!(!a.is_variant);
        assert_eq!(a.master_sku, "SAMPLE");
    }
}
