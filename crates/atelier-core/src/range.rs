//! # SKU Range Expander
//!
//! Bulk-entry helpers for collection membership and imports.
//!
//! ```text
//! "MN050S-MN063S"
//!   ├── left   MN │ 050 │ S
//!   └── right  MN │ 063 │ S
//!              ▲           ▲
//!              └─ must match ─┘
//!
//! → MN050S, MN051S, ... MN063S   (14 SKUs, padded to width 3)
//! ```
//!
//! Nothing here fails. A token that is not a safe range comes back as itself.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::settings::SkuRules;

/// One side of a range: `PREFIX` + `DIGITS` + optional `SUFFIX`.
static RANGE_SIDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+)(\d+)([A-Z]*)$").expect("range side pattern is valid")
});

struct RangeSide<'a> {
    prefix: &'a str,
    digits: &'a str,
    suffix: &'a str,
}

fn split_side(side: &str) -> Option<RangeSide<'_>> {
    let caps = RANGE_SIDE.captures(side)?;
    Some(RangeSide {
        prefix: caps.get(1)?.as_str(),
        digits: caps.get(2)?.as_str(),
        suffix: caps.get(3)?.as_str(),
    })
}

/// Expands `PREFIXnnnSUFFIX-PREFIXmmmSUFFIX` into every SKU in the range.
///
/// Returns the token unexpanded when:
/// - it has no `-`, or either side is not `PREFIX` + digits + `SUFFIX`
/// - the prefixes or suffixes differ
/// - start is greater than end
/// - the range holds more than `rules.max_range_span` SKUs
///
/// Numbers are zero-padded to the width of the start numeral.
///
/// ## Example
/// ```rust
/// use atelier_core::range::expand_sku_range;
/// use atelier_core::settings::SkuRules;
///
/// let skus = expand_sku_range("MN050S-MN052S", &SkuRules::default());
/// assert_eq!(skus, vec!["MN050S", "MN051S", "MN052S"]);
///
/// let literal = expand_sku_range("AB005-CD010", &SkuRules::default());
/// assert_eq!(literal, vec!["AB005-CD010"]);
/// ```
pub fn expand_sku_range(token: &str, rules: &SkuRules) -> Vec<String> {
    let token = token.trim();
    if token.is_empty() {
        return Vec::new();
    }
    let literal = || vec![token.to_string()];

    let upper = token.to_uppercase();
    let Some((left, right)) = upper.split_once('-') else {
        return literal();
    };
    let (Some(start), Some(end)) = (split_side(left), split_side(right)) else {
        return literal();
    };
    if start.prefix != end.prefix || start.suffix != end.suffix {
        return literal();
    }

    let (Ok(first), Ok(last)) = (start.digits.parse::<u64>(), end.digits.parse::<u64>()) else {
        return literal();
    };
    if first > last || last - first >= u64::from(rules.max_range_span) {
        debug!(token = %token, max = rules.max_range_span, "Range left unexpanded");
        return literal();
    }

    let width = start.digits.len();
    let skus: Vec<String> = (first..=last)
        .map(|n| format!("{}{:0width$}{}", start.prefix, n, start.suffix, width = width))
        .collect();
    debug!(token = %token, count = skus.len(), "Range expanded");
    skus
}

/// Expands a pasted block of SKUs.
///
/// Tokens are separated by whitespace, commas or semicolons. Each token is
/// uppercased and range-expanded; duplicates are dropped, keeping the first
/// occurrence.
///
/// ## Example
/// ```rust
/// use atelier_core::range::parse_bulk_skus;
/// use atelier_core::settings::SkuRules;
///
/// let skus = parse_bulk_skus("xr1, XR1; DA5-DA6\nxr1", &SkuRules::default());
/// assert_eq!(skus, vec!["XR1", "DA5", "DA6"]);
/// ```
pub fn parse_bulk_skus(text: &str, rules: &SkuRules) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .flat_map(|t| expand_sku_range(&t.to_uppercase(), rules))
        .filter(|sku| seen.insert(sku.clone()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
