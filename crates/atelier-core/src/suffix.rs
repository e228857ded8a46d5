//! # Suffix Decoder
//!
//! Splits a variant suffix into a `(finish, stone)` pair.
//!
//! ## Match Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. finish prefix (longest first) + remainder that is empty or an      │
//! │     exact stone code            "PKR" → Patina + Carnelian             │
//! │                                                                         │
//! │  2. whole suffix as an exact stone code                                │
//! │                                 "TG"  → Lustre + Tiger's Eye           │
//! │                                 "PR"  → Lustre + Pearl (P + "R" fails) │
//! │                                                                         │
//! │  3. partial: longest finish prefix, then longest stone prefix of the   │
//! │     rest; anything left over is reported as `remainder`                │
//! │                                 "XQNZ" → Gold Plated + Onyx, "Z" left  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! When a suffix decodes completely both ways (finish + stone, and one
//! longer stone code), rule 1 wins: the finish split is taken.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::dictionary::{
    CodeDictionary, FinishCode, Gender, PlatingType, StoneCode, DEFAULT_FINISH, NO_STONE,
};

/// One decoded half of a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedSegment {
    pub code: String,
    pub name: String,
}

impl From<&FinishCode> for DecodedSegment {
    fn from(f: &FinishCode) -> Self {
        DecodedSegment {
            code: f.code.to_string(),
            name: f.name.to_string(),
        }
    }
}

impl From<&StoneCode> for DecodedSegment {
    fn from(s: &StoneCode) -> Self {
        DecodedSegment {
            code: s.code.to_string(),
            name: s.name.to_string(),
        }
    }
}

/// Result of decoding a suffix.
///
/// Unmatched halves hold the defaults (Lustre finish, no stone) rather than
/// being absent; `finish_known`/`stone_known` say which halves matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuffixDecoding {
    pub finish: DecodedSegment,
    pub stone: DecodedSegment,
    pub plating: PlatingType,
    pub finish_known: bool,
    pub stone_known: bool,
    /// Trailing text no code matched.
    pub remainder: String,
}

impl SuffixDecoding {
    fn build(finish: Option<&FinishCode>, stone: Option<&StoneCode>, remainder: &str) -> Self {
        let finish_def = finish.unwrap_or(&DEFAULT_FINISH);
        SuffixDecoding {
            finish: finish_def.into(),
            stone: stone.unwrap_or(&NO_STONE).into(),
            plating: finish_def.plating,
            finish_known: finish.is_some(),
            stone_known: stone.is_some(),
            remainder: remainder.to_string(),
        }
    }

    /// True when every character was consumed by a known code.
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty() && (self.finish_known || self.stone_known)
    }

    /// Human-readable label, e.g. `Patina - Carnelian` or `Gold Plated`.
    pub fn description(&self) -> String {
        if self.stone_known {
            format!("{} - {}", self.finish.name, self.stone.name)
        } else {
            self.finish.name.clone()
        }
    }
}

/// Decodes a suffix against the standard dictionary.
///
/// ## Example
/// ```rust
/// use atelier_core::dictionary::Gender;
/// use atelier_core::suffix::decode_suffix;
///
/// let d = decode_suffix("PKR", Gender::Men);
/// assert_eq!(d.finish.name, "Patina");
/// assert_eq!(d.stone.name, "Carnelian");
/// ```
pub fn decode_suffix(suffix: &str, gender: Gender) -> SuffixDecoding {
    decode_suffix_with(&CodeDictionary::standard(), suffix, gender)
}

/// Decodes a suffix against the given dictionary.
pub fn decode_suffix_with(dict: &CodeDictionary, suffix: &str, gender: Gender) -> SuffixDecoding {
    let suffix = suffix.trim().to_uppercase();
    if suffix.is_empty() {
        return SuffixDecoding::build(None, None, "");
    }

    let finishes = dict.finishes_longest_first();

    // 1. finish + (nothing | exact stone)
    for &finish in &finishes {
        if let Some(rest) = suffix.strip_prefix(finish.code) {
            if rest.is_empty() {
                debug!(suffix = %suffix, finish = finish.code, "Suffix decoded as finish");
                return SuffixDecoding::build(Some(finish), None, "");
            }
            if let Some(stone) = dict.stone(rest, gender) {
                debug!(suffix = %suffix, finish = finish.code, stone = stone.code, "Suffix decoded as finish + stone");
                return SuffixDecoding::build(Some(finish), Some(stone), "");
            }
        }
    }

    // 2. whole suffix as stone
    if let Some(stone) = dict.stone(&suffix, gender) {
        debug!(suffix = %suffix, stone = stone.code, "Suffix decoded as stone");
        return SuffixDecoding::build(None, Some(stone), "");
    }

    // 3. partial
    let finish = finishes
        .into_iter()
        .find(|f| suffix.starts_with(f.code));
    let rest = finish.map_or(suffix.as_str(), |f| &suffix[f.code.len()..]);
    let stone = longest_stone_prefix(dict, rest, gender);
    let remainder = stone.map_or(rest, |s| &rest[s.code.len()..]);

    debug!(suffix = %suffix, remainder = %remainder, "Suffix decoded partially");
    SuffixDecoding::build(finish, stone, remainder)
}

/// Longest stone code that prefixes `text`. Ties keep table order.
fn longest_stone_prefix(
    dict: &CodeDictionary,
    text: &str,
    gender: Gender,
) -> Option<&'static StoneCode> {
    dict.stone_tables(gender)
        .into_iter()
        .flat_map(|table| table.iter())
        .filter(|s| !s.code.is_empty() && text.starts_with(s.code))
        .fold(None, |best: Option<&'static StoneCode>, s| match best {
            Some(b) if b.code.len() >= s.code.len() => Some(b),
            _ => Some(s),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
