//! # Code Dictionaries
//!
//! Static lookup tables for the variant suffix grammar.
//!
//! ```text
//! DA1005 PKR
//! ────── ───
//! master  │└┴── stone code  (gender-scoped: men's vs women's lines)
//!         └──── finish code (shared: P = patina, X = gold plate, ...)
//! ```
//!
//! Pure data. The matching rules live in [`crate::suffix`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Gender
// =============================================================================

/// Product line a SKU belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "men"),
            Gender::Women => write!(f, "women"),
            Gender::Unisex => write!(f, "unisex"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" | "m" | "male" => Ok(Gender::Men),
            "women" | "w" | "f" | "female" => Ok(Gender::Women),
            "unisex" | "u" => Ok(Gender::Unisex),
            other => Err(format!(
                "Unknown gender: '{}'. Valid options: men, women, unisex",
                other
            )),
        }
    }
}

// =============================================================================
// Plating Type
// =============================================================================

/// Surface treatment that costs plating labor.
///
/// Patina is an oxidation finish, not a plating, so it maps to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlatingType {
    #[default]
    None,
    GoldPlated,
    TwoTone,
    Platinum,
}

impl PlatingType {
    /// Returns true if this finish is billed as plating labor.
    pub fn is_plated(&self) -> bool {
        !matches!(self, PlatingType::None)
    }
}

// =============================================================================
// Code Tables
// =============================================================================

/// A finish segment of a variant suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishCode {
    pub code: &'static str,
    pub name: &'static str,
    pub plating: PlatingType,
}

/// A gemstone segment of a variant suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneCode {
    pub code: &'static str,
    pub name: &'static str,
}

/// Finish used when a suffix carries no finish segment.
pub const DEFAULT_FINISH: FinishCode = FinishCode {
    code: "",
    name: "Lustre",
    plating: PlatingType::None,
};

/// Stone used when a suffix carries no stone segment.
pub const NO_STONE: StoneCode = StoneCode {
    code: "",
    name: "None",
};

const FINISH_CODES: &[FinishCode] = &[
    DEFAULT_FINISH,
    FinishCode {
        code: "P",
        name: "Patina",
        plating: PlatingType::None,
    },
    FinishCode {
        code: "X",
        name: "Gold Plated",
        plating: PlatingType::GoldPlated,
    },
    FinishCode {
        code: "D",
        name: "Two-Tone",
        plating: PlatingType::TwoTone,
    },
    FinishCode {
        code: "H",
        name: "Platinum",
        plating: PlatingType::Platinum,
    },
];

const MEN_STONES: &[StoneCode] = &[
    StoneCode { code: "KR", name: "Carnelian" },
    StoneCode { code: "QN", name: "Onyx" },
    StoneCode { code: "LA", name: "Lapis Lazuli" },
    StoneCode { code: "TY", name: "Turquoise" },
    StoneCode { code: "TG", name: "Tiger's Eye" },
    StoneCode { code: "MA", name: "Malachite" },
    StoneCode { code: "AX", name: "Green Agate" },
    StoneCode { code: "GSU", name: "Grey Sunstone" },
    StoneCode { code: "BSU", name: "Black Sunstone" },
];

const WOMEN_STONES: &[StoneCode] = &[
    StoneCode { code: "PR", name: "Pearl" },
    StoneCode { code: "CO", name: "Coral" },
    StoneCode { code: "AK", name: "Aquamarine" },
    StoneCode { code: "LE", name: "White Zircon" },
    StoneCode { code: "MP", name: "Mother of Pearl" },
    StoneCode { code: "AM", name: "Amethyst" },
    StoneCode { code: "RZ", name: "Rose Zircon" },
    StoneCode { code: "CZ", name: "Cubic Zirconia" },
    StoneCode { code: "GAV", name: "Green Aventurine" },
];

// =============================================================================
// Dictionary
// =============================================================================

/// The set of code tables a suffix is decoded against.
///
/// [`CodeDictionary::standard`] holds the production tables; decoders take a
/// `&CodeDictionary` so alternative tables can be plugged in.
#[derive(Debug, Clone, Copy)]
pub struct CodeDictionary {
    pub finishes: &'static [FinishCode],
    pub men_stones: &'static [StoneCode],
    pub women_stones: &'static [StoneCode],
}

impl CodeDictionary {
    /// The built-in tables.
    pub const fn standard() -> Self {
        CodeDictionary {
            finishes: FINISH_CODES,
            men_stones: MEN_STONES,
            women_stones: WOMEN_STONES,
        }
    }

    /// Stone tables scanned for a gender, in priority order.
    pub fn stone_tables(&self, gender: Gender) -> Vec<&'static [StoneCode]> {
        match gender {
            Gender::Men => vec![self.men_stones],
            Gender::Women => vec![self.women_stones],
            Gender::Unisex => vec![self.men_stones, self.women_stones],
        }
    }

    /// Finish codes with a non-empty code, longest first.
    ///
    /// The sort is stable, so equal-length codes keep table order.
    pub fn finishes_longest_first(&self) -> Vec<&'static FinishCode> {
        let mut finishes: Vec<&'static FinishCode> =
            self.finishes.iter().filter(|f| !f.code.is_empty()).collect();
        finishes.sort_by(|a, b| b.code.len().cmp(&a.code.len()));
        finishes
    }

    /// Exact stone lookup for a gender.
    pub fn stone(&self, code: &str, gender: Gender) -> Option<&'static StoneCode> {
        self.stone_tables(gender)
            .into_iter()
            .flat_map(|table| table.iter())
            .find(|s| s.code == code)
    }

    /// Exact finish lookup. The empty code is the default finish.
    pub fn finish(&self, code: &str) -> Option<&'static FinishCode> {
        self.finishes.iter().find(|f| f.code == code)
    }
}

impl Default for CodeDictionary {
    fn default() -> Self {
        CodeDictionary::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("men".parse::<Gender>().unwrap(), Gender::Men);
        assert_eq!("Women".parse::<Gender>().unwrap(), Gender::Women);
        assert_eq!("u".parse::<Gender>().unwrap(), Gender::Unisex);
        assert!("kids".parse::<Gender>().is_err());
    }

    #[test]
    fn test_stone_lookup_is_gender_scoped() {
        let dict = CodeDictionary::standard();
        assert_eq!(dict.stone("KR", Gender::Men).unwrap().name, "Carnelian");
        assert!(dict.stone("KR", Gender::Women).is_none());
        assert_eq!(dict.stone("PR", Gender::Women).unwrap().name, "Pearl");
        assert!(dict.stone("PR", Gender::Men).is_none());
        // Unisex sees both tables
        assert!(dict.stone("KR", Gender::Unisex).is_some());
        assert!(dict.stone("PR", Gender::Unisex).is_some());
    }

    #[test]
    fn test_finish_lookup() {
        let dict = CodeDictionary::standard();
        assert_eq!(dict.finish("").unwrap().name, "Lustre");
        assert_eq!(dict.finish("X").unwrap().plating, PlatingType::GoldPlated);
        assert_eq!(dict.finish("P").unwrap().plating, PlatingType::None);
        assert!(dict.finish("Z").is_none());
    }

    #[test]
    fn test_finishes_skip_default() {
        let dict = CodeDictionary::standard();
        let finishes = dict.finishes_longest_first();
        assert!(finishes.iter().all(|f| !f.code.is_empty()));
        assert_eq!(finishes.len(), 4);
    }

    #[test]
    fn test_plating_is_plated() {
        assert!(!PlatingType::None.is_plated());
        assert!(PlatingType::GoldPlated.is_plated());
        assert!(PlatingType::TwoTone.is_plated());
        assert!(PlatingType::Platinum.is_plated());
    }
}
