//! # Domain Types
//!
//! Data contracts read by the engine. The persistence layer creates and
//! mutates these; the engine only reads them and hands back new values.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   RecipeItem    │   │    Material     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sku (key)      │──►│  Raw ───────────┼──►│  id (key)       │       │
//! │  │  weight_g       │   │  Component ─┐   │   │  cost_per_unit  │       │
//! │  │  production     │   └─────────────┼───┘   │  material_type  │       │
//! │  │  labor          │                 │       └─────────────────┘       │
//! │  │  variants       │◄────────────────┘  recursion edge                 │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductVariant  │   │ ProductionMode  │   │  MaterialType   │       │
//! │  │  suffix         │   │  InHouse        │   │  Stone  Cord    │       │
//! │  │  active_price   │   │  Imported       │   │  Chain  Enamel  │       │
//! │  │  selling_price  │   └─────────────────┘   │  Component      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products are keyed by SKU (compared uppercase), materials by `id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dictionary::{Gender, PlatingType};
use crate::labor::LaborCost;
use crate::money::Money;
use crate::sku::{alpha_prefix, normalize_sku, parse_sku, Category};

// =============================================================================
// Production Mode
// =============================================================================

/// Where a product comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductionMode {
    /// Cast and finished in the workshop. Costed from metal, recipe and labor.
    #[default]
    InHouse,
    /// Bought finished. Costed from the supplier quote.
    Imported,
}

// =============================================================================
// Material
// =============================================================================

/// Kind of raw material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Stone,
    Cord,
    Chain,
    Component,
    Enamel,
}

/// A purchasable raw material. Leaf cost source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub material_type: MaterialType,
    pub cost_per_unit: Money,
    /// Unit label for display ("pc", "cm", ...).
    pub unit: String,
    /// Stone code this material supplies in variant suffixes, e.g. `"KR"`.
    #[serde(default)]
    pub variant_code: Option<String>,
}

impl Material {
    /// Returns true if this is a stone.
    pub fn is_stone(&self) -> bool {
        self.material_type == MaterialType::Stone
    }
}

// =============================================================================
// Recipe
// =============================================================================

/// One line of a bill of materials.
///
/// ```json
/// { "kind": "raw", "material_id": "STN-KR", "quantity": "2" }
/// { "kind": "component", "component_sku": "PN100", "quantity": "1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeItem {
    /// A purchased material.
    Raw {
        material_id: String,
        #[ts(type = "string")]
        quantity: Decimal,
    },
    /// Another manufactured product.
    Component {
        component_sku: String,
        #[ts(type = "string")]
        quantity: Decimal,
    },
}

impl RecipeItem {
    pub fn raw(material_id: impl Into<String>, quantity: Decimal) -> Self {
        RecipeItem::Raw {
            material_id: material_id.into(),
            quantity,
        }
    }

    pub fn component(component_sku: impl Into<String>, quantity: Decimal) -> Self {
        RecipeItem::Component {
            component_sku: component_sku.into(),
            quantity,
        }
    }

    pub fn quantity(&self) -> Decimal {
        match self {
            RecipeItem::Raw { quantity, .. } | RecipeItem::Component { quantity, .. } => *quantity,
        }
    }
}

/// Mold consumption for in-house tooling. Carried, not costed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoldUsage {
    pub code: String,
    pub quantity: u32,
}

// =============================================================================
// Product Variant
// =============================================================================

/// A finish/stone variant stored under a master product.
///
/// Prices are independent of the master's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductVariant {
    /// Suffix appended to the master SKU, e.g. `"PKR"`.
    pub suffix: String,
    pub description: String,
    /// Cost.
    #[serde(default)]
    pub active_price: Money,
    #[serde(default)]
    pub selling_price: Money,
}

impl ProductVariant {
    /// Gross margin on the selling price, in percent. Zero when unpriced.
    pub fn margin_percent(&self) -> Decimal {
        (self.selling_price - self.active_price).percent_of(self.selling_price)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A master product.
///
/// ## Price Fields
/// - `active_price`: current cost, written back from the engine's total
/// - `draft_price`: cost pending approval, also written back
/// - `selling_price`: set by staff, never touched by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub prefix: String,
    pub category: Category,
    pub gender: Option<Gender>,

    /// Primary metal weight in grams.
    #[ts(type = "string")]
    pub weight_g: Decimal,
    /// Secondary metal weight in grams (two-tone pieces, findings).
    #[ts(type = "string | null")]
    pub secondary_weight_g: Option<Decimal>,
    pub plating: PlatingType,

    pub production: ProductionMode,
    pub supplier_id: Option<String>,
    /// Quoted purchase cost for imported products.
    pub supplier_cost: Option<Money>,

    pub recipe: Vec<RecipeItem>,
    pub labor: LaborCost,
    pub molds: Vec<MoldUsage>,
    pub variants: Vec<ProductVariant>,

    pub active_price: Money,
    pub draft_price: Money,
    pub selling_price: Money,
}

impl Product {
    /// Creates an in-house product, filling prefix, category and gender from
    /// the SKU grammar.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::types::Product;
    /// use atelier_core::sku::Category;
    /// use rust_decimal_macros::dec;
    ///
    /// let p = Product::new("xr2020", dec!(10));
    /// assert_eq!(p.sku, "XR2020");
    /// assert_eq!(p.prefix, "XR");
    /// assert_eq!(p.category, Category::Bracelet);
    /// ```
    pub fn new(sku: &str, weight_g: Decimal) -> Self {
        let sku = normalize_sku(sku);
        let info = parse_sku(&sku);
        Product {
            prefix: alpha_prefix(&sku).to_string(),
            category: info.category,
            gender: info.gender,
            weight_g,
            sku,
            ..Product::default()
        }
    }

    /// Primary plus secondary weight.
    pub fn total_weight(&self) -> Decimal {
        self.weight_g + self.secondary_weight_g.unwrap_or_default()
    }

    pub fn is_imported(&self) -> bool {
        self.production == ProductionMode::Imported
    }

    /// Gross margin of `selling_price` over `active_price`, in percent.
    pub fn margin_percent(&self) -> Decimal {
        (self.selling_price - self.active_price).percent_of(self.selling_price)
    }

    /// Stored variant by suffix (case-insensitive).
    pub fn variant(&self, suffix: &str) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.suffix.eq_ignore_ascii_case(suffix.trim()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_new_fills_sku_metadata() {
        let p = Product::new(" da1005 ", dec!(3.5));
        assert_eq!(p.sku, "DA1005");
        assert_eq!(p.prefix, "DA");
        assert_eq!(p.category, Category::Ring);
        assert_eq!(p.gender, Some(Gender::Women));
        assert_eq!(p.production, ProductionMode::InHouse);
    }

    #[test]
    fn test_total_weight() {
        let mut p = Product::new("XR1", dec!(10));
        assert_eq!(p.total_weight(), dec!(10));
        p.secondary_weight_g = Some(dec!(2.5));
        assert_eq!(p.total_weight(), dec!(12.5));
    }

    #[test]
    fn test_margin_guards_zero_selling_price() {
        let mut p = Product::new("XR1", dec!(10));
        p.active_price = Money::from_cents(500);
        assert_eq!(p.margin_percent(), Decimal::ZERO);

        p.selling_price = Money::from_cents(2000);
        assert_eq!(p.margin_percent(), dec!(75));
    }

    #[test]
    fn test_variant_margin() {
        let v = ProductVariant {
            suffix: "P".to_string(),
            description: "Patina".to_string(),
            active_price: Money::from_cents(300),
            selling_price: Money::from_cents(1200),
        };
        assert_eq!(v.margin_percent(), dec!(75));
    }

    #[test]
    fn test_variant_lookup_ignores_case() {
        let mut p = Product::new("XR1", dec!(10));
        p.variants.push(ProductVariant {
            suffix: "PKR".to_string(),
            description: "Patina - Carnelian".to_string(),
            active_price: Money::zero(),
            selling_price: Money::zero(),
        });
        assert!(p.variant("pkr").is_some());
        assert!(p.variant("X").is_none());
    }

    #[test]
    fn test_recipe_item_json_shape() {
        let json = r#"[
            { "kind": "raw", "material_id": "STN-KR", "quantity": "2" },
            { "kind": "component", "component_sku": "PN100", "quantity": "1" }
        ]"#;
        let items: Vec<RecipeItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0], RecipeItem::raw("STN-KR", dec!(2)));
        assert_eq!(items[1], RecipeItem::component("PN100", dec!(1)));
        assert_eq!(items[1].quantity(), dec!(1));
    }

    #[test]
    fn test_product_json_defaults() {
        let json = r#"{ "sku": "XR2020", "weight_g": "10" }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.weight_g, dec!(10));
        assert!(p.recipe.is_empty());
        assert_eq!(p.production, ProductionMode::InHouse);
        assert_eq!(p.labor.total(), Money::zero());
    }
}
