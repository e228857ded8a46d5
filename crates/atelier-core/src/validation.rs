//! # Validation Module
//!
//! Input checks for the form and CLI boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form / CLI                                                    │
//! │  ├── Deserialization (types, required JSON fields)                     │
//! │  └── THIS MODULE: field rules before a record is saved                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine                                                        │
//! │  ├── Unknown codes and references → fallback values + warnings         │
//! │  └── Circular recipes → CostError                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine itself never rejects a record; these checks are for callers
//! that want to refuse bad input before it is stored.
//!
//! ## Usage
//! ```rust
//! use atelier_core::validation::{validate_sku, validate_quantity};
//! use rust_decimal_macros::dec;
//!
//! validate_sku("XR2020PKR").unwrap();
//! validate_quantity("quantity", dec!(2)).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Product, RecipeItem};
use crate::{MAX_SKU_LENGTH, MAX_WEIGHT_GRAMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_SKU_LENGTH`] characters
/// - ASCII letters and digits only
///
/// ## Example
/// ```rust
/// use atelier_core::validation::validate_sku;
///
/// assert!(validate_sku("DA1005P").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("DA-1005").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if !sku.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters and numbers".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a metal weight in grams: `0 ≤ w ≤ MAX_WEIGHT_GRAMS`.
pub fn validate_weight(field: &str, grams: Decimal) -> ValidationResult<()> {
    if grams < Decimal::ZERO || grams > Decimal::from(MAX_WEIGHT_GRAMS) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_WEIGHT_GRAMS.to_string(),
        });
    }
    Ok(())
}

/// Validates a recipe quantity. Must be greater than zero.
pub fn validate_quantity(field: &str, quantity: Decimal) -> ValidationResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a percentage in `0..=100`.
pub fn validate_percentage(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product record before it is saved.
///
/// Checks the SKU, both weights, every recipe quantity and a present
/// supplier quote. Returns the first failure.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_sku(&product.sku)?;
    validate_weight("weight_g", product.weight_g)?;
    if let Some(secondary) = product.secondary_weight_g {
        validate_weight("secondary_weight_g", secondary)?;
    }

    for item in &product.recipe {
        let field = match item {
            RecipeItem::Raw { material_id, .. } => {
                if material_id.trim().is_empty() {
                    return Err(ValidationError::Required {
                        field: "material_id".to_string(),
                    });
                }
                format!("quantity of {}", material_id)
            }
            RecipeItem::Component { component_sku, .. } => {
                validate_sku(component_sku)?;
                format!("quantity of {}", component_sku)
            }
        };
        validate_quantity(&field, item.quantity())?;
    }

    if let Some(quote) = product.supplier_cost {
        if quote.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "supplier_cost".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("XR2020").is_ok());
        assert!(validate_sku(" xr2020pkr ").is_ok());
        assert!(matches!(
            validate_sku("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_sku(&"A".repeat(MAX_SKU_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            validate_sku("XR 2020"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight("weight_g", dec!(0)).is_ok());
        assert!(validate_weight("weight_g", dec!(12.5)).is_ok());
        assert!(validate_weight("weight_g", dec!(-0.1)).is_err());
        assert!(validate_weight("weight_g", dec!(100000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("q", dec!(0.5)).is_ok());
        assert!(validate_quantity("q", dec!(0)).is_err());
        assert!(validate_quantity("q", dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("loss", dec!(0)).is_ok());
        assert!(validate_percentage("loss", dec!(100)).is_ok());
        assert!(validate_percentage("loss", dec!(100.01)).is_err());
        assert!(validate_percentage("loss", dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_product() {
        let mut p = Product::new("XR2020", dec!(10));
        p.recipe = vec![RecipeItem::raw("STN-KR", dec!(2))];
        assert!(validate_product(&p).is_ok());

        p.recipe.push(RecipeItem::component("PN100", dec!(0)));
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::MustBePositive {
                field: "quantity of PN100".to_string()
            })
        );

        let mut p = Product::new("XR2020", dec!(10));
        p.supplier_cost = Some(Money::from_cents(-1));
        assert!(validate_product(&p).is_err());

        let p = Product::new("", dec!(10));
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Required { .. })
        ));
    }
}
