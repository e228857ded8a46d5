//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  ├── CostError        - Structural BOM failures (cycles, depth)        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  atelier-cli errors (app)                                              │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: CostError | ValidationError → CliError → stderr / exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Unknown prefixes, unknown suffix segments and missing material or
//! component references are resolved to fallback values (generic category,
//! default finish/stone, zero-cost line plus a [`crate::cost::CostWarning`]).
//! The product form calls the engine on every keystroke and must never
//! hard-fail on partial input. Only a circular recipe is surfaced here,
//! because a silently wrong number would end up on an invoice.

use thiserror::Error;

// =============================================================================
// Cost Error
// =============================================================================

/// Failures of the cost resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    /// A product's recipe references itself, directly or through a chain of
    /// components.
    ///
    /// ## When This Occurs
    /// ```text
    /// RING-A recipe ──► PEND-B
    ///                     │
    ///                     ▼
    ///                   RING-A   ← already on the path
    ///
    /// CircularRecipe { sku: "RING-A", path: ["RING-A", "PEND-B", "RING-A"] }
    /// ```
    /// The caller should refuse to save the price and highlight `sku`.
    #[error("Circular recipe detected at {sku}: {}", path.join(" -> "))]
    CircularRecipe { sku: String, path: Vec<String> },

    /// Component nesting exceeded [`crate::cost::MAX_RECIPE_DEPTH`].
    #[error("Recipe for {sku} nests deeper than {depth} levels")]
    RecipeTooDeep { sku: String, depth: usize },
}

impl CostError {
    /// The SKU the caller should highlight.
    pub fn sku(&self) -> Option<&str> {
        match self {
            CostError::CircularRecipe { sku, .. } | CostError::RecipeTooDeep { sku, .. } => {
                Some(sku)
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used at the form/CLI boundary before a record is handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., lowercase-only SKU body, stray symbols).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CostError.
pub type CostResult<T> = Result<T, CostError>;

// =============================================================================
// Unit Tests
// =============================================================================
