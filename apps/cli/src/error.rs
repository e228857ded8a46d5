//! # CLI Error Type
//!
//! Unified error type for `atelier` subcommands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► Result<T, CliError>                                        │
//! │                 │                                                       │
//! │    io / json / toml ───────────────┐                                    │
//! │    ValidationError (config, input) ├──► CliError ──► ErrorReport        │
//! │    CostError (circular recipe) ────┘        │            │              │
//! │                                             ▼            ▼              │
//! │                                       exit code     stderr JSON         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scripts driving the CLI read `code` from the report:
//! ```json
//! { "code": "CIRCULAR_RECIPE", "message": "Circular recipe detected at ..." }
//! ```

use atelier_core::{CostError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// SKU not in the catalog
    NotFound,

    /// Input or configuration failed validation
    ValidationError,

    /// Recipe references itself or nests too deep
    CircularRecipe,

    /// File could not be read
    IoError,

    /// File could not be parsed
    ParseError,
}

impl ErrorCode {
    /// Process exit code for this class of error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 2,
            ErrorCode::CircularRecipe => 4,
            ErrorCode::IoError | ErrorCode::ParseError => 1,
        }
    }
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Io(_) => ErrorCode::IoError,
            CliError::Json(_) | CliError::Toml(_) => ErrorCode::ParseError,
            CliError::Validation(_) => ErrorCode::ValidationError,
            CliError::Cost(_) => ErrorCode::CircularRecipe,
            CliError::ProductNotFound(_) => ErrorCode::NotFound,
        }
    }
}

/// What the operator sees on stderr when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    /// SKU to highlight, for recipe errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl From<&CliError> for ErrorReport {
    fn from(err: &CliError) -> Self {
        let sku = match err {
            CliError::Cost(cost) => cost.sku().map(str::to_string),
            CliError::ProductNotFound(sku) => Some(sku.clone()),
            _ => None,
        };
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
            sku,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
