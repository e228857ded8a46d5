//! # CLI Commands
//!
//! One module per subcommand. Each owns its clap `Args` struct, an
//! `execute` entry point that does the file I/O, and a pure function over a
//! [`Workspace`](crate::snapshot::Workspace) that the tests call directly.
//!
//! ## Command Structure
//! ```text
//! commands/
//! ├── parse.rs    ─ decode SKUs into master + variant parts
//! ├── expand.rs   ─ expand bulk-pasted SKU lists and ranges
//! ├── cost.rs     ─ full cost breakdown of one product
//! ├── variant.rs  ─ cost estimates for a product's variants
//! └── reprice.rs  ─ reprice the whole catalog, optionally write it back
//! ```
//!
//! Every command prints one JSON document on stdout.

pub mod cost;
pub mod expand;
pub mod parse;
pub mod reprice;
pub mod variant;

use serde::Serialize;

use crate::error::CliResult;

/// Writes `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
