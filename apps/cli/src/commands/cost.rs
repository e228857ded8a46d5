//! `atelier cost` - full cost breakdown of one product.

use std::path::PathBuf;

use atelier_core::{CostBreakdown, Money};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::snapshot::Workspace;

#[derive(Debug, Args)]
pub struct CostArgs {
    /// Catalog snapshot (JSON)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Master SKU to cost
    pub sku: String,
}

/// Breakdown plus the margin it implies at the stored selling price.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
    pub selling_price: Money,
    pub margin_percent: Decimal,
}

pub fn execute(args: &CostArgs, config: &AppConfig) -> CliResult<CostReport> {
    let workspace = Workspace::open(&args.catalog, config)?;
    cost_report(&workspace, &args.sku)
}

pub fn cost_report(workspace: &Workspace, sku: &str) -> CliResult<CostReport> {
    let product = workspace.product(sku)?;
    let breakdown = workspace.engine().resolve(product)?;

    // Margin as it would read once the total is saved as the active price.
    let priced = breakdown.apply_to(product);
    info!(
        sku = %breakdown.sku,
        total = %breakdown.total,
        warnings = breakdown.warnings.len(),
        "Resolved product cost"
    );

    Ok(CostReport {
        selling_price: priced.selling_price,
        margin_percent: priced.margin_percent(),
        breakdown,
    })
}
