//! `atelier reprice` - resolve every catalog product after a settings change.
//!
//! ```text
//! snapshot ──► Workspace ──► reprice_catalog() ──┬──► RepriceReport (stdout)
//!                                                └──► updated snapshot (--output)
//! ```
//!
//! A product that fails (circular recipe) keeps its stored prices and is
//! listed under `failed`; the rest of the catalog is still repriced.
//!
//! Only the first record of a duplicated SKU is repriced. Later records are
//! listed under `duplicates` and written back unchanged.

use std::collections::HashMap;
use std::path::PathBuf;

use atelier_core::{estimate_all_variants, normalize_sku, Money, Product};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::snapshot::{CatalogSnapshot, Workspace};

#[derive(Debug, Args)]
pub struct RepriceArgs {
    /// Catalog snapshot (JSON)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Write the repriced snapshot here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepricedProduct {
    pub sku: String,
    pub previous: Money,
    pub total: Money,
    pub margin_percent: Decimal,
    pub variants: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepriceFailure {
    pub sku: String,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepriceReport {
    pub repriced: Vec<RepricedProduct>,
    pub failed: Vec<RepriceFailure>,
    /// SKUs whose later snapshot records were left unpriced.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<String>,
}

pub fn execute(args: &RepriceArgs, config: &AppConfig) -> CliResult<RepriceReport> {
    let snapshot = CatalogSnapshot::load(&args.catalog)?;
    let workspace = Workspace::new(snapshot.clone(), config);
    let (report, products) = reprice(&workspace);

    if let Some(path) = &args.output {
        let updated = CatalogSnapshot {
            products: merge_repriced(snapshot.products, products),
            ..snapshot
        };
        std::fs::write(path, serde_json::to_string_pretty(&updated)?)?;
        info!(?path, "Wrote repriced snapshot");
    }
    Ok(report)
}

/// Reprices every product and its stored variants.
///
/// Returns the report and the catalog with new prices applied, in catalog
/// order. Failed products come back unchanged.
pub fn reprice(workspace: &Workspace) -> (RepriceReport, Vec<Product>) {
    let engine = workspace.engine();
    let mut report = RepriceReport {
        repriced: Vec::new(),
        failed: Vec::new(),
        duplicates: workspace.products.duplicates().to_vec(),
    };
    let mut products = Vec::with_capacity(workspace.products.len());

    for (product, outcome) in workspace.products.iter().zip(engine.reprice_catalog()) {
        let breakdown = match outcome.result {
            Ok(breakdown) => breakdown,
            Err(e) => {
                let err = CliError::from(e);
                warn!(sku = %outcome.sku, error = %err, "Product not repriced");
                report.failed.push(RepriceFailure {
                    sku: outcome.sku,
                    code: err.code(),
                    message: err.to_string(),
                });
                products.push(product.clone());
                continue;
            }
        };

        let mut updated = breakdown.apply_to(product);
        let estimates = estimate_all_variants(&engine, product, &breakdown);
        for (variant, estimate) in updated.variants.iter_mut().zip(&estimates) {
            *variant = estimate.apply_to(variant);
        }

        let mut warnings: Vec<String> = breakdown.warnings.iter().map(|w| w.to_string()).collect();
        warnings.extend(
            estimates
                .iter()
                .flat_map(|e| e.warnings.iter().map(|w| w.to_string())),
        );

        report.repriced.push(RepricedProduct {
            sku: breakdown.sku.clone(),
            previous: product.active_price,
            total: breakdown.total,
            margin_percent: updated.margin_percent(),
            variants: estimates.len(),
            warnings,
        });
        products.push(updated);
    }

    info!(
        repriced = report.repriced.len(),
        failed = report.failed.len(),
        duplicates = report.duplicates.len(),
        "Catalog repriced"
    );
    (report, products)
}

/// Lays repriced products back over the snapshot records, in snapshot
/// order. The first record of each SKU is replaced; later ones are kept
/// as they were.
pub fn merge_repriced(original: Vec<Product>, repriced: Vec<Product>) -> Vec<Product> {
    let mut by_sku: HashMap<String, Product> = repriced
        .into_iter()
        .map(|p| (normalize_sku(&p.sku), p))
        .collect();
    original
        .into_iter()
        .map(|p| by_sku.remove(&normalize_sku(&p.sku)).unwrap_or(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::snapshot::tests::{sample_workspace, SAMPLE};

    #[test]
    fn test_reprice_keeps_going_past_a_cycle() {
        let ws = sample_workspace();
        let (report, products) = reprice(&ws);

        assert_eq!(report.repriced.len(), 1);
        assert_eq!(report.repriced[0].sku, "XR2020");
        assert_eq!(report.repriced[0].previous, Money::zero());
        assert_eq!(report.repriced[0].total, Money::from_cents(1732));
        assert_eq!(report.repriced[0].variants, 2);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].sku, "XR1");
        assert_eq!(report.failed[0].code, ErrorCode::CircularRecipe);

        assert_eq!(products.len(), 2);
        assert_eq!(products[1], *ws.product("XR1").unwrap());
    }

    #[test]
    fn test_reprice_writes_prices_back() {
        let ws = sample_workspace();
        let (_, products) = reprice(&ws);
        let bracelet = &products[0];

        assert_eq!(bracelet.active_price, Money::from_cents(1732));
        assert_eq!(bracelet.draft_price, Money::from_cents(1732));
        assert_eq!(bracelet.selling_price, Money::from_cents(4500));
        assert_eq!(bracelet.variants[0].active_price, Money::from_cents(1732));
        assert_eq!(bracelet.variants[1].active_price, Money::from_cents(2202));
    }

    #[test]
    fn test_reprice_is_a_fixed_point() {
        let ws = sample_workspace();
        let (_, products) = reprice(&ws);
        let again = Workspace {
            products: products.into_iter().collect(),
            ..ws
        };
        let (report, _) = reprice(&again);
        assert_eq!(report.repriced[0].previous, report.repriced[0].total);
    }

    #[test]
    fn test_duplicate_records_are_reported_and_kept() {
        let mut snapshot = CatalogSnapshot::from_json(SAMPLE).unwrap();
        let mut stale = snapshot.products[0].clone();
        stale.sku = "xr2020".to_string();
        stale.selling_price = Money::from_cents(9900);
        snapshot.products.push(stale.clone());

        let ws = Workspace::new(snapshot.clone(), &AppConfig::default());
        let (report, products) = reprice(&ws);
        assert_eq!(report.duplicates, vec!["XR2020"]);
        assert_eq!(report.repriced.len(), 1);

        let written = merge_repriced(snapshot.products, products);
        assert_eq!(written.len(), 3);
        assert_eq!(written[0].active_price, Money::from_cents(1732));
        assert_eq!(written[1].sku, "XR1");
        assert_eq!(written[2], stale);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["duplicates"], serde_json::json!(["XR2020"]));
    }
}
