//! `atelier variant` - cost estimates for variants of a master product.
//!
//! Accepts either a master SKU (estimates every stored variant, or the
//! suffixes given with `--suffix`) or a full variant SKU such as
//! `XR2020PKR`, which is split with the SKU analyzer first.

use std::path::PathBuf;

use atelier_core::{analyze_sku, estimate_variant, Money, VariantEstimate};
use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::snapshot::Workspace;

#[derive(Debug, Args)]
pub struct VariantArgs {
    /// Catalog snapshot (JSON)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Master or variant SKU
    pub sku: String,

    /// Suffixes to estimate instead of the stored variants
    #[arg(short, long = "suffix")]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub master_sku: String,
    pub master_total: Money,
    pub variants: Vec<VariantEstimate>,
}

pub fn execute(args: &VariantArgs, config: &AppConfig) -> CliResult<VariantReport> {
    let workspace = Workspace::open(&args.catalog, config)?;
    variant_report(&workspace, &args.sku, &args.suffixes)
}

pub fn variant_report(
    workspace: &Workspace,
    sku: &str,
    suffixes: &[String],
) -> CliResult<VariantReport> {
    let (master, suffixes) = match workspace.products.get(sku) {
        Some(master) if suffixes.is_empty() => (
            master,
            master.variants.iter().map(|v| v.suffix.clone()).collect(),
        ),
        Some(master) => (master, suffixes.to_vec()),
        None => {
            let analysis = analyze_sku(sku, None);
            if !analysis.is_variant {
                return Err(CliError::ProductNotFound(analysis.sku));
            }
            let master = workspace.product(&analysis.master_sku)?;
            let mut wanted = vec![analysis.suffix];
            wanted.extend(suffixes.iter().cloned());
            (master, wanted)
        }
    };

    let engine = workspace.engine();
    let master_cost = engine.resolve(master)?;
    let variants = suffixes
        .iter()
        .map(|suffix| estimate_variant(&engine, master, &master_cost, suffix))
        .collect();

    Ok(VariantReport {
        master_sku: master_cost.sku.clone(),
        master_total: master_cost.total,
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::sample_workspace;

    #[test]
    fn test_stored_variants() {
        let ws = sample_workspace();
        let report = variant_report(&ws, "XR2020", &[]).unwrap();
        assert_eq!(report.master_total, Money::from_cents(1732));

        let suffixes: Vec<&str> = report.variants.iter().map(|v| v.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["PKR", "XTG"]);
        // Same stone as the master.
        assert_eq!(report.variants[0].total, report.master_total);
        // 2 × (1.00 - 0.40) stone swap + 10g × 0.35 plating
        assert_eq!(
            report.variants[1].total,
            report.master_total + Money::from_cents(120) + Money::from_cents(350)
        );
    }

    #[test]
    fn test_variant_sku_is_split() {
        let ws = sample_workspace();
        let report = variant_report(&ws, "xr2020xtg", &[]).unwrap();
        assert_eq!(report.master_sku, "XR2020");
        assert_eq!(report.variants.len(), 1);
        assert_eq!(report.variants[0].description, "Gold Plated - Tiger's Eye");
    }

    #[test]
    fn test_explicit_suffixes() {
        let ws = sample_workspace();
        let report = variant_report(&ws, "XR2020", &["TG".to_string()]).unwrap();
        assert_eq!(report.variants.len(), 1);
        assert_eq!(
            report.variants[0].total,
            report.master_total + Money::from_cents(120)
        );
    }

    #[test]
    fn test_unknown_master() {
        let ws = sample_workspace();
        assert!(matches!(
            variant_report(&ws, "QQ77", &[]),
            Err(CliError::ProductNotFound(_))
        ));
    }
}
