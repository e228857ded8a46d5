//! `atelier parse` - decode SKUs without touching a catalog.

use atelier_core::{analyze_sku, Gender, SkuAnalysis};
use clap::Args;

use crate::error::CliResult;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// SKUs to decode
    #[arg(required = true)]
    pub skus: Vec<String>,

    /// Product line, for gender-specific stone codes (men, women, unisex)
    #[arg(short, long)]
    pub gender: Option<Gender>,
}

pub fn execute(args: &ParseArgs) -> CliResult<Vec<SkuAnalysis>> {
    Ok(analyze_all(&args.skus, args.gender))
}

/// Analyzes each SKU, skipping blanks.
pub fn analyze_all(skus: &[String], gender: Option<Gender>) -> Vec<SkuAnalysis> {
    skus.iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| analyze_sku(s, gender))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_all() {
        let skus = vec!["xr2020pkr".to_string(), " ".to_string(), "DA1005".to_string()];
        let out = analyze_all(&skus, None);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].master_sku, "XR2020");
        assert_eq!(out[0].suffix, "PKR");
        assert!(!out[1].is_variant);
    }
}
