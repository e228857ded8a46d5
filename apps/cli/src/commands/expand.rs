//! `atelier expand` - turn a pasted SKU list into individual SKUs.

use std::io::Read;

use atelier_core::{parse_bulk_skus, SkuRules};
use clap::Args;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::CliResult;

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// SKUs and ranges such as `MN050S-MN063S`; read from stdin when omitted
    pub input: Vec<String>,
}

pub fn execute(args: &ExpandArgs, config: &AppConfig) -> CliResult<Vec<String>> {
    let text = if args.input.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.input.join(" ")
    };
    Ok(expand_text(&text, &config.sku))
}

pub fn expand_text(text: &str, rules: &SkuRules) -> Vec<String> {
    let skus = parse_bulk_skus(text, rules);
    debug!(count = skus.len(), "Expanded bulk SKU input");
    skus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_text() {
        let rules = SkuRules { max_range_span: 5 };
        assert_eq!(
            expand_text("DA8-DA10; xr1", &rules),
            vec!["DA8", "DA9", "DA10", "XR1"]
        );
        // Over the ceiling, kept literal.
        assert_eq!(expand_text("DA1-DA99", &rules), vec!["DA1-DA99"]);
    }
}
