//! # atelier-cli
//!
//! Command-line front end over `atelier-core`.
//!
//! ```text
//! atelier [--config atelier.toml] <command>
//!
//!   parse    XR2020PKR DA1005P --gender men
//!   expand   "MN050S-MN063S, XR1"
//!   cost     --catalog catalog.json XR2020
//!   variant  --catalog catalog.json XR2020 [--suffix PTG]
//!   reprice  --catalog catalog.json [--output repriced.json]
//! ```
//!
//! Results go to stdout as JSON. Logs go to stderr and follow `RUST_LOG`.

pub mod commands;
pub mod config;
pub mod error;
pub mod snapshot;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::print_json;
use crate::config::AppConfig;
use crate::error::CliResult;

#[derive(Debug, Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Jewelry SKU decoding and cost resolution")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split SKUs into master and variant parts
    Parse(commands::parse::ParseArgs),
    /// Expand a pasted SKU list, including ranges
    Expand(commands::expand::ExpandArgs),
    /// Cost breakdown of one product
    Cost(commands::cost::CostArgs),
    /// Cost estimates for a product's variants
    Variant(commands::variant::VariantArgs),
    /// Reprice the whole catalog
    Reprice(commands::reprice::RepriceArgs),
}

/// Runs one parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config)?;

    match &cli.command {
        Commands::Parse(args) => print_json(&commands::parse::execute(args)?),
        Commands::Expand(args) => print_json(&commands::expand::execute(args, &config)?),
        Commands::Cost(args) => print_json(&commands::cost::execute(args, &config)?),
        Commands::Variant(args) => print_json(&commands::variant::execute(args, &config)?),
        Commands::Reprice(args) => print_json(&commands::reprice::execute(args, &config)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Gender;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["atelier", "parse", "DA1005P", "--gender", "women"]).unwrap();
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.skus, vec!["DA1005P"]);
                assert_eq!(args.gender, Some(Gender::Women));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_gender_rejected() {
        assert!(Cli::try_parse_from(["atelier", "parse", "DA1", "--gender", "kids"]).is_err());
    }

    #[test]
    fn test_variant_suffixes_repeat() {
        let cli = Cli::try_parse_from([
            "atelier", "variant", "-c", "cat.json", "XR2020", "-s", "PKR", "-s", "XTG",
        ])
        .unwrap();
        match cli.command {
            Commands::Variant(args) => assert_eq!(args.suffixes, vec!["PKR", "XTG"]),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
