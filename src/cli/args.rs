//! Command line argument parsing for the storequery CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// storequery - product search query construction and filter inspection
#[derive(Parser, Debug, Clone)]
#[command(name = "storequery")]
#[command(about = "Build and inspect product search requests and facet filter state")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct StoreQueryArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl StoreQueryArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary plus pretty JSON.
    Human,
    /// Compact JSON only.
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the JSON search request a query produces
    #[command(name = "build-query")]
    BuildQuery(BuildQueryArgs),

    /// Parse a filter fragment into its three representations
    #[command(name = "parse-filters")]
    ParseFilters(ParseFiltersArgs),
}

/// Arguments for building a search request
#[derive(Parser, Debug, Clone)]
pub struct BuildQueryArgs {
    /// Free-text query ("*" matches all)
    #[arg(short, long, default_value = "*")]
    pub query: String,

    /// Query-string fragment carrying filter/sort parameters, as emitted by
    /// facet links (e.g. "filter.name=regularPrice&regularPrice.type=range&regularPrice.from=100")
    #[arg(short, long, default_value = "", value_name = "PARAMS")]
    pub params: String,
}

/// Arguments for parsing filter parameters
#[derive(Parser, Debug, Clone)]
pub struct ParseFiltersArgs {
    /// Query-string fragment carrying the filter parameters
    #[arg(value_name = "PARAMS")]
    pub params: String,
}
