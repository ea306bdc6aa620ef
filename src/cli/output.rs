//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, StoreQueryArgs};
use crate::error::Result;

/// Print a command result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &StoreQueryArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(result)?);
        }
    }
    Ok(())
}
