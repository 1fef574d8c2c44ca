//! Output helpers for the Veritas CLI.

use serde::Serialize;

use crate::cli::args::{OutputFormat, VeritasArgs};
use crate::error::Result;

/// Print a command result in the selected output format.
///
/// Human mode prints the pre-rendered summary lines; JSON mode serializes
/// the result structure instead.
pub fn output_result<T: Serialize>(summary: &str, result: &T, args: &VeritasArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{summary}");
            }
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
