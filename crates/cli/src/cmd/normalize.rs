//! Implementation of the `henge normalize` command.

use anyhow::Result;

use henge_lib::diagnostics::TracingSink;
use henge_lib::injection::normalize_destinations;

use crate::cmd::InjectionArgs;
use crate::output::{OutputFormat, format_injection, print_json};

pub fn cmd_normalize(inputs: InjectionArgs, format: OutputFormat) -> Result<()> {
  let config = inputs.resolve()?;
  let normalized = normalize_destinations(&config.working_dir, config.injections, &TracingSink);

  if format.is_json() {
    return print_json(&normalized);
  }

  for spec in normalized.iter() {
    println!("{}", format_injection(spec));
  }
  Ok(())
}
