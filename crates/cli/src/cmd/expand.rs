//! Implementation of the `henge expand` command.
//!
//! Prints one container path per line for every file the injections create.

use anyhow::{Context, Result};

use henge_lib::diagnostics::TracingSink;
use henge_lib::injection::{expand_injected_files, normalize_destinations};

use crate::cmd::InjectionArgs;
use crate::output::{OutputFormat, print_json};

pub fn cmd_expand(inputs: InjectionArgs, format: OutputFormat) -> Result<()> {
  let config = inputs.resolve()?;
  let normalized = normalize_destinations(&config.working_dir, config.injections, &TracingSink);
  let files = expand_injected_files(&normalized).context("Failed to expand injections")?;

  if format.is_json() {
    return print_json(&files);
  }

  for file in &files {
    println!("{}", file.display());
  }
  Ok(())
}
