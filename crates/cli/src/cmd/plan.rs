//! Implementation of the `henge plan` command.
//!
//! Runs normalization, expansion and script generation in one go and prints
//! what the build orchestrator needs: the normalized injections, the files
//! that will exist in the container, and the cleanup script to stage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use henge_lib::diagnostics::TracingSink;
use henge_lib::injection::{InjectionList, create_cleanup_script, expand_partitioned, normalize_destinations};

use crate::cmd::InjectionArgs;
use crate::output::{OutputFormat, format_injection, print_info, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct PlanReport {
  working_dir: PathBuf,
  injections: InjectionList,
  files: Vec<PathBuf>,
  files_to_truncate: usize,
  cleanup_script: PathBuf,
}

pub fn cmd_plan(inputs: InjectionArgs, format: OutputFormat) -> Result<()> {
  let config = inputs.resolve()?;
  let normalized = normalize_destinations(&config.working_dir, config.injections, &TracingSink);

  let expansion = expand_partitioned(&normalized).context("Failed to expand injections")?;
  let script = create_cleanup_script(&expansion.to_truncate, config.script_name.as_deref())
    .context("Failed to write cleanup script")?;
  info!(path = %script.display(), files = expansion.to_truncate.len(), "cleanup script written");

  let report = PlanReport {
    working_dir: config.working_dir,
    injections: normalized,
    files_to_truncate: expansion.to_truncate.len(),
    files: expansion.files,
    cleanup_script: script,
  };

  if format.is_json() {
    return print_json(&report);
  }

  print_info(&format!("Working directory: {}", report.working_dir.display()));
  for spec in report.injections.iter() {
    println!("  {}", format_injection(spec));
  }
  print_stat("Injections", &report.injections.len().to_string());
  print_stat("Files", &report.files.len().to_string());
  print_stat("To truncate", &report.files_to_truncate.to_string());
  print_success(&format!("Cleanup script: {}", report.cleanup_script.display()));
  Ok(())
}
