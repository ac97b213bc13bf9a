//! Implementation of the `henge cleanup-script` command.
//!
//! Only injections not marked `keep` are truncated by the script.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use henge_lib::diagnostics::TracingSink;
use henge_lib::injection::{
  create_cleanup_script, create_cleanup_script_in, expand_injected_files, normalize_destinations,
  render_cleanup_script,
};

use crate::cmd::InjectionArgs;
use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_cleanup_script(inputs: InjectionArgs, print: bool, dir: Option<&Path>, format: OutputFormat) -> Result<()> {
  let config = inputs.resolve()?;
  let normalized = normalize_destinations(&config.working_dir, config.injections, &TracingSink);
  let files = expand_injected_files(&normalized.to_remove()).context("Failed to expand injections")?;
  let script_name = config.script_name.as_deref();

  if print {
    let body = render_cleanup_script(&files, script_name).context("Failed to render cleanup script")?;
    if format.is_json() {
      return print_json(&json!({ "script": body }));
    }
    print!("{}", body);
    return Ok(());
  }

  let path = match dir {
    Some(dir) => create_cleanup_script_in(dir, &files, script_name),
    None => create_cleanup_script(&files, script_name),
  }
  .context("Failed to write cleanup script")?;
  info!(path = %path.display(), files = files.len(), "cleanup script written");

  if format.is_json() {
    return print_json(&json!({ "path": path, "files": files.len() }));
  }

  print_success(&format!("Cleanup script for {} file(s) written", files.len()));
  println!("{}", path.display());
  Ok(())
}
