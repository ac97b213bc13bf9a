//! Injection inputs shared by every command.
//!
//! Inputs come from an optional config file and from flags. Flags win for
//! scalar values; `--inject` entries are appended after the file's list.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use henge_lib::config::InjectionConfig;
use henge_lib::injection::InjectionSpec;

#[derive(Debug, Args)]
pub struct InjectionArgs {
  /// Config file (TOML, or JSON when the extension is .json)
  #[arg(short, long)]
  pub config: Option<PathBuf>,

  /// Working directory of the image; relative destinations resolve against it
  #[arg(short, long)]
  pub workdir: Option<PathBuf>,

  /// Injection to stage, repeatable
  #[arg(short = 'i', long = "inject", value_name = "SOURCE[:DESTINATION]")]
  pub injections: Vec<InjectionSpec>,

  /// Container path of the cleanup script, truncated after the injected files
  #[arg(long)]
  pub script_name: Option<PathBuf>,
}

impl InjectionArgs {
  /// Merge the config file and flags into one validated config.
  pub fn resolve(self) -> Result<InjectionConfig> {
    let has_file = self.config.is_some();
    let mut config = match &self.config {
      Some(path) => InjectionConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))?,
      None => InjectionConfig::default(),
    };

    if let Some(workdir) = self.workdir {
      config.working_dir = workdir;
    } else if !has_file {
      bail!("No working directory given: pass --workdir or set working_dir in --config");
    }

    for spec in self.injections {
      config.injections.push(spec);
    }

    if self.script_name.is_some() {
      config.script_name = self.script_name;
    }

    config.validate().context("Invalid injection inputs")?;
    debug!(
      working_dir = %config.working_dir.display(),
      injections = config.injections.len(),
      "resolved injection inputs"
    );
    Ok(config)
  }
}
