mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::InjectionArgs;
use crate::output::OutputFormat;

/// henge - stage build secrets into containers and destroy them afterwards
#[derive(Parser)]
#[command(name = "henge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve relative injection destinations against the working directory
  Normalize {
    #[command(flatten)]
    inputs: InjectionArgs,
  },

  /// List every file the injections will create inside the container
  Expand {
    #[command(flatten)]
    inputs: InjectionArgs,
  },

  /// Write the script that truncates all injected files
  CleanupScript {
    #[command(flatten)]
    inputs: InjectionArgs,

    /// Print the script instead of writing it to a temporary file
    #[arg(long)]
    print: bool,

    /// Directory to create the script in (default: system temp directory)
    #[arg(long)]
    dir: Option<std::path::PathBuf>,
  },

  /// Run the whole pipeline and summarize the result
  Plan {
    #[command(flatten)]
    inputs: InjectionArgs,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Normalize { inputs } => cmd::cmd_normalize(inputs, cli.format),
    Commands::Expand { inputs } => cmd::cmd_expand(inputs, cli.format),
    Commands::CleanupScript { inputs, print, dir } => cmd::cmd_cleanup_script(inputs, print, dir.as_deref(), cli.format),
    Commands::Plan { inputs } => cmd::cmd_plan(inputs, cli.format),
  }
}
