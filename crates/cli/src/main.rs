//! s3upload - push a local directory tree to an S3 bucket
//!
//! Only files that are missing from the bucket or whose content differs are
//! uploaded. Each run lists the bucket once and walks the tree once.

mod commands;
mod exit_code;
mod legacy;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::upload::{self, UploadArgs};
use crate::output::OutputConfig;

/// Upload new and changed files from a local directory to S3
#[derive(Parser, Debug)]
#[command(name = "s3upload", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    upload: UploadArgs,

    /// Print extra log messages
    #[arg(long)]
    verbose: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_from(legacy::normalize_args(std::env::args_os()));

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{e:#}");
    }

    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    let code = upload::execute(cli.upload, output_config).await;
    std::process::exit(code.as_i32());
}

/// Log filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,s3upload={level},s3upload_core={level},s3upload_s3={level}")
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
