//! Fabryk field mapping CLI
//!
//! Command-line tool for resolving search field names and building index
//! documents from XML records.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use fabryk_fieldmap_cli::{Args, Settings, commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // `-v` wins over RUST_LOG; otherwise RUST_LOG, then warnings only.
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(args.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(args.mappings, args.compact);
    tracing::debug!(?settings, "Effective settings");

    let output = commands::run(args.command, &settings)?;
    println!("{output}");
    Ok(())
}
