//! # CLI Layer
//!
//! One possible client for roster. This is the only place that:
//! - Knows about stdout and stderr
//! - Parses arguments
//! - Formats records for humans
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: per-command handlers that call the API and print
//! - `render`: plain-text tables and detail views

mod commands;
mod render;
pub mod setup;

use anyhow::Result;
use clap::Parser;
use rosterapp::init::initialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use setup::Cli;

/// Log to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(cli.data.clone())?;
    commands::dispatch(&mut ctx, cli.command)
}
