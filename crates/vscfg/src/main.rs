//! vscfg - shared editor configuration installer
//!
//! This is the main entry point for the vscfg command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vscfg_core::LogConfig;

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    let log = LogConfig::from_flags(cli.verbose, cli.quiet);
    init_tracing(&log);

    let ctx = Context::load(&cli, log)?;

    match cli.command {
        Commands::Install(args) => commands::install::run(args, &ctx).await,
        Commands::Status(args) => commands::status::run(args, &ctx).await,
        Commands::Backup(command) => commands::backup::run(command, &ctx),
    }
}

/// Initialize tracing from the resolved verbosity
fn init_tracing(log: &LogConfig) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(log.filter_directive()))
        .init();
}
