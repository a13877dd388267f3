// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `fp`: translate flight plans to drone command lists and track mission
//! progress.

mod color;
mod commands;
mod context;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{plan, replay, run, store};
use context::Context;
use exit_error::ExitError;
use output::OutputFormat;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FP_BUILD_HASH"), ")");

#[derive(Parser)]
#[command(name = "fp", version, long_version = LONG_VERSION, styles = color::styles())]
#[command(about = "Flight-plan mission translation and progress tracking")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
    output: OutputFormat,

    /// Config file (default: $FP_CONFIG, then ./fp.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate between authored items and plan files
    Plan(plan::PlanArgs),
    /// Replay progress reports against a plan, without storing anything
    Replay(replay::ReplayArgs),
    /// Fly a stored flight plan with a sequence of progress reports
    Run(run::RunArgs),
    /// Manage stored flight plans
    Store(store::StoreArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let ctx = Context::load(cli.config.as_deref(), cli.output)?;
    match command {
        Commands::Plan(args) => plan::handle(args.command, &ctx).await,
        Commands::Replay(args) => replay::handle(args, &ctx),
        Commands::Run(args) => run::handle(args, &ctx).await,
        Commands::Store(args) => store::handle(args.command, &ctx).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = dispatch(Cli::parse()).await {
        let code = e.downcast_ref::<ExitError>().map_or(1, |e| e.code);
        eprintln!("error: {e:#}");
        std::process::exit(code);
    }
}
