// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp run`: drive a stored flight plan through one mission run.

use anyhow::Result;
use clap::{Args, ValueEnum};
use fp_core::FlightPlanState;
use fp_engine::{MissionProgressTracker, RunOutcome};
use std::sync::Arc;

use super::find_flight_plan;
use crate::color;
use crate::context::Context;
use crate::output::{format_or_json, write_progress};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Ending {
    /// Completed if the last command was executed, stopped otherwise
    Auto,
    Completed,
    Stopped,
    /// Drop the run without archiving its progress
    Abandon,
}

#[derive(Args)]
pub struct RunArgs {
    /// Flight plan ID or prefix
    pub id: String,
    /// Executed command indices, in arrival order
    #[arg(long = "report", value_delimiter = ',')]
    pub reports: Vec<usize>,
    #[arg(long)]
    pub recovery: Option<String>,
    #[arg(long, value_enum, default_value_t = Ending::Auto)]
    pub ending: Ending,
}

pub async fn handle(args: RunArgs, ctx: &Context) -> Result<()> {
    let manager = Arc::new(ctx.open_manager()?);
    let plan = find_flight_plan(&manager, &args.id).await?;
    let tracker = MissionProgressTracker::new(Arc::clone(&manager));

    let run_id = tracker.start_run(&plan);
    for &index in &args.reports {
        tracker.report(&run_id, index, args.recovery.clone());
    }
    let progress = tracker.progress(&run_id).unwrap_or_default();

    let outcome = match args.ending {
        Ending::Abandon => None,
        Ending::Completed => Some(RunOutcome::Completed),
        Ending::Stopped => Some(RunOutcome::Stopped),
        Ending::Auto if progress.is_complete() => Some(RunOutcome::Completed),
        Ending::Auto => Some(RunOutcome::Stopped),
    };
    let finished = match outcome {
        Some(outcome) => tracker.finish(&run_id, outcome),
        None => {
            tracker.abandon(&run_id);
            None
        }
    };
    manager.flush().await;

    let state = finished.as_ref().map_or(FlightPlanState::Flying, |p| p.state);
    format_or_json(ctx.format, &progress, |out| {
        writeln!(out, "{} {} {}", color::header("run"), run_id, color::state(state))?;
        write_progress(out, &progress)
    })
}
