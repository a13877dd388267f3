// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp replay`: fold a sequence of progress reports into a fresh progress.

use anyhow::Result;
use clap::Args;
use fp_core::{ExecutionProgress, MissionPlan, ReportOutcome};
use serde::Serialize;
use std::path::PathBuf;

use super::read_mission;
use crate::context::Context;
use crate::output::{format_or_json, write_progress};

#[derive(Args)]
pub struct ReplayArgs {
    /// Plan file or authored-items JSON
    pub plan: PathBuf,
    /// Executed command indices, in arrival order
    #[arg(long = "report", value_delimiter = ',', required = true)]
    pub reports: Vec<usize>,
    /// Recovery resource ID attached to every report
    #[arg(long)]
    pub recovery: Option<String>,
    /// Append a return-to-launch command when reading authored items
    #[arg(long)]
    pub rtl: bool,
    /// Print the outcome of every report
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
pub struct ReportLine {
    pub index: usize,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Replay {
    pub commands: usize,
    pub reports: Vec<ReportLine>,
    pub progress: ExecutionProgress,
}

pub fn replay(mission: &MissionPlan, reports: &[usize], recovery: Option<&str>) -> Replay {
    let mut progress = ExecutionProgress::new();
    let reports = reports
        .iter()
        .map(|&index| match progress.apply(mission, index, recovery.map(str::to_string)) {
            ReportOutcome::Applied => ReportLine { index, applied: true, ignored: None },
            ReportOutcome::Ignored(reason) => {
                ReportLine { index, applied: false, ignored: Some(reason.to_string()) }
            }
        })
        .collect();
    Replay { commands: mission.len(), reports, progress }
}

pub fn handle(args: ReplayArgs, ctx: &Context) -> Result<()> {
    let mission = read_mission(&args.plan, args.rtl || ctx.config.return_to_launch)?;
    let result = replay(&mission, &args.reports, args.recovery.as_deref());
    format_or_json(ctx.format, &result, |out| {
        if args.verbose {
            for line in &result.reports {
                match &line.ignored {
                    None => writeln!(out, "report {}: applied", line.index)?,
                    Some(reason) => writeln!(out, "report {}: ignored ({reason})", line.index)?,
                }
            }
        }
        write_progress(out, &result.progress)
    })
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
