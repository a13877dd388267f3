// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp plan`: build, import and export QGC plan files.

use anyhow::Result;
use clap::{Args, Subcommand};
use fp_core::{MissionItem, MissionPlan};
use std::path::{Path, PathBuf};

use super::{find_flight_plan, read_items};
use crate::context::Context;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Translate an authored-items JSON file into a plan file
    Build {
        /// JSON array of waypoints and actions
        items: PathBuf,
        /// Append a return-to-launch command
        #[arg(long)]
        rtl: bool,
        /// Waypoint acceptance radius in meters (default from config)
        #[arg(long, allow_negative_numbers = true)]
        acceptance_radius: Option<f64>,
        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read a plan file back into authored items
    Import {
        file: PathBuf,
        /// Also store the items as a new flight plan in this project
        #[arg(long, requires = "title")]
        project: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Write a stored flight plan as a plan file
    Export {
        /// Flight plan ID or prefix
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        acceptance_radius: Option<f64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn handle(command: PlanCommand, ctx: &Context) -> Result<()> {
    match command {
        PlanCommand::Build { items, rtl, acceptance_radius, out } => {
            let items = read_items(&items)?;
            let mission = MissionPlan::from_items(&items, rtl || ctx.config.return_to_launch);
            let radius = radius(ctx, acceptance_radius)?;
            emit(&mission.to_plan_file(radius), out.as_deref())
        }
        PlanCommand::Import { file, project, title } => {
            let text = super::read_input(&file)?;
            let mission = MissionPlan::from_plan_file(&text).map_err(|e| {
                ExitError::invalid_input(format!("invalid plan file {}: {e}", file.display()))
            })?;
            let interpretation = mission.interpret();
            for (index, reason) in &interpretation.skipped {
                eprintln!("warning: skipped command {index}: {reason}");
            }
            if let (Some(project), Some(title)) = (project, title) {
                let manager = ctx.open_manager()?;
                let plan = manager.create(
                    project,
                    title,
                    interpretation.items,
                    interpretation.return_to_launch,
                );
                manager.flush().await;
                return format_or_json(ctx.format, &plan, |out| writeln!(out, "{}", plan.id));
            }
            print_items(&interpretation.items, ctx.format)
        }
        PlanCommand::Export { id, acceptance_radius, out } => {
            let manager = ctx.open_manager()?;
            let plan = find_flight_plan(&manager, &id).await?;
            let radius = radius(ctx, acceptance_radius)?;
            emit(&plan.mission_plan().to_plan_file(radius), out.as_deref())
        }
    }
}

fn radius(ctx: &Context, flag: Option<f64>) -> Result<f64> {
    let Some(radius) = flag else {
        return Ok(ctx.config.acceptance_radius);
    };
    ctx.config
        .clone()
        .acceptance_radius(radius)
        .validate()
        .map_err(|e| ExitError::invalid_input(e.to_string()))?;
    Ok(radius)
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn print_items(items: &[MissionItem], format: OutputFormat) -> Result<()> {
    format_or_json(format, &items, |out| {
        for item in items {
            writeln!(out, "{}", describe(item))?;
        }
        Ok(())
    })
}

/// One-line summary of an authored item.
pub(crate) fn describe(item: &MissionItem) -> String {
    match item {
        MissionItem::Waypoint(wp) => {
            format!("waypoint {:.6} {:.6} {}m", wp.latitude, wp.longitude, wp.altitude)
        }
        MissionItem::Action(action) => format!("action {}", action.kind),
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
