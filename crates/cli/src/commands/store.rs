// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp store`: stored flight plans.

use anyhow::Result;
use clap::{Args, Subcommand};
use fp_core::{Clock, FlightPlan, FlightPlanState, SystemClock};
use std::io::Write;
use std::path::PathBuf;

use super::{find_flight_plan, parse_state, read_items};
use crate::color;
use crate::context::{Context, Manager};
use crate::output::{format_or_json, handle_list, write_flight_plan_table, write_progress};

#[derive(Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: StoreCommand,
}

#[derive(Subcommand)]
pub enum StoreCommand {
    /// Create a flight plan from an authored-items JSON file
    Add {
        items: PathBuf,
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        rtl: bool,
    },
    /// List flight plans, newest first
    List {
        /// Only editable plans of this project
        #[arg(long)]
        project: Option<String>,
        #[arg(long, value_parser = parse_state)]
        state: Option<FlightPlanState>,
    },
    /// Show one flight plan
    Show { id: String },
    /// Copy a flight plan's items into a new editable plan
    Duplicate { id: String },
    /// Set a custom title
    Rename { id: String, title: String },
    /// Move a flight plan to another lifecycle state
    SetState {
        id: String,
        #[arg(value_parser = parse_state)]
        state: FlightPlanState,
    },
    /// Record an upload attempt
    UploadAttempt { id: String },
    Delete { id: String },
    /// Snapshot the store and truncate its event log
    Checkpoint,
}

pub async fn handle(command: StoreCommand, ctx: &Context) -> Result<()> {
    let manager = ctx.open_manager()?;
    let result = run(command, ctx, &manager).await;
    manager.flush().await;
    result
}

async fn run(command: StoreCommand, ctx: &Context, manager: &Manager) -> Result<()> {
    match command {
        StoreCommand::Add { items, project, title, rtl } => {
            let items = read_items(&items)?;
            let plan =
                manager.create(project, title, items, rtl || ctx.config.return_to_launch);
            print_id(ctx, &plan)
        }
        StoreCommand::List { project, state } => {
            let plans = list(manager, project.as_deref(), state).await?;
            let now_ms = SystemClock.epoch_ms();
            handle_list(ctx.format, &plans, "No flight plans", |plans, out| {
                write_flight_plan_table(out, plans, now_ms)
            })
        }
        StoreCommand::Show { id } => {
            let plan = find_flight_plan(manager, &id).await?;
            format_or_json(ctx.format, &plan, |out| show(out, &plan))
        }
        StoreCommand::Duplicate { id } => {
            let source = find_flight_plan(manager, &id).await?;
            let copy = manager.new_flight_plan_based_on(&source);
            manager.save(&copy);
            print_id(ctx, &copy)
        }
        StoreCommand::Rename { id, title } => {
            let plan = find_flight_plan(manager, &id).await?;
            print_id(ctx, &manager.update_custom_title(&plan, title))
        }
        StoreCommand::SetState { id, state } => {
            let plan = find_flight_plan(manager, &id).await?;
            print_id(ctx, &manager.update_state(&plan, state))
        }
        StoreCommand::UploadAttempt { id } => {
            let plan = find_flight_plan(manager, &id).await?;
            print_id(ctx, &manager.update_with_upload_attempt(&plan))
        }
        StoreCommand::Delete { id } => {
            let plan = find_flight_plan(manager, &id).await?;
            manager.delete(&plan);
            print_id(ctx, &plan)
        }
        StoreCommand::Checkpoint => {
            manager.flush().await;
            manager.repository().checkpoint().await?;
            Ok(())
        }
    }
}

async fn list(
    manager: &Manager,
    project: Option<&str>,
    state: Option<FlightPlanState>,
) -> Result<Vec<FlightPlan>> {
    let plans = match (project, state) {
        (Some(project), _) => manager.editable_flight_plans_for(project).await?,
        (None, Some(state)) => manager.flight_plans_for_state(state).await?,
        (None, None) => manager.all_flight_plans().await?,
    };
    Ok(match (project, state) {
        (Some(_), Some(state)) => plans.into_iter().filter(|p| p.state == state).collect(),
        _ => plans,
    })
}

fn print_id(ctx: &Context, plan: &FlightPlan) -> Result<()> {
    format_or_json(ctx.format, plan, |out| writeln!(out, "{}", plan.id))
}

fn show(out: &mut dyn Write, plan: &FlightPlan) -> std::io::Result<()> {
    writeln!(out, "{} {}", color::header("Flight plan"), plan.id)?;
    writeln!(out, "title: {}", plan.display_title())?;
    writeln!(out, "project: {}", plan.project_id)?;
    writeln!(out, "state: {}", color::state(plan.state))?;
    writeln!(out, "items: {} ({} waypoints)", plan.items.len(), plan.waypoint_count())?;
    writeln!(out, "return to launch: {}", plan.return_to_launch)?;
    if plan.upload_attempt_count > 0 {
        writeln!(
            out,
            "uploads: {}/{} media, {} attempts",
            plan.uploaded_media_count, plan.media_count, plan.upload_attempt_count
        )?;
    }
    writeln!(out, "{}", color::muted("progress"))?;
    write_progress(out, &plan.progress)?;
    for (index, item) in plan.items.iter().enumerate() {
        writeln!(out, "  {index:>3}  {}", super::plan::describe(item))?;
    }
    Ok(())
}
