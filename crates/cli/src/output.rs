// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use clap::ValueEnum;
use fp_core::{ExecutionProgress, FlightPlan};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format seconds as a compact duration ("5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Time since `epoch_ms` relative to `now_ms`, or "-" for an unset timestamp.
pub fn format_time_ago(epoch_ms: u64, now_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".to_string();
    }
    format_elapsed(now_ms.saturating_sub(epoch_ms) / 1000)
}

fn yes_no(reached: bool) -> &'static str {
    if reached {
        "reached"
    } else {
        "not reached"
    }
}

/// Text rendering of a progress snapshot, one field per line.
pub fn write_progress(out: &mut dyn Write, progress: &ExecutionProgress) -> std::io::Result<()> {
    writeln!(out, "last item executed: {}", progress.last_item_executed)?;
    writeln!(out, "percent completed: {:.2}", progress.percent_completed)?;
    writeln!(out, "first waypoint: {}", yes_no(progress.has_reached_first_waypoint))?;
    writeln!(out, "last waypoint: {}", yes_no(progress.has_reached_last_waypoint))?;
    match progress.last_passed_waypoint_index {
        Some(i) => writeln!(out, "last passed waypoint: {i}")?,
        None => writeln!(out, "last passed waypoint: -")?,
    }
    if let Some(id) = &progress.recovery_resource_id {
        writeln!(out, "recovery resource: {id}")?;
    }
    Ok(())
}

/// Table of flight plans: ID, state, title, progress, last update.
pub fn write_flight_plan_table(
    out: &mut dyn Write,
    plans: &[FlightPlan],
    now_ms: u64,
) -> std::io::Result<()> {
    let title_w = plans.iter().map(|p| p.display_title().len()).max().unwrap_or(0).max(5);
    writeln!(
        out,
        "{:<12}  {:<10}  {:<title_w$}  {:>7}  {:>7}",
        "ID", "STATE", "TITLE", "DONE", "UPDATED",
    )?;
    for plan in plans {
        writeln!(
            out,
            "{:<12}  {:<10}  {:<title_w$}  {:>6.1}%  {:>7}",
            fp_core::short(plan.id.as_str(), 12),
            plan.state.to_string(),
            plan.display_title(),
            plan.progress.percent_completed,
            format_time_ago(plan.last_update_ms, now_ms),
        )?;
    }
    Ok(())
}

/// Render a list as text table or JSON. Handles empty check + format branch.
pub fn handle_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    empty_msg: &str,
    render_text: impl FnOnce(&[T], &mut dyn Write) -> std::io::Result<()>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty_msg);
            } else {
                render_text(items, &mut std::io::stdout())?;
            }
        }
    }
    Ok(())
}

/// Format-branch helper for non-list commands.
///
/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn(&mut std::io::stdout())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
