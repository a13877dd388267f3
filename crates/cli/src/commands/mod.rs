// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod plan;
pub mod replay;
pub mod run;
pub mod store;

use anyhow::Result;
use fp_core::wire::PLAN_FILE_HEADER;
use fp_core::{FlightPlan, FlightPlanState, MissionItem, MissionPlan};
use std::path::Path;

use crate::context::Manager;
use crate::exit_error::ExitError;

pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ExitError::invalid_input(format!("failed to read {}: {e}", path.display())).into()
    })
}

/// Authored items from a JSON array file.
pub fn read_items(path: &Path) -> Result<Vec<MissionItem>> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|e| {
        ExitError::invalid_input(format!("invalid items in {}: {e}", path.display())).into()
    })
}

/// A command list from either a plan file or an authored-items JSON file.
pub fn read_mission(path: &Path, return_to_launch: bool) -> Result<MissionPlan> {
    let text = read_input(path)?;
    if text.trim_start().starts_with(PLAN_FILE_HEADER) {
        return MissionPlan::from_plan_file(&text).map_err(|e| {
            ExitError::invalid_input(format!("invalid plan file {}: {e}", path.display())).into()
        });
    }
    let items: Vec<MissionItem> = serde_json::from_str(&text).map_err(|e| {
        ExitError::invalid_input(format!(
            "{} is neither a plan file nor an items list: {e}",
            path.display()
        ))
    })?;
    Ok(MissionPlan::from_items(&items, return_to_launch))
}

pub async fn find_flight_plan(manager: &Manager, id: &str) -> Result<FlightPlan> {
    match manager.flight_plan(id).await {
        Ok(plan) => Ok(plan),
        Err(fp_engine::ManagerError::NotFound(_)) => {
            Err(ExitError::not_found("flight plan", id).into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn parse_state(s: &str) -> Result<FlightPlanState, String> {
    FlightPlanState::ALL.into_iter().find(|state| state.to_string() == s).ok_or_else(|| {
        let names: Vec<String> = FlightPlanState::ALL.iter().map(|s| s.to_string()).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
