// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

mod helpers;

use fp_core::{Event, FlightPlan};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flight plans keyed by ID, built by folding events.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MaterializedState {
    #[serde(default)]
    pub flight_plans: HashMap<String, FlightPlan>,
}

impl MaterializedState {
    /// Get a flight plan by ID or unique prefix
    pub fn get_flight_plan(&self, id: &str) -> Option<&FlightPlan> {
        helpers::find_by_prefix(&self.flight_plans, id)
    }

    /// All plans, most recently updated first.
    pub fn all_flight_plans(&self) -> Vec<&FlightPlan> {
        let mut plans: Vec<_> = self.flight_plans.values().collect();
        helpers::newest_first(&mut plans);
        plans
    }

    /// Apply an event to derive state changes.
    ///
    /// Handlers are idempotent: an event applied twice (live, then again
    /// during WAL replay) leaves the same state as applying it once.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::FlightPlanSaved { flight_plan } => {
                self.flight_plans.insert(flight_plan.id.to_string(), (**flight_plan).clone());
            }
            Event::FlightPlanProgress { id, progress, at_ms } => {
                let Some(plan) = self.flight_plans.get_mut(id.as_str()) else {
                    tracing::debug!(flight_plan_id = %id, "progress for unknown flight plan");
                    return;
                };
                // Replayed or reordered progress never rewinds the record
                if progress.last_item_executed >= plan.progress.last_item_executed {
                    plan.progress = progress.clone();
                    plan.last_update_ms = plan.last_update_ms.max(*at_ms);
                }
            }
            Event::FlightPlanDeleted { id } => {
                self.flight_plans.remove(id.as_str());
            }
        }
    }
}

#[cfg(test)]
#[path = "../state_tests.rs"]
mod tests;
