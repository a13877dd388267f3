// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution progress of one mission run.

use crate::plan::MissionPlan;
use serde::{Deserialize, Serialize};

/// Why a progress report left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Index lower than the last executed one
    Stale,
    /// Index is not a command index of the plan
    OutOfRange,
}

crate::simple_display! {
    IgnoreReason {
        Stale => "stale",
        OutOfRange => "out_of_range",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl ReportOutcome {
    pub fn is_applied(self) -> bool {
        self == ReportOutcome::Applied
    }
}

/// Progress snapshot, updated as the drone reports executed command indices.
///
/// `last_item_executed` never decreases. Reports arrive out of order under
/// link jitter; older ones are dropped rather than rewinding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionProgress {
    pub last_item_executed: usize,
    pub has_reached_first_waypoint: bool,
    pub has_reached_last_waypoint: bool,
    /// Waypoint ordinal, not command index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_passed_waypoint_index: Option<usize>,
    pub percent_completed: f64,
    /// Media file to resume from after an interruption. Stored as reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_resource_id: Option<String>,
}

impl ExecutionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a "command `index` executed" report.
    ///
    /// Equal indices are re-applied, which refreshes the recovery id.
    pub fn apply(
        &mut self,
        plan: &MissionPlan,
        index: usize,
        recovery_resource_id: Option<String>,
    ) -> ReportOutcome {
        if index >= plan.len() {
            tracing::debug!(index, command_count = plan.len(), "progress report out of range");
            return ReportOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        if index < self.last_item_executed {
            tracing::trace!(index, last = self.last_item_executed, "stale progress report");
            return ReportOutcome::Ignored(IgnoreReason::Stale);
        }

        self.last_item_executed = index;
        self.has_reached_first_waypoint = plan.first_waypoint_index().is_some_and(|i| index >= i);
        self.has_reached_last_waypoint = plan.last_waypoint_index().is_some_and(|i| index >= i);
        self.last_passed_waypoint_index = plan.last_passed_waypoint(index);
        self.percent_completed = plan.percent_completed(index);
        self.recovery_resource_id = recovery_resource_id;
        ReportOutcome::Applied
    }

    pub fn is_complete(&self) -> bool {
        self.percent_completed >= 100.0
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
