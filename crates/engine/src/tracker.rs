// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live progress of running missions.
//!
//! Each run owns one mutex around its plan and progress; reports for the
//! same run are applied one at a time. The run table lock is only held to
//! look up, insert or remove a run.

use crate::manager::FlightPlanManager;
use crate::repository::FlightPlanRepository;
use fp_core::{
    Clock, ExecutionProgress, Flight, FlightPlan, FlightPlanState, MissionPlan, ReportOutcome,
    RunId,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Stopped,
}

fp_core::simple_display! {
    RunOutcome {
        Completed => "completed",
        Stopped => "stopped",
    }
}

impl RunOutcome {
    pub fn state(self) -> FlightPlanState {
        match self {
            RunOutcome::Completed => FlightPlanState::Completed,
            RunOutcome::Stopped => FlightPlanState::Stopped,
        }
    }
}

struct Run {
    flight_plan: FlightPlan,
    mission: MissionPlan,
    started_ms: u64,
    /// Set by `finish` under the run lock; later reports are dropped.
    finished: bool,
}

pub struct MissionProgressTracker<R: FlightPlanRepository, C: Clock> {
    manager: Arc<FlightPlanManager<R, C>>,
    runs: Mutex<HashMap<RunId, Arc<Mutex<Run>>>>,
}

impl<R: FlightPlanRepository, C: Clock> MissionProgressTracker<R, C> {
    pub fn new(manager: Arc<FlightPlanManager<R, C>>) -> Self {
        Self { manager, runs: Mutex::new(HashMap::new()) }
    }

    /// Begin flying `plan` with fresh progress. The plan moves to `flying`.
    pub fn start_run(&self, plan: &FlightPlan) -> RunId {
        let mut fresh = plan.clone();
        fresh.progress = ExecutionProgress::new();
        let flight_plan = self.manager.update_state(&fresh, FlightPlanState::Flying);
        let mission = flight_plan.mission_plan();
        let started_ms = self.manager.clock().epoch_ms();
        let run_id = RunId::new();
        tracing::info!(
            run_id = %run_id,
            flight_plan_id = %flight_plan.id,
            commands = mission.len(),
            waypoints = mission.waypoint_indices().len(),
            "run started",
        );
        let run = Run { flight_plan, mission, started_ms, finished: false };
        self.runs.lock().insert(run_id.clone(), Arc::new(Mutex::new(run)));
        run_id
    }

    /// Apply "command `index` executed" to a run. `None` if the run is unknown
    /// or already finished.
    pub fn report(
        &self,
        run_id: &RunId,
        index: usize,
        recovery_resource_id: Option<String>,
    ) -> Option<ReportOutcome> {
        let Some(run) = self.run(run_id) else {
            tracing::warn!(run_id = %run_id, index, "progress report for unknown run");
            return None;
        };
        self.report_to(run_id, &run, index, recovery_resource_id)
    }

    fn report_to(
        &self,
        run_id: &RunId,
        run: &Mutex<Run>,
        index: usize,
        recovery_resource_id: Option<String>,
    ) -> Option<ReportOutcome> {
        let mut run = run.lock();
        if run.finished {
            tracing::debug!(run_id = %run_id, index, "progress report after finish");
            return None;
        }
        let Run { flight_plan, mission, .. } = &mut *run;
        let mut progress = flight_plan.progress.clone();
        let outcome = progress.apply(mission, index, recovery_resource_id);
        if outcome.is_applied() {
            *flight_plan = self.manager.record_progress(flight_plan, progress);
        }
        Some(outcome)
    }

    pub fn progress(&self, run_id: &RunId) -> Option<ExecutionProgress> {
        self.run(run_id).map(|run| run.lock().flight_plan.progress.clone())
    }

    pub fn active_runs(&self) -> Vec<RunId> {
        let mut ids: Vec<RunId> = self.runs.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// End a run, archive its progress into the flight plan and record the
    /// flight.
    pub fn finish(&self, run_id: &RunId, outcome: RunOutcome) -> Option<FlightPlan> {
        let run = self.runs.lock().remove(run_id);
        let Some(run) = run else {
            tracing::warn!(run_id = %run_id, %outcome, "finish for unknown run");
            return None;
        };
        let mut run = run.lock();
        run.finished = true;
        tracing::info!(run_id = %run_id, flight_plan_id = %run.flight_plan.id, %outcome, "run finished");
        Some(self.manager.archive_run(
            &run.flight_plan,
            run.flight_plan.progress.clone(),
            outcome.state(),
            Flight::new(run_id.as_str(), run.started_ms),
        ))
    }

    /// Drop a run without archiving. Returns whether it existed.
    pub fn abandon(&self, run_id: &RunId) -> bool {
        let Some(run) = self.runs.lock().remove(run_id) else {
            return false;
        };
        run.lock().finished = true;
        tracing::info!(run_id = %run_id, "run abandoned");
        true
    }

    fn run(&self, run_id: &RunId) -> Option<Arc<Mutex<Run>>> {
        self.runs.lock().get(run_id).cloned()
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
