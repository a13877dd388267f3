// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flight-plan mutations and queries.
//!
//! Every mutation returns the updated plan immediately and persists it on a
//! spawned task. Tasks run one after another in call order. Persistence
//! failures are logged and never rolled back. Mutations must be called from
//! within a Tokio runtime.

use crate::repository::{FlightPlanRepository, RepositoryError};
use chrono::DateTime;
use fp_core::{
    Clock, ExecutionProgress, Flight, FlightPlan, FlightPlanState, MissionItem, ReportOutcome,
};
use parking_lot::Mutex;
use std::future::Future;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("flight plan not found: {0}")]
    NotFound(String),
}

pub struct FlightPlanManager<R: FlightPlanRepository, C: Clock> {
    repository: R,
    clock: C,
    /// Most recently spawned persistence task
    tail: Mutex<Option<JoinHandle<()>>>,
}

impl<R: FlightPlanRepository, C: Clock> FlightPlanManager<R, C> {
    pub fn new(repository: R, clock: C) -> Self {
        Self { repository, clock, tail: Mutex::new(None) }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Create and persist a new editable plan.
    pub fn create(
        &self,
        project_id: impl Into<String>,
        title: impl Into<String>,
        items: Vec<MissionItem>,
        return_to_launch: bool,
    ) -> FlightPlan {
        let mut plan = FlightPlan::new(project_id, title, items, self.clock.epoch_ms());
        plan.return_to_launch = return_to_launch;
        tracing::info!(flight_plan_id = %plan.id, project_id = %plan.project_id, "flight plan created");
        self.persist(&plan);
        plan
    }

    /// Persist `plan` as is.
    pub fn save(&self, plan: &FlightPlan) {
        self.persist(plan);
    }

    /// Duplicate `plan` with fresh identity and no run history. Not persisted.
    pub fn new_flight_plan_based_on(&self, plan: &FlightPlan) -> FlightPlan {
        let copy = plan.duplicate(self.clock.epoch_ms());
        tracing::debug!(source = %plan.id, flight_plan_id = %copy.id, "flight plan duplicated");
        copy
    }

    pub fn update_state(&self, plan: &FlightPlan, state: FlightPlanState) -> FlightPlan {
        let mut updated = plan.clone();
        updated.state = state;
        tracing::info!(flight_plan_id = %plan.id, from = %plan.state, to = %state, "flight plan state");
        self.touch_and_persist(updated)
    }

    pub fn update_custom_title(&self, plan: &FlightPlan, title: impl Into<String>) -> FlightPlan {
        let mut updated = plan.clone();
        updated.custom_title = Some(title.into());
        self.touch_and_persist(updated)
    }

    /// Count an upload attempt at the current time.
    pub fn update_with_upload_attempt(&self, plan: &FlightPlan) -> FlightPlan {
        let mut updated = plan.clone();
        updated.upload_attempt_count = updated.upload_attempt_count.saturating_add(1);
        updated.last_upload_attempt_ms = Some(self.clock.epoch_ms());
        self.touch_and_persist(updated)
    }

    /// Apply a "command `index` executed" report to the plan's stored
    /// progress. Ignored reports return the plan unchanged and persist nothing.
    pub fn update_progress(
        &self,
        plan: &FlightPlan,
        index: usize,
        recovery_resource_id: Option<String>,
    ) -> (FlightPlan, ReportOutcome) {
        let mut updated = plan.clone();
        let outcome =
            updated.progress.apply(&plan.mission_plan(), index, recovery_resource_id);
        if !outcome.is_applied() {
            return (updated, outcome);
        }
        (self.record_progress(&updated, updated.progress.clone()), outcome)
    }

    /// Persist progress already applied by the caller. State is unchanged.
    pub fn record_progress(&self, plan: &FlightPlan, progress: ExecutionProgress) -> FlightPlan {
        let mut updated = plan.clone();
        updated.progress = progress;
        updated.last_update_ms = self.clock.epoch_ms();
        self.persist_progress(&updated);
        updated
    }

    /// Store the progress of a finished flight, record the flight and move
    /// the plan to `state`.
    pub fn archive_run(
        &self,
        plan: &FlightPlan,
        progress: ExecutionProgress,
        state: FlightPlanState,
        flight: Flight,
    ) -> FlightPlan {
        let mut updated = plan.clone();
        updated.progress = progress;
        updated.state = state;
        tracing::info!(
            flight_plan_id = %plan.id,
            flight_id = %flight.id,
            state = %state,
            last_item = updated.progress.last_item_executed,
            percent = updated.progress.percent_completed,
            "run progress archived",
        );
        if !updated.flights.iter().any(|f| f.id == flight.id) {
            updated.flights.push(flight);
        }
        self.touch_and_persist(updated)
    }

    /// Start of the plan's latest flight, or its last update if it never flew.
    pub fn last_flight_date(&self, plan: &FlightPlan) -> u64 {
        plan.last_flight_ms()
    }

    pub fn first_flight_date(&self, plan: &FlightPlan) -> Option<u64> {
        plan.first_flight_ms()
    }

    /// First flight start as `YYYY-MM-DD HH:MM` UTC, or the plan's last
    /// update if it never flew.
    pub fn first_flight_formatted_date(&self, plan: &FlightPlan) -> String {
        format_date(plan.first_flight_ms().unwrap_or(plan.last_update_ms))
    }

    pub fn delete(&self, plan: &FlightPlan) {
        tracing::info!(flight_plan_id = %plan.id, "flight plan deleted");
        let repository = self.repository.clone();
        let id = plan.id.clone();
        self.spawn(async move {
            if let Err(e) = repository.delete(&id).await {
                tracing::warn!(flight_plan_id = %id, error = %e, "failed to delete flight plan");
            }
        });
    }

    /// Look up a plan by ID or unique ID prefix.
    pub async fn flight_plan(&self, id: &str) -> Result<FlightPlan, ManagerError> {
        self.repository.load(id).await?.ok_or_else(|| ManagerError::NotFound(id.to_string()))
    }

    /// Editable plans of `project_id`, newest first.
    pub async fn editable_flight_plans_for(
        &self,
        project_id: &str,
    ) -> Result<Vec<FlightPlan>, ManagerError> {
        let mut plans: Vec<FlightPlan> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|p| p.project_id == project_id && p.state == FlightPlanState::Editable)
            .collect();
        sort_newest_first(&mut plans);
        Ok(plans)
    }

    pub async fn all_flight_plans(&self) -> Result<Vec<FlightPlan>, ManagerError> {
        let mut plans = self.repository.list().await?;
        sort_newest_first(&mut plans);
        Ok(plans)
    }

    pub async fn flight_plans_for_state(
        &self,
        state: FlightPlanState,
    ) -> Result<Vec<FlightPlan>, ManagerError> {
        let mut plans: Vec<FlightPlan> =
            self.repository.list().await?.into_iter().filter(|p| p.state == state).collect();
        sort_newest_first(&mut plans);
        Ok(plans)
    }

    /// Wait for every persistence task spawned so far.
    pub async fn flush(&self) {
        let tail = self.tail.lock().take();
        if let Some(tail) = tail {
            if let Err(e) = tail.await {
                tracing::warn!(error = %e, "persistence task panicked");
            }
        }
    }

    fn touch_and_persist(&self, mut plan: FlightPlan) -> FlightPlan {
        plan.last_update_ms = self.clock.epoch_ms();
        self.persist(&plan);
        plan
    }

    fn persist(&self, plan: &FlightPlan) {
        let repository = self.repository.clone();
        let plan = plan.clone();
        self.spawn(async move {
            if let Err(e) = repository.save(&plan).await {
                tracing::warn!(flight_plan_id = %plan.id, error = %e, "failed to save flight plan");
            }
        });
    }

    fn persist_progress(&self, plan: &FlightPlan) {
        let repository = self.repository.clone();
        let id = plan.id.clone();
        let progress = plan.progress.clone();
        let at_ms = plan.last_update_ms;
        self.spawn(async move {
            if let Err(e) = repository.save_progress(&id, &progress, at_ms).await {
                tracing::warn!(flight_plan_id = %id, error = %e, "failed to save progress");
            }
        });
    }

    /// Spawn `task` after the previously spawned one, so writes land in
    /// call order.
    fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        let mut tail = self.tail.lock();
        let previous = tail.take();
        *tail = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::warn!(error = %e, "persistence task panicked");
                }
            }
            task.await;
        }));
    }
}

fn format_date(epoch_ms: u64) -> String {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn sort_newest_first(plans: &mut [FlightPlan]) {
    plans.sort_by(|a, b| b.last_update_ms.cmp(&a.last_update_ms).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
