// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flight plan records.

use crate::id::{FlightPlanId, ThumbnailId};
use crate::item::MissionItem;
use crate::plan::MissionPlan;
use crate::progress::ExecutionProgress;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a flight plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPlanState {
    #[default]
    Unknown,
    Editable,
    Flying,
    Stopped,
    Completed,
    Uploading,
    Processing,
    Processed,
}

crate::simple_display! {
    FlightPlanState {
        Unknown => "unknown",
        Editable => "editable",
        Flying => "flying",
        Stopped => "stopped",
        Completed => "completed",
        Uploading => "uploading",
        Processing => "processing",
        Processed => "processed",
    }
}

impl FlightPlanState {
    pub const ALL: [FlightPlanState; 8] = [
        FlightPlanState::Unknown,
        FlightPlanState::Editable,
        FlightPlanState::Flying,
        FlightPlanState::Stopped,
        FlightPlanState::Completed,
        FlightPlanState::Uploading,
        FlightPlanState::Processing,
        FlightPlanState::Processed,
    ];

    /// A run ended, with or without reaching the end of the plan.
    pub fn is_finished(&self) -> bool {
        matches!(self, FlightPlanState::Stopped | FlightPlanState::Completed)
    }
}

/// One flight that executed a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub started_ms: u64,
}

impl Flight {
    pub fn new(id: impl Into<String>, started_ms: u64) -> Self {
        Self { id: id.into(), started_ms }
    }
}

/// An authored flight plan, its lifecycle state and archived run progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub id: FlightPlanId,
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub state: FlightPlanState,
    #[serde(default)]
    pub items: Vec<MissionItem>,
    #[serde(default)]
    pub return_to_launch: bool,
    #[serde(default)]
    pub progress: ExecutionProgress,
    pub thumbnail_id: ThumbnailId,
    #[serde(default)]
    pub media_count: u32,
    #[serde(default)]
    pub uploaded_media_count: u32,
    #[serde(default)]
    pub upload_attempt_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_upload_attempt_ms: Option<u64>,
    #[serde(default)]
    pub last_update_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flights: Vec<Flight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
}

impl FlightPlan {
    /// New editable plan for `project_id`.
    pub fn new(
        project_id: impl Into<String>,
        title: impl Into<String>,
        items: Vec<MissionItem>,
        now_ms: u64,
    ) -> Self {
        Self {
            id: FlightPlanId::new(),
            project_id: project_id.into(),
            title: title.into(),
            custom_title: None,
            state: FlightPlanState::Editable,
            items,
            return_to_launch: false,
            progress: ExecutionProgress::default(),
            thumbnail_id: ThumbnailId::new(),
            media_count: 0,
            uploaded_media_count: 0,
            upload_attempt_count: 0,
            last_upload_attempt_ms: None,
            last_update_ms: now_ms,
            flights: Vec::new(),
            cloud_id: None,
        }
    }

    /// Custom title if set and non-empty, otherwise the generated title.
    pub fn display_title(&self) -> &str {
        match self.custom_title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.title,
        }
    }

    pub fn mission_plan(&self) -> MissionPlan {
        MissionPlan::from_items(&self.items, self.return_to_launch)
    }

    /// Start of the earliest recorded flight.
    pub fn first_flight_ms(&self) -> Option<u64> {
        self.flights.iter().map(|f| f.started_ms).min()
    }

    /// Start of the latest recorded flight, or the last update if the plan
    /// never flew.
    pub fn last_flight_ms(&self) -> u64 {
        self.flights.iter().map(|f| f.started_ms).max().unwrap_or(self.last_update_ms)
    }

    pub fn waypoint_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_waypoint()).count()
    }

    /// Copy that keeps the authored content and drops all run, upload and
    /// cloud history.
    pub fn duplicate(&self, now_ms: u64) -> FlightPlan {
        FlightPlan {
            id: FlightPlanId::new(),
            state: FlightPlanState::Editable,
            progress: ExecutionProgress::default(),
            thumbnail_id: ThumbnailId::new(),
            media_count: 0,
            uploaded_media_count: 0,
            upload_attempt_count: 0,
            last_upload_attempt_ms: None,
            last_update_ms: now_ms,
            flights: Vec::new(),
            cloud_id: None,
            ..self.clone()
        }
    }
}

crate::builder! {
    pub struct FlightPlanBuilder => FlightPlan {
        into {
            id: FlightPlanId = "fpl-test",
            project_id: String = "proj-1",
            title: String = "Survey",
            thumbnail_id: ThumbnailId = "thm-test",
        }
        set {
            state: FlightPlanState = FlightPlanState::Editable,
            items: Vec<MissionItem> = Vec::new(),
            return_to_launch: bool = false,
            progress: ExecutionProgress = ExecutionProgress::default(),
            media_count: u32 = 0,
            uploaded_media_count: u32 = 0,
            upload_attempt_count: u32 = 0,
            last_update_ms: u64 = 1_000_000,
            flights: Vec<Flight> = Vec::new(),
        }
        option {
            custom_title: String = None,
            last_upload_attempt_ms: u64 = None,
            cloud_id: String = None,
        }
    }
}

#[cfg(test)]
#[path = "flight_plan_tests.rs"]
mod tests;
