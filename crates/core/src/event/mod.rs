// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events recorded against the flight-plan store

mod methods;

use crate::flight_plan::FlightPlan;
use crate::id::FlightPlanId;
use crate::progress::ExecutionProgress;
use serde::{Deserialize, Serialize};

/// Events that change persisted flight-plan state.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Full record written by the manager (create, duplicate, any update)
    #[serde(rename = "flight_plan:saved")]
    FlightPlanSaved { flight_plan: Box<FlightPlan> },

    /// Progress of a run in flight. Applied only when it moves forward.
    #[serde(rename = "flight_plan:progress")]
    FlightPlanProgress { id: FlightPlanId, progress: ExecutionProgress, at_ms: u64 },

    #[serde(rename = "flight_plan:deleted")]
    FlightPlanDeleted { id: FlightPlanId },
}
