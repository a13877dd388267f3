// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event methods: name, log summary, flight plan id

use super::Event;
use crate::id::FlightPlanId;

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::FlightPlanSaved { .. } => "flight_plan:saved",
            Event::FlightPlanProgress { .. } => "flight_plan:progress",
            Event::FlightPlanDeleted { .. } => "flight_plan:deleted",
        }
    }

    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::FlightPlanSaved { flight_plan } => {
                format!("{t} id={} state={}", flight_plan.id, flight_plan.state)
            }
            Event::FlightPlanProgress { id, progress, .. } => format!(
                "{t} id={id} item={} percent={:.1}",
                progress.last_item_executed, progress.percent_completed
            ),
            Event::FlightPlanDeleted { id } => format!("{t} id={id}"),
        }
    }

    pub fn flight_plan_id(&self) -> &FlightPlanId {
        match self {
            Event::FlightPlanSaved { flight_plan } => &flight_plan.id,
            Event::FlightPlanProgress { id, .. } | Event::FlightPlanDeleted { id } => id,
        }
    }
}
