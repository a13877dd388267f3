// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fp_core::test_support::{flight_plan_deleted_event, flight_plan_saved_event};
use fp_core::{ExecutionProgress, FlightPlanId, FlightPlanState};

fn plan(id: &str, project: &str, state: FlightPlanState, updated: u64) -> Event {
    Event::FlightPlanSaved {
        flight_plan: Box::new(
            FlightPlan::builder()
                .id(id)
                .project_id(project)
                .state(state)
                .last_update_ms(updated)
                .build(),
        ),
    }
}

fn progress(id: &str, item: usize, at_ms: u64) -> Event {
    Event::FlightPlanProgress {
        id: FlightPlanId::from_string(id),
        progress: ExecutionProgress { last_item_executed: item, ..Default::default() },
        at_ms,
    }
}

#[test]
fn saved_then_deleted() {
    let mut state = MaterializedState::default();
    state.apply_event(&flight_plan_saved_event("fpl-abc", "proj-1"));
    assert!(state.get_flight_plan("fpl-abc").is_some());

    state.apply_event(&flight_plan_deleted_event("fpl-abc"));
    assert!(state.flight_plans.is_empty());
}

#[test]
fn events_are_idempotent() {
    let events = [
        flight_plan_saved_event("fpl-abc", "proj-1"),
        progress("fpl-abc", 4, 2_000_000),
        flight_plan_saved_event("fpl-def", "proj-1"),
        flight_plan_deleted_event("fpl-def"),
    ];
    let mut once = MaterializedState::default();
    let mut twice = MaterializedState::default();
    for event in &events {
        once.apply_event(event);
        twice.apply_event(event);
        twice.apply_event(event);
    }
    assert_eq!(once.flight_plans, twice.flight_plans);
}

#[test]
fn progress_never_rewinds() {
    let mut state = MaterializedState::default();
    state.apply_event(&flight_plan_saved_event("fpl-abc", "proj-1"));
    state.apply_event(&progress("fpl-abc", 10, 2_000_000));
    state.apply_event(&progress("fpl-abc", 4, 3_000_000));

    let plan = &state.flight_plans["fpl-abc"];
    assert_eq!(plan.progress.last_item_executed, 10);
    assert_eq!(plan.last_update_ms, 2_000_000);
}

#[test]
fn progress_for_unknown_plan_is_dropped() {
    let mut state = MaterializedState::default();
    state.apply_event(&progress("fpl-nope", 1, 1));
    assert!(state.flight_plans.is_empty());
}

#[yare::parameterized(
    exact        = { "fpl-abc123", true },
    suffix       = { "abc",        true },
    ambiguous    = { "fpl-",       false },
    no_match     = { "zzz",        false },
)]
fn lookup_by_prefix(query: &str, found: bool) {
    let mut state = MaterializedState::default();
    state.apply_event(&flight_plan_saved_event("fpl-abc123", "p"));
    state.apply_event(&flight_plan_saved_event("fpl-xyz789", "p"));
    assert_eq!(state.get_flight_plan(query).is_some(), found);
}

#[test]
fn all_plans_newest_first() {
    let mut state = MaterializedState::default();
    state.apply_event(&plan("fpl-old", "proj-1", FlightPlanState::Editable, 100));
    state.apply_event(&plan("fpl-new", "proj-1", FlightPlanState::Editable, 300));
    state.apply_event(&plan("fpl-flown", "proj-1", FlightPlanState::Completed, 500));
    state.apply_event(&plan("fpl-other", "proj-2", FlightPlanState::Editable, 400));

    let ids: Vec<_> = state.all_flight_plans().iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, ["fpl-flown", "fpl-other", "fpl-new", "fpl-old"]);
}
