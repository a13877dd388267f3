// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::repository::{FakeRepository, RepositoryCall};
use fp_core::test_support::survey_items;
use fp_core::{FakeClock, Flight, IgnoreReason};
use std::time::Duration;

fn setup() -> (FlightPlanManager<FakeRepository, FakeClock>, FakeRepository, FakeClock) {
    let repo = FakeRepository::new();
    let clock = FakeClock::new();
    (FlightPlanManager::new(repo.clone(), clock.clone()), repo, clock)
}

fn flown_plan() -> FlightPlan {
    let mut progress = ExecutionProgress::new();
    progress.last_item_executed = 3;
    progress.has_reached_first_waypoint = true;
    progress.recovery_resource_id = Some("rec-1".to_string());
    FlightPlan::builder()
        .id("fpl-flown")
        .items(survey_items(3))
        .state(FlightPlanState::Completed)
        .progress(progress)
        .media_count(12)
        .uploaded_media_count(8)
        .upload_attempt_count(2)
        .last_upload_attempt_ms(900_000u64)
        .flights(vec![Flight::new("run-1", 800_000)])
        .cloud_id("cloud-9")
        .custom_title("Roof")
        .build()
}

#[tokio::test]
async fn create_persists_editable_plan() {
    let (manager, repo, _) = setup();
    let plan = manager.create("proj-1", "Survey", survey_items(2), true);
    manager.flush().await;

    assert_eq!(plan.state, FlightPlanState::Editable);
    assert!(plan.return_to_launch);
    assert_eq!(repo.stored(plan.id.as_str()), Some(plan.clone()));
    assert_eq!(repo.calls(), vec![RepositoryCall::Save(plan.id)]);
}

#[tokio::test]
async fn duplicate_clears_every_reset_field() {
    let (manager, repo, clock) = setup();
    clock.set_epoch_ms(5_000_000);
    let source = flown_plan();
    let copy = manager.new_flight_plan_based_on(&source);
    manager.flush().await;

    assert_ne!(copy.id, source.id);
    assert_ne!(copy.thumbnail_id, source.thumbnail_id);
    assert_eq!(copy.state, FlightPlanState::Editable);
    assert_eq!(copy.progress, ExecutionProgress::default());
    assert_eq!(copy.progress.recovery_resource_id, None);
    assert_eq!(copy.media_count, 0);
    assert_eq!(copy.uploaded_media_count, 0);
    assert_eq!(copy.upload_attempt_count, 0);
    assert_eq!(copy.last_upload_attempt_ms, None);
    assert!(copy.flights.is_empty());
    assert_eq!(copy.cloud_id, None);
    assert_eq!(copy.last_update_ms, 5_000_000);

    assert_eq!(copy.items, source.items);
    assert_eq!(copy.custom_title, source.custom_title);
    assert!(repo.calls().is_empty(), "duplicates are not persisted");
}

#[tokio::test]
async fn updates_touch_last_update() {
    let (manager, repo, clock) = setup();
    let plan = FlightPlan::builder().build();
    clock.advance(Duration::from_secs(60));

    let plan = manager.update_state(&plan, FlightPlanState::Uploading);
    assert_eq!(plan.last_update_ms, 1_060_000);

    clock.advance(Duration::from_secs(1));
    let plan = manager.update_custom_title(&plan, "North field");
    assert_eq!(plan.display_title(), "North field");
    assert_eq!(plan.last_update_ms, 1_061_000);

    let plan = manager.update_with_upload_attempt(&plan);
    assert_eq!(plan.upload_attempt_count, 1);
    assert_eq!(plan.last_upload_attempt_ms, Some(1_061_000));

    manager.flush().await;
    assert_eq!(repo.stored("fpl-test"), Some(plan));
}

#[tokio::test]
async fn update_progress_applies_and_persists() {
    let (manager, repo, _) = setup();
    let plan = FlightPlan::builder().items(survey_items(3)).build();
    repo.insert(plan.clone());

    let (plan, outcome) = manager.update_progress(&plan, 3, Some("rec-7".to_string()));
    manager.flush().await;

    assert_eq!(outcome, ReportOutcome::Applied);
    assert_eq!(plan.progress.last_item_executed, 3);
    assert!(plan.progress.has_reached_first_waypoint);
    assert_eq!(plan.progress.recovery_resource_id.as_deref(), Some("rec-7"));
    assert_eq!(repo.stored("fpl-test").unwrap().progress, plan.progress);
    assert_eq!(repo.calls(), vec![RepositoryCall::SaveProgress(plan.id.clone(), 3)]);
}

#[tokio::test]
async fn stale_progress_is_not_persisted() {
    let (manager, repo, _) = setup();
    let plan = FlightPlan::builder().items(survey_items(3)).build();
    let (plan, _) = manager.update_progress(&plan, 4, None);
    manager.flush().await;
    let before = repo.calls().len();

    let (unchanged, outcome) = manager.update_progress(&plan, 2, None);
    manager.flush().await;

    assert_eq!(outcome, ReportOutcome::Ignored(IgnoreReason::Stale));
    assert_eq!(unchanged, plan);
    assert_eq!(repo.calls().len(), before);
}

#[tokio::test]
async fn persistence_failure_keeps_in_memory_result() {
    let (manager, repo, _) = setup();
    repo.set_fail_writes(true);
    let plan = manager.update_state(&FlightPlan::builder().build(), FlightPlanState::Flying);
    manager.flush().await;

    assert_eq!(plan.state, FlightPlanState::Flying);
    assert!(repo.stored("fpl-test").is_none());
}

#[tokio::test]
async fn queries_filter_and_order_newest_first() {
    let (manager, repo, _) = setup();
    let plan = |id: &str, project: &str, state: FlightPlanState, at: u64| {
        FlightPlan::builder().id(id).project_id(project).state(state).last_update_ms(at).build()
    };
    repo.insert(plan("fpl-old", "proj-1", FlightPlanState::Editable, 10));
    repo.insert(plan("fpl-new", "proj-1", FlightPlanState::Editable, 30));
    repo.insert(plan("fpl-flying", "proj-1", FlightPlanState::Flying, 40));
    repo.insert(plan("fpl-other", "proj-2", FlightPlanState::Editable, 50));

    let ids = |plans: Vec<FlightPlan>| plans.into_iter().map(|p| p.id.to_string()).collect::<Vec<_>>();
    assert_eq!(ids(manager.editable_flight_plans_for("proj-1").await.unwrap()), ["fpl-new", "fpl-old"]);
    assert_eq!(
        ids(manager.flight_plans_for_state(FlightPlanState::Editable).await.unwrap()),
        ["fpl-other", "fpl-new", "fpl-old"]
    );
    assert_eq!(ids(manager.flight_plans_for_state(FlightPlanState::Processed).await.unwrap()).len(), 0);
}

#[tokio::test]
async fn flight_plan_lookup() {
    let (manager, repo, _) = setup();
    repo.insert(FlightPlan::builder().build());

    assert_eq!(manager.flight_plan("fpl-test").await.unwrap().id, "fpl-test");
    let err = manager.flight_plan("fpl-missing").await.unwrap_err();
    assert!(matches!(err, ManagerError::NotFound(ref id) if id == "fpl-missing"));
}

#[tokio::test]
async fn delete_removes_from_repository() {
    let (manager, repo, _) = setup();
    let plan = FlightPlan::builder().build();
    repo.insert(plan.clone());
    manager.delete(&plan);
    manager.flush().await;

    assert!(repo.stored("fpl-test").is_none());
    assert_eq!(repo.calls(), vec![RepositoryCall::Delete(plan.id)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn writes_land_in_call_order() {
    let (manager, repo, _) = setup();
    let mut plan = FlightPlan::builder().build();
    for state in FlightPlanState::ALL.into_iter().cycle().take(40) {
        plan = manager.update_state(&plan, state);
    }
    manager.flush().await;

    assert_eq!(repo.stored("fpl-test").unwrap().state, plan.state);
    assert_eq!(repo.calls().len(), 40);
}

#[tokio::test]
async fn archive_run_records_the_flight_once() {
    let (manager, repo, _) = setup();
    let plan = FlightPlan::builder().state(FlightPlanState::Flying).build();
    let progress = ExecutionProgress { last_item_executed: 4, ..Default::default() };

    let archived = manager.archive_run(
        &plan,
        progress.clone(),
        FlightPlanState::Completed,
        Flight::new("run-1", 2_000),
    );
    let again =
        manager.archive_run(&archived, progress, FlightPlanState::Completed, Flight::new("run-1", 2_000));
    manager.flush().await;

    assert_eq!(again.flights, vec![Flight::new("run-1", 2_000)]);
    assert_eq!(repo.stored("fpl-test").unwrap().progress.last_item_executed, 4);
}

#[yare::parameterized(
    never_flown = { vec![],                                                  "1970-01-01 00:16" },
    flown       = { vec![Flight::new("b", 86_400_000), Flight::new("a", 60_000)], "1970-01-01 00:01" },
)]
fn first_flight_formatted_date_falls_back_to_last_update(flights: Vec<Flight>, expected: &str) {
    let (manager, _, _) = setup();
    let plan = FlightPlan::builder().last_update_ms(1_000_000).flights(flights).build();
    assert_eq!(manager.first_flight_formatted_date(&plan), expected);
}
