// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp run`: progress is archived into the stored flight plan.

use crate::prelude::*;

fn stored_survey(project: &Project) -> String {
    let items = project.file("items.json", SURVEY_ITEMS);
    project
        .fp()
        .args(&["store", "add", items.to_str().unwrap(), "--project", "p1", "--title", "Survey"])
        .passes()
        .first_token()
}

#[test]
fn complete_run_is_archived_as_completed() {
    let project = Project::empty();
    let id = stored_survey(&project);

    project
        .fp()
        .args(&["run", &id, "--report", "1,3,2,5,4"])
        .passes()
        .stdout_has("completed")
        .stdout_has("last item executed: 5");

    let json = project.fp().args(&["store", "show", &id, "-o", "json"]).passes().json();
    assert_eq!(json["state"], "completed");
    assert_eq!(json["progress"]["last_item_executed"], 5);
    assert_eq!(json["progress"]["has_reached_last_waypoint"], true);
}

#[test]
fn partial_run_is_archived_as_stopped() {
    let project = Project::empty();
    let id = stored_survey(&project);

    project
        .fp()
        .args(&["run", &id, "--report", "3", "--recovery", "rec-4"])
        .passes()
        .stdout_has("stopped");

    let json = project.fp().args(&["store", "show", &id, "-o", "json"]).passes().json();
    assert_eq!(json["state"], "stopped");
    assert_eq!(json["progress"]["last_passed_waypoint_index"], 1);
    assert_eq!(json["progress"]["recovery_resource_id"], "rec-4");
}

#[test]
fn abandoned_run_leaves_plan_flying() {
    let project = Project::empty();
    let id = stored_survey(&project);

    project.fp().args(&["run", &id, "--report", "2", "--ending", "abandon"]).passes();

    let json = project.fp().args(&["store", "show", &id, "-o", "json"]).passes().json();
    assert_eq!(json["state"], "flying");
    assert_eq!(json["progress"]["last_item_executed"], 2);
}

#[test]
fn new_run_starts_from_fresh_progress() {
    let project = Project::empty();
    let id = stored_survey(&project);
    project.fp().args(&["run", &id, "--report", "4"]).passes();

    project
        .fp()
        .args(&["run", &id, "--report", "1"])
        .passes()
        .stdout_has("last item executed: 1");
}
