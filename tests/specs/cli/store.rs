// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp store` end to end

use crate::prelude::*;

fn add(project: &Project, project_id: &str, title: &str) -> String {
    let items = project.file("items.json", SURVEY_ITEMS);
    project
        .fp()
        .args(&["store", "add", items.to_str().unwrap(), "--project", project_id, "--title", title])
        .passes()
        .first_token()
}

#[test]
fn empty_store_lists_nothing() {
    let project = Project::empty();
    project.fp().args(&["store", "list"]).passes().stdout_has("No flight plans");
}

#[test]
fn list_filters_by_project_and_state() {
    let project = Project::empty();
    let a = add(&project, "p1", "North");
    let b = add(&project, "p2", "South");
    project.fp().args(&["store", "set-state", &b, "processed"]).passes();

    project
        .fp()
        .args(&["store", "list", "--project", "p1"])
        .passes()
        .stdout_has(&a[..12])
        .stdout_lacks(&b[..12]);
    project
        .fp()
        .args(&["store", "list", "--state", "processed"])
        .passes()
        .stdout_has("South")
        .stdout_lacks("North");
}

#[test]
fn unknown_state_is_a_usage_error() {
    let project = Project::empty();
    project.fp().args(&["store", "list", "--state", "landed"]).fails_with(2);
}

#[test]
fn show_accepts_id_prefix() {
    let project = Project::empty();
    let id = add(&project, "p1", "North");
    let prefix = &id["fpl-".len().."fpl-".len() + 6];

    project
        .fp()
        .args(&["store", "show", prefix])
        .passes()
        .stdout_has(&id)
        .stdout_has("title: North")
        .stdout_has("items: 6 (3 waypoints)");
}

#[test]
fn rename_and_upload_attempt() {
    let project = Project::empty();
    let id = add(&project, "p1", "North");
    project.fp().args(&["store", "rename", &id, "Roof survey"]).passes();
    project.fp().args(&["store", "upload-attempt", &id]).passes();

    let json = project.fp().args(&["store", "show", &id, "-o", "json"]).passes().json();
    assert_eq!(json["custom_title"], "Roof survey");
    assert_eq!(json["title"], "North");
    assert_eq!(json["upload_attempt_count"], 1);
    assert!(json["last_upload_attempt_ms"].is_u64());
}

#[test]
fn duplicate_resets_run_history() {
    let project = Project::empty();
    let id = add(&project, "p1", "North");
    project.fp().args(&["run", &id, "--report", "5"]).passes();

    let copy = project.fp().args(&["store", "duplicate", &id]).passes().first_token();
    assert_ne!(copy, id);

    let json = project.fp().args(&["store", "show", &copy, "-o", "json"]).passes().json();
    assert_eq!(json["state"], "editable");
    assert_eq!(json["progress"]["last_item_executed"], 0);
    assert_eq!(json["items"].as_array().unwrap().len(), 6);
}

#[test]
fn delete_then_show_fails() {
    let project = Project::empty();
    let id = add(&project, "p1", "North");
    project.fp().args(&["store", "delete", &id]).passes();
    project.fp().args(&["store", "show", &id]).fails_with(3);
}

#[test]
fn checkpoint_preserves_plans() {
    let project = Project::empty();
    let id = add(&project, "p1", "North");
    project.fp().args(&["store", "checkpoint"]).passes();

    assert!(project.state_dir().join("snapshot.json").exists());
    project.fp().args(&["store", "show", &id]).passes().stdout_has("title: North");
}
