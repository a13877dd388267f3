// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp plan` end to end

use crate::prelude::*;

#[test]
fn build_writes_plan_file() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);

    let out = project.fp().args(&["plan", "build", items.to_str().unwrap(), "--rtl"]).passes();
    let lines: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(lines[0], "QGC WPL 110");
    // six items plus return-to-launch
    assert_eq!(lines.len(), 8);
    let last: Vec<&str> = lines[7].split('\t').collect();
    assert_eq!(last[3], "20");
}

#[test]
fn build_uses_configured_acceptance_radius() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);
    project.file("fp.toml", "acceptance_radius = 2.5\n");

    let out = project.fp().args(&["plan", "build", items.to_str().unwrap()]).passes();
    let waypoint: Vec<&str> = out.stdout.lines().nth(2).unwrap().split('\t').collect();
    assert_eq!(waypoint[3], "16");
    assert_eq!(waypoint[5].parse::<f64>().unwrap(), 2.5);
}

#[test]
fn invalid_acceptance_radius_flag_is_rejected() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);

    project
        .fp()
        .args(&["plan", "build", items.to_str().unwrap(), "--acceptance-radius", "-1"])
        .fails_with(2)
        .stderr_has("acceptance_radius");
}

#[test]
fn import_round_trips_items() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);
    let plan = project.path().join("survey.plan");
    project
        .fp()
        .args(&["plan", "build", items.to_str().unwrap(), "--rtl", "--out", plan.to_str().unwrap()])
        .passes();

    let out = project
        .fp()
        .args(&["plan", "import", plan.to_str().unwrap()])
        .passes()
        .stdout_has("action take_off")
        .stdout_has("waypoint 48.000000 2.000000 40m")
        .stdout_has("action landing")
        .stderr_lacks("skipped");
    assert_eq!(out.stdout.lines().count(), 6);
}

#[test]
fn import_warns_on_skipped_commands() {
    let project = Project::empty();
    let plan = project.file(
        "mixed.plan",
        "QGC WPL 110\n\
         0\t0\t2\t22\t0\t0\t0\t0\t0\t0\t0\t1\n\
         1\t0\t2\t178\t0\t8\t0\t0\t0\t0\t0\t1\n\
         2\t0\t2\t21\t0\t0\t0\t0\t0\t0\t0\t1\n",
    );

    let out = project
        .fp()
        .args(&["plan", "import", plan.to_str().unwrap()])
        .passes()
        .stderr_has("skipped command 1");
    assert_eq!(out.stdout.lines().count(), 2);
}

#[test]
fn import_keeps_trailing_return_to_launch() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);
    let plan = project.path().join("survey.plan");
    project
        .fp()
        .args(&["plan", "build", items.to_str().unwrap(), "--rtl", "--out", plan.to_str().unwrap()])
        .passes();

    let id = project
        .fp()
        .args(&["plan", "import", plan.to_str().unwrap(), "--project", "p1", "--title", "Home"])
        .passes()
        .first_token();

    let exported = project.fp().args(&["plan", "export", &id]).passes();
    let original = std::fs::read_to_string(&plan).unwrap();
    assert_eq!(exported.stdout.lines().count(), 8);
    similar_asserts::assert_eq!(exported.stdout, original);
}

#[test]
fn import_can_store_a_flight_plan() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);
    let plan = project.path().join("survey.plan");
    project
        .fp()
        .args(&["plan", "build", items.to_str().unwrap(), "--out", plan.to_str().unwrap()])
        .passes();

    let id = project
        .fp()
        .args(&["plan", "import", plan.to_str().unwrap(), "--project", "p1", "--title", "Imported"])
        .passes()
        .first_token();
    assert!(id.starts_with("fpl-"), "{id}");

    let exported = project.fp().args(&["plan", "export", &id]).passes();
    let original = std::fs::read_to_string(&plan).unwrap();
    similar_asserts::assert_eq!(exported.stdout, original);
}

#[test]
fn export_unknown_plan_fails_not_found() {
    let project = Project::empty();
    project
        .fp()
        .args(&["plan", "export", "fpl-nope"])
        .fails_with(3)
        .stderr_has("flight plan not found: fpl-nope");
}
