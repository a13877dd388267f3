// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp replay` end to end

use crate::prelude::*;

/// take-off, wp, video start, wp, delay, wp, video stop, land
const EIGHT_COMMANDS: &str = "QGC WPL 110
0\t0\t2\t22\t0\t0\t0\t0\t0\t0\t0\t1
1\t0\t3\t16\t0\t5\t0\t0\t48.0\t2.0\t30\t1
2\t0\t2\t2500\t0\t0\t0\t0\t0\t0\t0\t1
3\t0\t3\t16\t0\t5\t0\t0\t48.1\t2.0\t30\t1
4\t0\t2\t93\t2\t-1\t-1\t-1\t0\t0\t0\t1
5\t0\t3\t16\t0\t5\t0\t0\t48.2\t2.0\t30\t1
6\t0\t2\t2501\t0\t0\t0\t0\t0\t0\t0\t1
7\t0\t2\t21\t0\t0\t0\t0\t0\t0\t0\t1
";

#[test]
fn out_of_order_reports_keep_the_highest_index() {
    let project = Project::empty();
    let plan = project.file("mission.plan", EIGHT_COMMANDS);

    project
        .fp()
        .args(&["replay", plan.to_str().unwrap(), "--report", "5,3,7,6"])
        .passes()
        .stdout_has("last item executed: 7")
        .stdout_has("percent completed: 100.00")
        .stdout_has("last waypoint: reached");
}

#[test]
fn verbose_names_ignored_reports() {
    let project = Project::empty();
    let plan = project.file("mission.plan", EIGHT_COMMANDS);

    project
        .fp()
        .args(&["replay", plan.to_str().unwrap(), "--report", "4,2,9", "-v"])
        .passes()
        .stdout_has("report 4: applied")
        .stdout_has("report 2: ignored (stale)")
        .stdout_has("report 9: ignored (out_of_range)")
        .stdout_has("last item executed: 4")
        .stdout_has("last passed waypoint: 1");
}

#[test]
fn json_output_carries_progress() {
    let project = Project::empty();
    let plan = project.file("mission.plan", EIGHT_COMMANDS);

    let out = project
        .fp()
        .args(&["replay", plan.to_str().unwrap(), "--report", "3", "--recovery", "rec-1", "-o", "json"])
        .passes();
    let json = out.json();
    assert_eq!(json["commands"], 8);
    assert_eq!(json["progress"]["last_item_executed"], 3);
    assert_eq!(json["progress"]["has_reached_first_waypoint"], true);
    assert_eq!(json["progress"]["recovery_resource_id"], "rec-1");
}

#[test]
fn replays_authored_items() {
    let project = Project::empty();
    let items = project.file("items.json", SURVEY_ITEMS);

    project
        .fp()
        .args(&["replay", items.to_str().unwrap(), "--report", "2"])
        .passes()
        .stdout_has("last item executed: 2")
        .stdout_has("percent completed: 40.00")
        .stdout_has("first waypoint: reached");
}

#[test]
fn malformed_plan_file_reports_line() {
    let project = Project::empty();
    let plan = project.file("bad.plan", "QGC WPL 110\n0\t0\t2\t22\n");

    project
        .fp()
        .args(&["replay", plan.to_str().unwrap(), "--report", "0"])
        .fails_with(2)
        .stderr_has("line 2");
}
