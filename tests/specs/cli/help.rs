// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output

use crate::prelude::*;

#[test]
fn fp_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn fp_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("plan")
        .stdout_has("replay")
        .stdout_has("run")
        .stdout_has("store");
}

#[test]
fn fp_store_help_shows_subcommands() {
    cli()
        .args(&["store", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("duplicate");
}

#[test]
fn fp_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
