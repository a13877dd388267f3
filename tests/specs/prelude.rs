// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for `fp` behavior.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// A scratch directory with its own state dir and config.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    /// Write `content` at `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `fp` running in this project.
    pub fn fp(&self) -> Cli {
        let mut cmd = Command::cargo_bin("fp").unwrap();
        cmd.current_dir(self.path())
            .env("FP_STATE_DIR", self.state_dir())
            .env_remove("FP_CONFIG")
            .env_remove("FP_LOG")
            .env("NO_COLOR", "1");
        Cli { cmd }
    }
}

/// `fp` outside any project.
pub fn cli() -> Cli {
    let mut cmd = Command::cargo_bin("fp").unwrap();
    cmd.env("NO_COLOR", "1");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        assert!(out.code == Some(0), "expected success, got {:?}\nstderr: {}", out.code, out.stderr);
        out
    }

    pub fn fails_with(mut self, code: i32) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        assert_eq!(out.code, Some(code), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
        out
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(!self.stderr.contains(needle), "stderr has {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }

    /// First whitespace-delimited token of stdout.
    pub fn first_token(&self) -> String {
        self.stdout.split_whitespace().next().unwrap_or_default().to_string()
    }
}

/// take-off, three waypoints with a photo capture after the first, landing
pub const SURVEY_ITEMS: &str = r#"[
  {"item": "action", "type": "take_off"},
  {"item": "waypoint", "latitude": 48.0, "longitude": 2.0, "altitude": 40.0},
  {"item": "action", "type": "image_start_capture", "period": 2.0, "picture_count": 0},
  {"item": "waypoint", "latitude": 48.001, "longitude": 2.0, "altitude": 40.0},
  {"item": "waypoint", "latitude": 48.002, "longitude": 2.0, "altitude": 40.0},
  {"item": "action", "type": "landing"}
]"#;
