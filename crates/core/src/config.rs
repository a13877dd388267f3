// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fp.toml` configuration.

use crate::wire::DEFAULT_ACCEPTANCE_RADIUS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "fp.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("acceptance_radius must be a positive number of meters, got {0}")]
    InvalidAcceptanceRadius(f64),
    #[error("could not determine state directory (set FP_STATE_DIR or HOME)")]
    NoStateDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the flight-plan store lives
    pub state_dir: Option<PathBuf>,
    /// Append a return-to-launch command to generated plans
    pub return_to_launch: bool,
    /// Waypoint acceptance radius written to plan files, meters
    pub acceptance_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self { state_dir: None, return_to_launch: false, acceptance_radius: DEFAULT_ACCEPTANCE_RADIUS }
    }
}

impl Config {
    crate::setters! {
        set {
            state_dir: Option<PathBuf>,
            return_to_launch: bool,
            acceptance_radius: f64,
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        let config: Config = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.acceptance_radius.is_finite() && self.acceptance_radius > 0.0) {
            return Err(ConfigError::InvalidAcceptanceRadius(self.acceptance_radius));
        }
        Ok(())
    }

    /// Resolve the state directory from the process environment.
    pub fn resolve_state_dir(&self) -> Result<PathBuf, ConfigError> {
        self.state_dir_from(|key| std::env::var(key).ok())
    }

    /// FP_STATE_DIR > `state_dir` > XDG_STATE_HOME/fp > HOME/.local/state/fp
    pub fn state_dir_from(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = env("FP_STATE_DIR").filter(|s| !s.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        if let Some(xdg) = env("XDG_STATE_HOME").filter(|s| !s.is_empty()) {
            return Ok(PathBuf::from(xdg).join("fp"));
        }
        let home = env("HOME").ok_or(ConfigError::NoStateDir)?;
        Ok(PathBuf::from(home).join(".local/state/fp"))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
