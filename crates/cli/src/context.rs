// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation configuration and store access.

use anyhow::{Context as _, Result};
use fp_core::config::CONFIG_FILE_NAME;
use fp_core::{Config, SystemClock};
use fp_engine::{FlightPlanManager, StoreRepository};
use fp_storage::Store;
use std::path::{Path, PathBuf};

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

pub type Manager = FlightPlanManager<StoreRepository, SystemClock>;

pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    /// Explicit path, then `$FP_CONFIG`, then `./fp.toml`.
    pub fn load(config_path: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => std::env::var_os("FP_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        };
        let config = Config::load(&path).map_err(|e| ExitError::invalid_input(e.to_string()))?;
        Ok(Self { config, format })
    }

    pub fn open_manager(&self) -> Result<Manager> {
        let dir = self.config.resolve_state_dir()?;
        tracing::debug!(state_dir = %dir.display(), "opening store");
        let store = Store::open(&dir)
            .with_context(|| format!("failed to open store in {}", dir.display()))?;
        Ok(FlightPlanManager::new(StoreRepository::new(store), SystemClock))
    }
}
