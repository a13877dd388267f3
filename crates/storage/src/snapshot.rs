// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot persistence.
//!
//! A snapshot stores the complete materialized state at a point in time,
//! identified by the WAL sequence number it covers. Recovery loads the
//! snapshot and replays WAL entries after that sequence.

use crate::migration::{MigrationError, MigrationRegistry};
use crate::state::MaterializedState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current snapshot schema version
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version for migrations
    #[serde(rename = "v")]
    pub version: u32,
    /// WAL sequence number at the time of snapshot
    pub seq: u64,
    pub state: MaterializedState,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(seq: u64, state: MaterializedState) -> Self {
        Self { version: CURRENT_SNAPSHOT_VERSION, seq, state, created_at: Utc::now() }
    }

    /// Write zstd-compressed JSON via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec(self)?;
        let compressed = zstd::encode_all(json.as_slice(), ZSTD_LEVEL)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, compressed)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(seq = self.seq, path = %path.display(), "saved snapshot");
        Ok(())
    }

    /// Load and migrate a snapshot. `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Snapshot>, SnapshotError> {
        Self::load_with(path, &MigrationRegistry::new())
    }

    pub fn load_with(
        path: &Path,
        registry: &MigrationRegistry,
    ) -> Result<Option<Snapshot>, SnapshotError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let json = zstd::decode_all(bytes.as_slice())?;
        let raw: serde_json::Value = serde_json::from_slice(&json)?;
        let migrated = registry.migrate_to(raw, CURRENT_SNAPSHOT_VERSION)?;
        Ok(Some(serde_json::from_value(migrated)?))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
