// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot schema migrations.
//!
//! Snapshots are migrated as raw JSON before deserialization, one version
//! step at a time.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("snapshot version {0} is newer than supported version {1}")]
    TooNew(u32, u32),
    #[error("no migration path from version {0} to {1}")]
    NoPath(u32, u32),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// One schema step, `source_version` to `target_version`.
pub trait Migration: Send + Sync {
    fn source_version(&self) -> u32;
    fn target_version(&self) -> u32;
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError>;
}

#[derive(Default)]
pub struct MigrationRegistry {
    pub(crate) migrations: Vec<Box<dyn Migration>>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, migration: impl Migration + 'static) {
        self.migrations.push(Box::new(migration));
    }

    /// Migrate `snapshot` (with its `"v"` field) up to `target`.
    pub fn migrate_to(&self, mut snapshot: Value, target: u32) -> Result<Value, MigrationError> {
        let mut version = snapshot_version(&snapshot)?;
        if version > target {
            return Err(MigrationError::TooNew(version, target));
        }
        while version < target {
            let step = self
                .migrations
                .iter()
                .find(|m| m.source_version() == version)
                .ok_or(MigrationError::NoPath(version, target))?;
            step.migrate(&mut snapshot)?;
            version = step.target_version();
            match snapshot.as_object_mut() {
                Some(obj) => {
                    obj.insert("v".into(), version.into());
                }
                None => return Err(MigrationError::Invalid("snapshot is not an object".into())),
            }
            tracing::info!(version, "migrated snapshot");
        }
        Ok(snapshot)
    }
}

fn snapshot_version(snapshot: &Value) -> Result<u32, MigrationError> {
    snapshot
        .get("v")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| MigrationError::Invalid("missing version field `v`".into()))
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
