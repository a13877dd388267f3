// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk flight-plan store: snapshot plus WAL in one state directory.

use crate::snapshot::{Snapshot, SnapshotError};
use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};
use fp_core::Event;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// WAL entries past the last snapshot that trigger a checkpoint
pub const CHECKPOINT_INTERVAL: u64 = 256;

const SNAPSHOT_FILE: &str = "snapshot.json";
const WAL_FILE: &str = "events.wal";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("WAL error: {0}")]
    Wal(#[from] WalError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Store {
    dir: PathBuf,
    state: MaterializedState,
    wal: Wal,
    snapshot_seq: u64,
}

impl Store {
    /// Open the store in `dir`, recovering state from snapshot and WAL.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir)?;
        let (mut state, snapshot_seq) = match Snapshot::load(&dir.join(SNAPSHOT_FILE))? {
            Some(snapshot) => (snapshot.state, snapshot.seq),
            None => (MaterializedState::default(), 0),
        };

        let wal = Wal::open(&dir.join(WAL_FILE), snapshot_seq)?;
        let replay = wal.entries_after(snapshot_seq)?;
        for entry in &replay {
            state.apply_event(&entry.event);
        }
        tracing::debug!(
            dir = %dir.display(),
            snapshot_seq,
            replayed = replay.len(),
            flight_plans = state.flight_plans.len(),
            "opened store"
        );

        Ok(Self { dir: dir.to_path_buf(), state, wal, snapshot_seq })
    }

    pub fn state(&self) -> &MaterializedState {
        &self.state
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Durably record `event` and fold it into the state.
    pub fn apply(&mut self, event: &Event) -> Result<u64, StorageError> {
        let seq = self.wal.append(event)?;
        self.wal.flush()?;
        self.state.apply_event(event);
        tracing::trace!(seq, flight_plan_id = %event.flight_plan_id(), "{}", event.log_summary());

        // Event is durable here; checkpoint is retried on the next apply.
        if seq - self.snapshot_seq >= CHECKPOINT_INTERVAL {
            if let Err(e) = self.checkpoint() {
                tracing::warn!(seq, error = %e, "checkpoint failed");
            }
        }
        Ok(seq)
    }

    /// Snapshot the current state and drop the WAL entries it covers.
    pub fn checkpoint(&mut self) -> Result<(), StorageError> {
        let seq = self.wal.write_seq();
        Snapshot::new(seq, self.state.clone()).save(&self.dir.join(SNAPSHOT_FILE))?;
        self.wal.truncate_before(seq + 1)?;
        self.snapshot_seq = seq;
        tracing::info!(seq, "checkpoint");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
