// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fp-storage: durable flight-plan store
//!
//! Events are appended to a write-ahead log and folded into
//! [`MaterializedState`]. Periodic zstd snapshots bound replay time.

mod migration;
mod snapshot;
mod state;
mod store;
mod wal;

pub use migration::{Migration, MigrationError, MigrationRegistry};
pub use snapshot::{Snapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use state::MaterializedState;
pub use store::{StorageError, Store, CHECKPOINT_INTERVAL};
pub use wal::{Wal, WalEntry, WalError};
