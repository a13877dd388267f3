// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fp-engine: flight-plan services
//!
//! [`FlightPlanManager`] owns flight-plan mutations and their persistence;
//! [`MissionProgressTracker`] applies drone progress reports to running
//! missions.

mod manager;
mod repository;
mod tracker;

pub use manager::{FlightPlanManager, ManagerError};
#[cfg(any(test, feature = "test-support"))]
pub use repository::FakeRepository;
pub use repository::{FlightPlanRepository, RepositoryError, StoreRepository};
pub use tracker::{MissionProgressTracker, RunOutcome};
