// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fp-core: flight-plan mission model, command translation and progress tracking

pub mod macros;

pub mod clock;
pub mod command;
pub mod config;
pub mod event;
pub mod flight_plan;
pub mod id;
pub mod item;
pub mod plan;
pub mod progress;
pub mod resolution;
pub mod segment;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{Command, PhotoMode};
pub use config::{Config, ConfigError};
pub use event::Event;
#[cfg(any(test, feature = "test-support"))]
pub use flight_plan::FlightPlanBuilder;
pub use flight_plan::{Flight, FlightPlan, FlightPlanState};
pub use id::{short, FlightPlanId, RunId, ThumbnailId};
pub use item::{Action, ActionType, MissionItem, TranslateError, Waypoint};
pub use plan::{Interpretation, MissionPlan};
pub use progress::{ExecutionProgress, IgnoreReason, ReportOutcome};
pub use resolution::{PhotoFormat, RecordingResolution};
pub use segment::{SegmentChain, SegmentError, WaypointSegment};
pub use wire::{RawCommand, WireError};
