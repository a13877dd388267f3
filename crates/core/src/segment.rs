// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line segments between consecutive waypoints of an authored plan.
//!
//! A segment holds only the ordinal of its origin waypoint; the destination
//! is always the next waypoint. Editing the waypoint list shifts ordinals
//! locally, with no back-references to the waypoints themselves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("waypoint ordinal {at} out of range for {count} waypoints")]
    OutOfRange { at: usize, count: usize },
}

/// Segment from waypoint `origin` to waypoint `origin + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointSegment {
    origin: usize,
}

impl WaypointSegment {
    pub fn new(origin: usize) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn destination(&self) -> usize {
        self.origin + 1
    }

    pub fn increment(&mut self) {
        self.origin += 1;
    }

    pub fn decrement(&mut self) {
        self.origin = self.origin.saturating_sub(1);
    }
}

/// A waypoint was inserted at ordinal `at`: segments starting at or after it move up.
pub fn shift_for_insert(segments: &mut [WaypointSegment], at: usize) {
    segments.iter_mut().filter(|s| s.origin >= at).for_each(WaypointSegment::increment);
}

/// The waypoint at ordinal `at` was removed: segments starting after it move down.
pub fn shift_for_remove(segments: &mut [WaypointSegment], at: usize) {
    segments.iter_mut().filter(|s| s.origin > at).for_each(WaypointSegment::decrement);
}

/// Contiguous segments over a waypoint list, kept in origin order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentChain {
    waypoint_count: usize,
    segments: Vec<WaypointSegment>,
}

impl SegmentChain {
    pub fn for_waypoints(waypoint_count: usize) -> Self {
        let segments = (0..waypoint_count.saturating_sub(1)).map(WaypointSegment::new).collect();
        Self { waypoint_count, segments }
    }

    pub fn segments(&self) -> &[WaypointSegment] {
        &self.segments
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_count
    }

    /// Record a waypoint inserted at ordinal `at` (`at == count` appends).
    pub fn waypoint_inserted(&mut self, at: usize) -> Result<(), SegmentError> {
        if at > self.waypoint_count {
            return Err(SegmentError::OutOfRange { at, count: self.waypoint_count });
        }
        shift_for_insert(&mut self.segments, at);
        if self.waypoint_count > 0 {
            // The one origin left uncovered by the shift
            let origin = at.min(self.waypoint_count - 1);
            self.segments.insert(origin, WaypointSegment::new(origin));
        }
        self.waypoint_count += 1;
        Ok(())
    }

    /// Record removal of the waypoint at ordinal `at`.
    pub fn waypoint_removed(&mut self, at: usize) -> Result<(), SegmentError> {
        if at >= self.waypoint_count {
            return Err(SegmentError::OutOfRange { at, count: self.waypoint_count });
        }
        if !self.segments.is_empty() {
            // Outgoing segment, or incoming for the last waypoint
            let origin = at.min(self.segments.len() - 1);
            self.segments.remove(origin);
        }
        shift_for_remove(&mut self.segments, at);
        self.waypoint_count -= 1;
        Ok(())
    }

    /// Every waypoint pair is connected exactly once.
    pub fn is_contiguous(&self) -> bool {
        self.segments.len() == self.waypoint_count.saturating_sub(1)
            && self.segments.iter().enumerate().all(|(i, s)| s.origin == i)
    }
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
