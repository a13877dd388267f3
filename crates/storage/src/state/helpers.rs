// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helper functions for state queries.

use fp_core::FlightPlan;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Get a value by exact ID or unique prefix.
///
/// Matches against both the full key and the suffix after the type prefix
/// (e.g. "fpl-"). Ambiguous prefixes match nothing.
pub(crate) fn find_by_prefix<'a, V>(map: &'a HashMap<String, V>, id: &str) -> Option<&'a V> {
    if let Some(val) = map.get(id) {
        return Some(val);
    }
    let matches: Vec<_> = map.iter().filter(|(k, _)| fp_core::id::prefix_matches(k, id)).collect();
    if matches.len() == 1 {
        Some(matches[0].1)
    } else {
        None
    }
}

/// Sort by `last_update_ms` descending, ties broken by ID for stable output.
pub(crate) fn newest_first(plans: &mut [&FlightPlan]) {
    plans.sort_by_key(|p| (Reverse(p.last_update_ms), p.id.clone()));
}
