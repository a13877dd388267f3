// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mission plans: the ordered command sequence a flight plan runs as.

use crate::command::Command;
use crate::item::{MissionItem, TranslateError};
use crate::wire::{self, RawCommand, WireError};

/// Ordered command sequence derived from a flight plan.
///
/// Command indices of waypoint commands are computed once on construction;
/// progress updates look them up on every report.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionPlan {
    commands: Vec<Command>,
    waypoint_indices: Vec<usize>,
}

/// Authored items recovered from a command list, with the commands that
/// have no authored form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interpretation {
    pub items: Vec<MissionItem>,
    /// Command index and reason for every skipped command
    pub skipped: Vec<(usize, TranslateError)>,
    /// The plan ends with a return-to-launch command
    pub return_to_launch: bool,
}

impl Interpretation {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl MissionPlan {
    pub fn new(commands: Vec<Command>) -> Self {
        let waypoint_indices = commands
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_waypoint())
            .map(|(i, _)| i)
            .collect();
        Self { commands, waypoint_indices }
    }

    /// Translate authored items one-to-one, optionally ending with return-to-launch.
    pub fn from_items(items: &[MissionItem], return_to_launch: bool) -> Self {
        let mut commands: Vec<Command> = items.iter().map(MissionItem::to_command).collect();
        if return_to_launch {
            commands.push(Command::ReturnToLaunch);
        }
        Self::new(commands)
    }

    pub fn from_raw(rows: &[RawCommand]) -> Self {
        Self::new(rows.iter().map(Command::from_raw).collect())
    }

    pub fn from_plan_file(text: &str) -> Result<Self, WireError> {
        Ok(Self::from_raw(&wire::parse_plan_file(text)?))
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command indices of the waypoint commands, ascending.
    pub fn waypoint_indices(&self) -> &[usize] {
        &self.waypoint_indices
    }

    pub fn first_waypoint_index(&self) -> Option<usize> {
        self.waypoint_indices.first().copied()
    }

    pub fn last_waypoint_index(&self) -> Option<usize> {
        self.waypoint_indices.last().copied()
    }

    /// Ordinal of the highest waypoint whose command index is `<= index`.
    pub fn last_passed_waypoint(&self, index: usize) -> Option<usize> {
        self.waypoint_indices.partition_point(|&i| i <= index).checked_sub(1)
    }

    /// Percentage of the plan completed once command `index` has executed.
    pub fn percent_completed(&self, index: usize) -> f64 {
        if self.commands.len() <= 1 {
            return 100.0;
        }
        let last = (self.commands.len() - 1) as f64;
        (100.0 * index as f64 / last).clamp(0.0, 100.0)
    }

    /// Protocol rows, with `acceptance_radius` in every waypoint row.
    pub fn to_raw(&self, acceptance_radius: f64) -> Vec<RawCommand> {
        self.commands
            .iter()
            .enumerate()
            .map(|(seq, command)| {
                let mut row = command.to_raw(seq.min(u16::MAX as usize) as u16);
                if command.is_waypoint() {
                    row.param2 = acceptance_radius;
                }
                row
            })
            .collect()
    }

    pub fn to_plan_file(&self, acceptance_radius: f64) -> String {
        wire::write_plan_file(&self.to_raw(acceptance_radius))
    }

    /// Recover authored items. A trailing return-to-launch becomes
    /// [`Interpretation::return_to_launch`]. Other commands without an
    /// authored form are skipped and logged; the rest of the plan is still
    /// interpreted.
    pub fn interpret(&self) -> Interpretation {
        let mut out = Interpretation::default();
        let mut commands = self.commands.as_slice();
        if let [rest @ .., Command::ReturnToLaunch] = commands {
            out.return_to_launch = true;
            commands = rest;
        }
        for (index, command) in commands.iter().enumerate() {
            match MissionItem::from_command(command) {
                Ok(item) => out.items.push(item),
                Err(err) => {
                    match &err {
                        TranslateError::Unsupported { .. } => {
                            tracing::warn!(index, command = %command, "{err}")
                        }
                        TranslateError::UnknownCommand(id) => {
                            tracing::error!(index, command_id = *id, "{err}")
                        }
                    }
                    out.skipped.push((index, err));
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
