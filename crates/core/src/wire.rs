// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MAVLink mission rows and the `QGC WPL 110` plan-file format.
//!
//! Each [`RawCommand`] is one `MISSION_ITEM` row. Waypoint coordinates are
//! stored in degrees as the text format does; [`RawCommand::to_mission_item_int`]
//! produces the scaled `MISSION_ITEM_INT` payload sent over the link.

use crate::command::{Command, PhotoMode, SET_STILL_CAPTURE_MODE};
use mavlink::common::{MavCmd, MavFrame, MavMissionType, MavMountMode, MISSION_ITEM_INT_DATA};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAN_FILE_HEADER: &str = "QGC WPL 110";

/// The row carries no position.
pub const FRAME_MISSION: u8 = MavFrame::MAV_FRAME_MISSION as u8;
pub const FRAME_GLOBAL_RELATIVE_ALT: u8 = MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT as u8;

/// Carried in `z` of mount control rows.
pub const MOUNT_MODE_TARGETING: f64 = MavMountMode::MAV_MOUNT_MODE_MAVLINK_TARGETING as u8 as f64;

/// Acceptance radius written into waypoint rows, meters
pub const DEFAULT_ACCEPTANCE_RADIUS: f64 = 5.0;

const FIELD_COUNT: usize = 12;

/// Errors from reading a plan file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    #[error("missing plan file header, expected `{PLAN_FILE_HEADER}`")]
    BadHeader,
    #[error("line {line}: expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField { line: usize, field: &'static str, value: String },
    #[error("command id {0} is not in the common dialect")]
    NotInDialect(u16),
    #[error("unknown frame {0}")]
    UnknownFrame(u8),
}

/// One protocol row of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    pub seq: u16,
    pub current: bool,
    pub frame: u8,
    pub command: u16,
    pub param1: f64,
    pub param2: f64,
    pub param3: f64,
    pub param4: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub autocontinue: bool,
}

impl Default for RawCommand {
    fn default() -> Self {
        Self {
            seq: 0,
            current: false,
            frame: FRAME_MISSION,
            command: 0,
            param1: 0.0,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            autocontinue: true,
        }
    }
}

impl Command {
    /// Encode as the protocol row at position `seq`.
    pub fn to_raw(&self, seq: u16) -> RawCommand {
        let row = RawCommand { seq, command: self.command_id(), ..RawCommand::default() };
        match *self {
            Command::Waypoint { latitude, longitude, altitude, yaw, hold_time } => RawCommand {
                frame: FRAME_GLOBAL_RELATIVE_ALT,
                param1: hold_time,
                param2: DEFAULT_ACCEPTANCE_RADIUS,
                param4: yaw,
                x: latitude,
                y: longitude,
                z: altitude,
                ..row
            },
            Command::TakeOff
            | Command::Land
            | Command::ReturnToLaunch
            | Command::StopPhotoCapture
            | Command::StartVideoCapture
            | Command::StopVideoCapture => row,
            Command::SetGimbalTilt { tilt_angle, yaw } => {
                RawCommand { param1: tilt_angle, param3: yaw, z: MOUNT_MODE_TARGETING, ..row }
            }
            // param2..4 = -1 tells the autopilot to use the relative delay in param1
            Command::Delay { seconds } => {
                RawCommand { param1: seconds, param2: -1.0, param3: -1.0, param4: -1.0, ..row }
            }
            Command::StartPhotoCapture { interval, count, sequence_number } => RawCommand {
                param2: interval,
                param3: f64::from(count),
                param4: f64::from(sequence_number),
                ..row
            },
            Command::CreatePanorama {
                horizontal_angle,
                horizontal_speed,
                vertical_angle,
                vertical_speed,
            } => RawCommand {
                param1: horizontal_angle,
                param2: horizontal_speed,
                param3: vertical_angle,
                param4: vertical_speed,
                ..row
            },
            Command::SetStillCaptureMode { mode } => RawCommand { param1: mode.wire_value(), ..row },
            Command::Unknown { raw } => RawCommand { seq, ..raw },
        }
    }

    /// Decode a protocol row. Unmodelled command IDs become [`Command::Unknown`].
    pub fn from_raw(raw: &RawCommand) -> Command {
        if raw.command == SET_STILL_CAPTURE_MODE {
            return match PhotoMode::from_wire(raw.param1) {
                Some(mode) => Command::SetStillCaptureMode { mode },
                None => Command::Unknown { raw: *raw },
            };
        }
        let Some(cmd) = MavCmd::from_u16(raw.command) else {
            return Command::Unknown { raw: *raw };
        };
        match cmd {
            MavCmd::MAV_CMD_NAV_WAYPOINT => Command::Waypoint {
                latitude: raw.x,
                longitude: raw.y,
                altitude: raw.z,
                yaw: raw.param4,
                hold_time: raw.param1,
            },
            MavCmd::MAV_CMD_NAV_TAKEOFF => Command::TakeOff,
            MavCmd::MAV_CMD_NAV_LAND => Command::Land,
            MavCmd::MAV_CMD_NAV_RETURN_TO_LAUNCH => Command::ReturnToLaunch,
            MavCmd::MAV_CMD_DO_MOUNT_CONTROL => {
                Command::SetGimbalTilt { tilt_angle: raw.param1, yaw: raw.param3 }
            }
            MavCmd::MAV_CMD_NAV_DELAY => Command::Delay { seconds: raw.param1 },
            MavCmd::MAV_CMD_IMAGE_START_CAPTURE => Command::StartPhotoCapture {
                interval: raw.param2,
                count: count_param(raw.param3),
                sequence_number: count_param(raw.param4),
            },
            MavCmd::MAV_CMD_IMAGE_STOP_CAPTURE => Command::StopPhotoCapture,
            MavCmd::MAV_CMD_VIDEO_START_CAPTURE => Command::StartVideoCapture,
            MavCmd::MAV_CMD_VIDEO_STOP_CAPTURE => Command::StopVideoCapture,
            MavCmd::MAV_CMD_PANORAMA_CREATE => Command::CreatePanorama {
                horizontal_angle: raw.param1,
                horizontal_speed: raw.param2,
                vertical_angle: raw.param3,
                vertical_speed: raw.param4,
            },
            _ => Command::Unknown { raw: *raw },
        }
    }
}

impl RawCommand {
    /// `MISSION_ITEM_INT` payload addressed to one vehicle component.
    ///
    /// Global positions are sent as degrees * 1e7, local ones as meters * 1e4.
    pub fn to_mission_item_int(
        &self,
        target_system: u8,
        target_component: u8,
    ) -> Result<MISSION_ITEM_INT_DATA, WireError> {
        let command = MavCmd::from_u16(self.command).ok_or(WireError::NotInDialect(self.command))?;
        let frame = MavFrame::from_u8(self.frame).ok_or(WireError::UnknownFrame(self.frame))?;
        let scale = position_scale(frame);
        Ok(MISSION_ITEM_INT_DATA {
            target_system,
            target_component,
            seq: self.seq,
            frame,
            command,
            current: u8::from(self.current),
            autocontinue: u8::from(self.autocontinue),
            param1: self.param1 as f32,
            param2: self.param2 as f32,
            param3: self.param3 as f32,
            param4: self.param4 as f32,
            x: (self.x * scale).round() as i32,
            y: (self.y * scale).round() as i32,
            z: self.z as f32,
            mission_type: MavMissionType::MAV_MISSION_TYPE_MISSION,
        })
    }

    pub fn from_mission_item_int(data: &MISSION_ITEM_INT_DATA) -> Self {
        let scale = position_scale(data.frame);
        Self {
            seq: data.seq,
            current: data.current != 0,
            frame: data.frame as u8,
            command: data.command as u16,
            param1: f64::from(data.param1),
            param2: f64::from(data.param2),
            param3: f64::from(data.param3),
            param4: f64::from(data.param4),
            x: f64::from(data.x) / scale,
            y: f64::from(data.y) / scale,
            z: f64::from(data.z),
            autocontinue: data.autocontinue != 0,
        }
    }
}

fn position_scale(frame: MavFrame) -> f64 {
    match frame {
        MavFrame::MAV_FRAME_GLOBAL
        | MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT
        | MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT => 1e7,
        _ => 1e4,
    }
}

fn count_param(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Render rows as a `QGC WPL 110` plan file.
pub fn write_plan_file(rows: &[RawCommand]) -> String {
    let mut out = String::from(PLAN_FILE_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            row.seq,
            u8::from(row.current),
            row.frame,
            row.command,
            row.param1,
            row.param2,
            row.param3,
            row.param4,
            row.x,
            row.y,
            row.z,
            u8::from(row.autocontinue),
        ));
    }
    out
}

/// Parse a `QGC WPL 110` plan file. Blank lines are skipped.
pub fn parse_plan_file(text: &str) -> Result<Vec<RawCommand>, WireError> {
    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.trim() == PLAN_FILE_HEADER => {}
        _ => return Err(WireError::BadHeader),
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(WireError::FieldCount { line: line_no, found: fields.len() });
        }
        let field = |i: usize| fields[i];
        rows.push(RawCommand {
            seq: parse(line_no, "seq", field(0))?,
            current: parse::<u8>(line_no, "current", field(1))? != 0,
            frame: parse(line_no, "frame", field(2))?,
            command: parse(line_no, "command", field(3))?,
            param1: parse(line_no, "param1", field(4))?,
            param2: parse(line_no, "param2", field(5))?,
            param3: parse(line_no, "param3", field(6))?,
            param4: parse(line_no, "param4", field(7))?,
            x: parse(line_no, "x", field(8))?,
            y: parse(line_no, "y", field(9))?,
            z: parse(line_no, "z", field(10))?,
            autocontinue: parse::<u8>(line_no, "autocontinue", field(11))? != 0,
        });
    }
    Ok(rows)
}

fn parse<T: std::str::FromStr>(line: usize, field: &'static str, value: &str) -> Result<T, WireError> {
    value.parse().map_err(|_| WireError::InvalidField { line, field, value: value.to_string() })
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
