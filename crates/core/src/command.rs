// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol-level mission commands.
//!
//! A [`Command`] is one directive uploaded to the drone. Command IDs come
//! from the MAVLink common dialect; the still-capture-mode command lives in
//! the vendor extension range.

use crate::wire::RawCommand;
use mavlink::common::MavCmd;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Vendor command selecting the still capture mode. Not part of the common dialect.
pub const SET_STILL_CAPTURE_MODE: u16 = 50001;

/// Photo mode applied by a still-capture-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoMode {
    #[default]
    Rectilinear,
    FullFrame,
}

impl PhotoMode {
    /// Numeric value carried in `param1`.
    pub fn wire_value(self) -> f64 {
        match self {
            PhotoMode::Rectilinear => 0.0,
            PhotoMode::FullFrame => 1.0,
        }
    }

    pub fn from_wire(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(PhotoMode::Rectilinear)
        } else if value == 1.0 {
            Some(PhotoMode::FullFrame)
        } else {
            None
        }
    }
}

crate::simple_display! {
    PhotoMode {
        Rectilinear => "rectilinear",
        FullFrame => "full_frame",
    }
}

/// A single directive sent to the drone.
///
/// Serializes with `{"kind": "snake_case_name", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Fly to a location. Latitude/longitude in degrees, altitude in meters
    /// relative to take-off.
    Waypoint { latitude: f64, longitude: f64, altitude: f64, yaw: f64, hold_time: f64 },
    TakeOff,
    Land,
    /// Drone-generated; has no authored form.
    ReturnToLaunch,
    SetGimbalTilt { tilt_angle: f64, yaw: f64 },
    Delay { seconds: f64 },
    StartPhotoCapture { interval: f64, count: u32, sequence_number: u32 },
    StopPhotoCapture,
    StartVideoCapture,
    StopVideoCapture,
    CreatePanorama {
        horizontal_angle: f64,
        horizontal_speed: f64,
        vertical_angle: f64,
        vertical_speed: f64,
    },
    SetStillCaptureMode { mode: PhotoMode },
    /// A protocol row this crate does not model. Kept so command indices of a
    /// downloaded plan stay aligned with the drone's.
    Unknown { raw: RawCommand },
}

crate::simple_display! {
    Command {
        Waypoint { .. } => "waypoint",
        TakeOff => "take_off",
        Land => "land",
        ReturnToLaunch => "return_to_launch",
        SetGimbalTilt { .. } => "set_gimbal_tilt",
        Delay { .. } => "delay",
        StartPhotoCapture { .. } => "start_photo_capture",
        StopPhotoCapture => "stop_photo_capture",
        StartVideoCapture => "start_video_capture",
        StopVideoCapture => "stop_video_capture",
        CreatePanorama { .. } => "create_panorama",
        SetStillCaptureMode { .. } => "set_still_capture_mode",
        Unknown { .. } => "unknown",
    }
}

impl Command {
    /// Common-dialect command, `None` for vendor and unlisted IDs.
    pub fn mav_cmd(&self) -> Option<MavCmd> {
        let cmd = match self {
            Command::Waypoint { .. } => MavCmd::MAV_CMD_NAV_WAYPOINT,
            Command::TakeOff => MavCmd::MAV_CMD_NAV_TAKEOFF,
            Command::Land => MavCmd::MAV_CMD_NAV_LAND,
            Command::ReturnToLaunch => MavCmd::MAV_CMD_NAV_RETURN_TO_LAUNCH,
            Command::SetGimbalTilt { .. } => MavCmd::MAV_CMD_DO_MOUNT_CONTROL,
            Command::Delay { .. } => MavCmd::MAV_CMD_NAV_DELAY,
            Command::StartPhotoCapture { .. } => MavCmd::MAV_CMD_IMAGE_START_CAPTURE,
            Command::StopPhotoCapture => MavCmd::MAV_CMD_IMAGE_STOP_CAPTURE,
            Command::StartVideoCapture => MavCmd::MAV_CMD_VIDEO_START_CAPTURE,
            Command::StopVideoCapture => MavCmd::MAV_CMD_VIDEO_STOP_CAPTURE,
            Command::CreatePanorama { .. } => MavCmd::MAV_CMD_PANORAMA_CREATE,
            Command::SetStillCaptureMode { .. } => return None,
            Command::Unknown { raw } => return MavCmd::from_u16(raw.command),
        };
        Some(cmd)
    }

    /// Numeric MAVLink command ID of this command.
    pub fn command_id(&self) -> u16 {
        match self {
            Command::SetStillCaptureMode { .. } => SET_STILL_CAPTURE_MODE,
            Command::Unknown { raw } => raw.command,
            _ => self.mav_cmd().map_or(0, |cmd| cmd as u16),
        }
    }

    /// Whether this command counts as a waypoint for progress tracking.
    pub fn is_waypoint(&self) -> bool {
        matches!(self, Command::Waypoint { .. })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
