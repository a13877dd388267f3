// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authored mission items and their translation to protocol commands.
//!
//! Translation is permissive: parameters missing on an authored item become
//! `0` in the command. Validation of authored items happens upstream.

use crate::command::{Command, PhotoMode};
use crate::resolution::{PhotoFormat, RecordingResolution};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from translating a command back into an authored item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("{kind} command (id {command_id}) has no authored equivalent")]
    Unsupported { kind: String, command_id: u16 },
    #[error("unknown command id {0}")]
    UnknownCommand(u16),
}

/// Kind of drone action an operator can place in a flight plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TakeOff,
    Landing,
    Tilt,
    Delay,
    ImageStartCapture,
    ImageStopCapture,
    VideoStartCapture,
    VideoStopCapture,
    Panorama,
    StillCapture,
}

crate::simple_display! {
    ActionType {
        TakeOff => "take_off",
        Landing => "landing",
        Tilt => "tilt",
        Delay => "delay",
        ImageStartCapture => "image_start_capture",
        ImageStopCapture => "image_stop_capture",
        VideoStartCapture => "video_start_capture",
        VideoStopCapture => "video_stop_capture",
        Panorama => "panorama",
        StillCapture => "still_capture",
    }
}

/// A flight-plan action such as "start photo capture" or "stop video capture".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// Gimbal tilt or panorama horizontal angle, degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Angular speed, degrees per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Delay duration, seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    /// Photo capture interval, seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<PhotoMode>,
    /// Encoded recording resolution or photo format (see [`crate::resolution`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) resolution: Option<f64>,
}

impl Action {
    pub fn new(kind: ActionType) -> Self {
        Self {
            kind,
            angle: None,
            speed: None,
            delay: None,
            period: None,
            picture_count: None,
            capture_mode: None,
            resolution: None,
        }
    }

    /// Action that moves the camera tilt to `angle` at `speed`.
    pub fn tilt(angle: f64, speed: f64) -> Self {
        Self { angle: Some(angle), speed: Some(speed), ..Self::new(ActionType::Tilt) }
    }

    /// Action that pauses the flight plan for `seconds`.
    pub fn delay(seconds: f64) -> Self {
        Self { delay: Some(seconds), ..Self::new(ActionType::Delay) }
    }

    /// Raw encoded resolution value, if any.
    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    /// Recording resolution, or `None` if the encoded value matches no table entry.
    pub fn recording_resolution(&self) -> Option<RecordingResolution> {
        self.resolution.and_then(RecordingResolution::decode)
    }

    pub fn set_recording_resolution(&mut self, resolution: RecordingResolution) {
        self.resolution = Some(resolution.encode());
    }

    /// Photo format, or `None` if the encoded value matches no table entry.
    pub fn photo_format(&self) -> Option<PhotoFormat> {
        self.resolution.and_then(PhotoFormat::decode)
    }

    pub fn set_photo_format(&mut self, format: PhotoFormat) {
        self.resolution = Some(format.encode());
    }

    pub fn to_command(&self) -> Command {
        match self.kind {
            ActionType::TakeOff => Command::TakeOff,
            ActionType::Landing => Command::Land,
            ActionType::Tilt => {
                Command::SetGimbalTilt { tilt_angle: self.angle.unwrap_or(0.0), yaw: 0.0 }
            }
            ActionType::Delay => Command::Delay { seconds: self.delay.unwrap_or(0.0) },
            ActionType::ImageStartCapture => Command::StartPhotoCapture {
                interval: self.period.unwrap_or(0.0),
                count: self.picture_count.unwrap_or(0),
                sequence_number: 0,
            },
            ActionType::ImageStopCapture => Command::StopPhotoCapture,
            ActionType::VideoStartCapture => Command::StartVideoCapture,
            ActionType::VideoStopCapture => Command::StopVideoCapture,
            ActionType::Panorama => Command::CreatePanorama {
                horizontal_angle: self.angle.unwrap_or(0.0),
                horizontal_speed: self.speed.unwrap_or(0.0),
                vertical_angle: 0.0,
                vertical_speed: 0.0,
            },
            ActionType::StillCapture => {
                Command::SetStillCaptureMode { mode: self.capture_mode.unwrap_or_default() }
            }
        }
    }
}

/// An authored waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the take-off point
    pub altitude: f64,
    /// Heading in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f64>,
    /// Seconds to hold at the waypoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<f64>,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude, yaw: None, hold_time: None }
    }
}

/// A user-authored element of a flight plan, prior to protocol translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum MissionItem {
    Waypoint(Waypoint),
    Action(Action),
}

impl MissionItem {
    pub fn is_waypoint(&self) -> bool {
        matches!(self, MissionItem::Waypoint(_))
    }

    /// Translate to exactly one command. Total over all item kinds.
    pub fn to_command(&self) -> Command {
        match self {
            MissionItem::Waypoint(wp) => Command::Waypoint {
                latitude: wp.latitude,
                longitude: wp.longitude,
                altitude: wp.altitude,
                yaw: wp.yaw.unwrap_or(0.0),
                hold_time: wp.hold_time.unwrap_or(0.0),
            },
            MissionItem::Action(action) => action.to_command(),
        }
    }

    /// Translate a command back into an authored item.
    pub fn from_command(command: &Command) -> Result<Self, TranslateError> {
        let action =
            |kind: ActionType| -> Result<Self, TranslateError> { Ok(Action::new(kind).into()) };
        match command {
            Command::Waypoint { latitude, longitude, altitude, yaw, hold_time } => {
                Ok(MissionItem::Waypoint(Waypoint {
                    latitude: *latitude,
                    longitude: *longitude,
                    altitude: *altitude,
                    yaw: Some(*yaw),
                    hold_time: Some(*hold_time),
                }))
            }
            Command::TakeOff => action(ActionType::TakeOff),
            Command::Land => action(ActionType::Landing),
            Command::SetGimbalTilt { tilt_angle, .. } => Ok(MissionItem::Action(Action {
                angle: Some(*tilt_angle),
                ..Action::new(ActionType::Tilt)
            })),
            Command::Delay { seconds } => {
                Ok(MissionItem::Action(Action { delay: Some(*seconds), ..Action::new(ActionType::Delay) }))
            }
            Command::StartPhotoCapture { interval, count, .. } => Ok(MissionItem::Action(Action {
                period: Some(*interval),
                picture_count: Some(*count),
                ..Action::new(ActionType::ImageStartCapture)
            })),
            Command::StopPhotoCapture => action(ActionType::ImageStopCapture),
            Command::StartVideoCapture => action(ActionType::VideoStartCapture),
            Command::StopVideoCapture => action(ActionType::VideoStopCapture),
            Command::CreatePanorama { horizontal_angle, horizontal_speed, .. } => {
                Ok(MissionItem::Action(Action {
                    angle: Some(*horizontal_angle),
                    speed: Some(*horizontal_speed),
                    ..Action::new(ActionType::Panorama)
                }))
            }
            Command::SetStillCaptureMode { mode } => Ok(MissionItem::Action(Action {
                capture_mode: Some(*mode),
                ..Action::new(ActionType::StillCapture)
            })),
            Command::ReturnToLaunch => Err(TranslateError::Unsupported {
                kind: command.to_string(),
                command_id: command.command_id(),
            }),
            Command::Unknown { raw } => Err(TranslateError::UnknownCommand(raw.command)),
        }
    }
}

impl From<Waypoint> for MissionItem {
    fn from(wp: Waypoint) -> Self {
        MissionItem::Waypoint(wp)
    }
}

impl From<Action> for MissionItem {
    fn from(action: Action) -> Self {
        MissionItem::Action(action)
    }
}

impl TryFrom<&Command> for MissionItem {
    type Error = TranslateError;

    fn try_from(command: &Command) -> Result<Self, Self::Error> {
        MissionItem::from_command(command)
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
