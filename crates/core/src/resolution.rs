// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution and photo-format encoding.
//!
//! Authored capture actions store either a video recording resolution or a
//! photo format in a single numeric `resolution` field. The values below are
//! shared with the drone firmware and must stay bit-exact.

use serde::{Deserialize, Serialize};

pub const RESOLUTION_DCI_4K: f64 = 4096.0 * 2160.0;
pub const RESOLUTION_UHD_4K: f64 = 3840.0 * 2160.0;
pub const RESOLUTION_2_7K: f64 = 2704.0 * 1524.0;
pub const RESOLUTION_1080P: f64 = 1920.0 * 1080.0;
pub const RESOLUTION_1080P_SD: f64 = 1440.0 * 1080.0;
pub const RESOLUTION_720P: f64 = 1280.0 * 720.0;
// Same value as 720p: decoding always yields `Res720p`.
pub const RESOLUTION_720P_SD: f64 = 1280.0 * 720.0;
pub const RESOLUTION_480P: f64 = 856.0 * 480.0;
pub const RESOLUTION_FULL_FRAME_JPEG: f64 = 13.6;
pub const RESOLUTION_RECTILINEAR_JPEG: f64 = 12.58291244506836;
pub const RESOLUTION_FULL_FRAME_DNG_JPEG: f64 = 14.0;

/// Video recording resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingResolution {
    Dci4k,
    Uhd4k,
    Res2_7k,
    Res1080p,
    Res1080pSd,
    Res720p,
    Res720pSd,
    Res480p,
}

/// Photo capture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoFormat {
    FullFrameJpeg,
    RectilinearJpeg,
    FullFrameDngJpeg,
}

const RECORDING_TABLE: [(RecordingResolution, f64); 8] = [
    (RecordingResolution::Dci4k, RESOLUTION_DCI_4K),
    (RecordingResolution::Uhd4k, RESOLUTION_UHD_4K),
    (RecordingResolution::Res2_7k, RESOLUTION_2_7K),
    (RecordingResolution::Res1080p, RESOLUTION_1080P),
    (RecordingResolution::Res1080pSd, RESOLUTION_1080P_SD),
    (RecordingResolution::Res720p, RESOLUTION_720P),
    (RecordingResolution::Res720pSd, RESOLUTION_720P_SD),
    (RecordingResolution::Res480p, RESOLUTION_480P),
];

const PHOTO_TABLE: [(PhotoFormat, f64); 3] = [
    (PhotoFormat::FullFrameJpeg, RESOLUTION_FULL_FRAME_JPEG),
    (PhotoFormat::RectilinearJpeg, RESOLUTION_RECTILINEAR_JPEG),
    (PhotoFormat::FullFrameDngJpeg, RESOLUTION_FULL_FRAME_DNG_JPEG),
];

impl RecordingResolution {
    pub const ALL: [RecordingResolution; 8] = [
        RecordingResolution::Dci4k,
        RecordingResolution::Uhd4k,
        RecordingResolution::Res2_7k,
        RecordingResolution::Res1080p,
        RecordingResolution::Res1080pSd,
        RecordingResolution::Res720p,
        RecordingResolution::Res720pSd,
        RecordingResolution::Res480p,
    ];

    pub fn encode(self) -> f64 {
        RECORDING_TABLE.iter().find(|(r, _)| *r == self).map(|(_, v)| *v).unwrap_or_default()
    }

    /// Returns `None` when the value matches no table entry.
    pub fn decode(value: f64) -> Option<Self> {
        RECORDING_TABLE.iter().find(|(_, v)| *v == value).map(|(r, _)| *r)
    }
}

impl PhotoFormat {
    pub const ALL: [PhotoFormat; 3] =
        [PhotoFormat::FullFrameJpeg, PhotoFormat::RectilinearJpeg, PhotoFormat::FullFrameDngJpeg];

    pub fn encode(self) -> f64 {
        PHOTO_TABLE.iter().find(|(p, _)| *p == self).map(|(_, v)| *v).unwrap_or_default()
    }

    /// Returns `None` when the value matches no table entry.
    pub fn decode(value: f64) -> Option<Self> {
        PHOTO_TABLE.iter().find(|(_, v)| *v == value).map(|(p, _)| *p)
    }
}

crate::simple_display! {
    RecordingResolution {
        Dci4k => "DCI 4K",
        Uhd4k => "UHD 4K",
        Res2_7k => "2.7K",
        Res1080p => "1080p",
        Res1080pSd => "1080p SD",
        Res720p => "720p",
        Res720pSd => "720p SD",
        Res480p => "480p",
    }
}

crate::simple_display! {
    PhotoFormat {
        FullFrameJpeg => "full-frame JPEG",
        RectilinearJpeg => "rectilinear JPEG",
        FullFrameDngJpeg => "full-frame DNG+JPEG",
    }
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;
