// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Action, ActionType, Event, FlightPlan, FlightPlanId, MissionItem, Waypoint};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for commands, authored items, and progress reports.
pub mod strategies {
    use crate::command::{Command, PhotoMode};
    use crate::item::{Action, ActionType, MissionItem, Waypoint};
    use proptest::prelude::*;

    fn angle() -> impl Strategy<Value = f64> {
        -360.0f64..360.0
    }

    fn positive() -> impl Strategy<Value = f64> {
        0.0f64..600.0
    }

    pub fn arb_photo_mode() -> impl Strategy<Value = PhotoMode> {
        prop_oneof![Just(PhotoMode::Rectilinear), Just(PhotoMode::FullFrame)]
    }

    pub fn arb_action_type() -> impl Strategy<Value = ActionType> {
        prop_oneof![
            Just(ActionType::TakeOff),
            Just(ActionType::Landing),
            Just(ActionType::Tilt),
            Just(ActionType::Delay),
            Just(ActionType::ImageStartCapture),
            Just(ActionType::ImageStopCapture),
            Just(ActionType::VideoStartCapture),
            Just(ActionType::VideoStopCapture),
            Just(ActionType::Panorama),
            Just(ActionType::StillCapture),
        ]
    }

    /// Every command variant except `Unknown`.
    pub fn arb_modelled_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            (-90.0f64..90.0, -180.0f64..180.0, 0.0f64..500.0, angle(), positive()).prop_map(
                |(latitude, longitude, altitude, yaw, hold_time)| Command::Waypoint {
                    latitude,
                    longitude,
                    altitude,
                    yaw,
                    hold_time,
                }
            ),
            Just(Command::TakeOff),
            Just(Command::Land),
            Just(Command::ReturnToLaunch),
            (angle(), angle())
                .prop_map(|(tilt_angle, yaw)| Command::SetGimbalTilt { tilt_angle, yaw }),
            positive().prop_map(|seconds| Command::Delay { seconds }),
            (positive(), 0u32..10_000, 0u32..10_000).prop_map(
                |(interval, count, sequence_number)| Command::StartPhotoCapture {
                    interval,
                    count,
                    sequence_number,
                }
            ),
            Just(Command::StopPhotoCapture),
            Just(Command::StartVideoCapture),
            Just(Command::StopVideoCapture),
            (angle(), positive(), angle(), positive()).prop_map(|(ha, hs, va, vs)| {
                Command::CreatePanorama {
                    horizontal_angle: ha,
                    horizontal_speed: hs,
                    vertical_angle: va,
                    vertical_speed: vs,
                }
            }),
            arb_photo_mode().prop_map(|mode| Command::SetStillCaptureMode { mode }),
        ]
    }

    fn arb_waypoint(
        yaw: BoxedStrategy<Option<f64>>,
        hold: BoxedStrategy<Option<f64>>,
    ) -> impl Strategy<Value = Waypoint> {
        (-90.0f64..90.0, -180.0f64..180.0, 0.0f64..500.0, yaw, hold).prop_map(
            |(latitude, longitude, altitude, yaw, hold_time)| Waypoint {
                latitude,
                longitude,
                altitude,
                yaw,
                hold_time,
            },
        )
    }

    /// Any authored item, with arbitrary optional parameters.
    pub fn arb_mission_item() -> impl Strategy<Value = MissionItem> {
        let action = (
            arb_action_type(),
            proptest::option::of(angle()),
            proptest::option::of(positive()),
            proptest::option::of(positive()),
            proptest::option::of(positive()),
            proptest::option::of(0u32..500),
            proptest::option::of(arb_photo_mode()),
        )
            .prop_map(|(kind, angle, speed, delay, period, picture_count, capture_mode)| {
                MissionItem::Action(Action {
                    angle,
                    speed,
                    delay,
                    period,
                    picture_count,
                    capture_mode,
                    ..Action::new(kind)
                })
            });
        let waypoint = arb_waypoint(
            proptest::option::of(angle()).boxed(),
            proptest::option::of(positive()).boxed(),
        )
        .prop_map(MissionItem::Waypoint);
        prop_oneof![waypoint, action]
    }

    /// Items carrying exactly the parameters their command keeps, so that
    /// command translation returns an equal item.
    pub fn arb_roundtrip_item() -> impl Strategy<Value = MissionItem> {
        let bare = prop_oneof![
            Just(ActionType::TakeOff),
            Just(ActionType::Landing),
            Just(ActionType::ImageStopCapture),
            Just(ActionType::VideoStartCapture),
            Just(ActionType::VideoStopCapture),
        ]
        .prop_map(|kind| MissionItem::Action(Action::new(kind)));
        prop_oneof![
            arb_waypoint(angle().prop_map(Some).boxed(), positive().prop_map(Some).boxed())
                .prop_map(MissionItem::Waypoint),
            bare,
            angle().prop_map(|a| MissionItem::Action(Action {
                angle: Some(a),
                ..Action::new(ActionType::Tilt)
            })),
            positive().prop_map(|s| MissionItem::Action(Action::delay(s))),
            (positive(), 0u32..500).prop_map(|(period, count)| MissionItem::Action(Action {
                period: Some(period),
                picture_count: Some(count),
                ..Action::new(ActionType::ImageStartCapture)
            })),
            (angle(), positive()).prop_map(|(angle, speed)| MissionItem::Action(Action {
                angle: Some(angle),
                speed: Some(speed),
                ..Action::new(ActionType::Panorama)
            })),
            arb_photo_mode().prop_map(|mode| MissionItem::Action(Action {
                capture_mode: Some(mode),
                ..Action::new(ActionType::StillCapture)
            })),
        ]
    }

    pub fn arb_mission_items() -> impl Strategy<Value = Vec<MissionItem>> {
        prop::collection::vec(arb_mission_item(), 0..24)
    }

    /// Progress reports in arbitrary order, some past the end of any plan.
    pub fn arb_reports() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(0usize..32, 0..40)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

/// Take-off, `waypoints` waypoints with a photo capture after the first, then landing.
pub fn survey_items(waypoints: usize) -> Vec<MissionItem> {
    let mut items: Vec<MissionItem> = vec![Action::new(ActionType::TakeOff).into()];
    for i in 0..waypoints {
        items.push(Waypoint::new(48.0 + i as f64 * 0.001, 2.0, 40.0).into());
        if i == 0 {
            items.push(
                Action {
                    period: Some(2.0),
                    picture_count: Some(0),
                    ..Action::new(ActionType::ImageStartCapture)
                }
                .into(),
            );
        }
    }
    items.push(Action::new(ActionType::Landing).into());
    items
}

pub fn flight_plan_saved_event(id: &str, project_id: &str) -> Event {
    Event::FlightPlanSaved {
        flight_plan: Box::new(FlightPlan::builder().id(id).project_id(project_id).build()),
    }
}

pub fn flight_plan_deleted_event(id: &str) -> Event {
    Event::FlightPlanDeleted { id: FlightPlanId::from_string(id) }
}
