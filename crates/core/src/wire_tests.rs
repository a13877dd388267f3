// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_modelled_command;
use proptest::prelude::*;

#[test]
fn waypoint_row_layout() {
    let command = Command::Waypoint {
        latitude: 48.87,
        longitude: 2.33,
        altitude: 30.0,
        yaw: 90.0,
        hold_time: 4.0,
    };
    let row = command.to_raw(3);
    assert_eq!(
        row,
        RawCommand {
            seq: 3,
            frame: FRAME_GLOBAL_RELATIVE_ALT,
            command: 16,
            param1: 4.0,
            param2: 5.0,
            param4: 90.0,
            x: 48.87,
            y: 2.33,
            z: 30.0,
            ..RawCommand::default()
        }
    );
}

#[test]
fn delay_row_marks_unused_params() {
    let row = Command::Delay { seconds: 12.0 }.to_raw(0);
    assert_eq!(row.command, 93);
    assert_eq!((row.param1, row.param2, row.param3, row.param4), (12.0, -1.0, -1.0, -1.0));
}

#[test]
fn gimbal_row_uses_targeting_mode() {
    let row = Command::SetGimbalTilt { tilt_angle: -45.0, yaw: 0.0 }.to_raw(1);
    assert_eq!(row.command, 205);
    assert_eq!(row.param1, -45.0);
    assert_eq!(row.z, MOUNT_MODE_TARGETING);
}

#[yare::parameterized(
    take_off = { Command::TakeOff,           22 },
    land     = { Command::Land,              21 },
    rtl      = { Command::ReturnToLaunch,    20 },
    photo    = { Command::StopPhotoCapture,  2001 },
    video    = { Command::StartVideoCapture, 2500 },
    stop     = { Command::StopVideoCapture,  2501 },
)]
fn parameterless_rows(command: Command, id: u16) {
    let row = command.to_raw(0);
    assert_eq!(row, RawCommand { command: id, ..RawCommand::default() });
    assert_eq!(Command::from_raw(&row), command);
}

#[test]
fn unmodelled_id_is_kept_as_unknown() {
    let raw = RawCommand { seq: 4, command: 178, param2: 8.0, ..RawCommand::default() };
    let command = Command::from_raw(&raw);
    assert_eq!(command, Command::Unknown { raw });
    assert_eq!(command.command_id(), 178);

    // Re-encoding keeps every field except the position.
    assert_eq!(command.to_raw(9), RawCommand { seq: 9, ..raw });
}

#[test]
fn invalid_photo_mode_is_unknown() {
    let raw = RawCommand { command: 50001, param1: 7.0, ..RawCommand::default() };
    assert_eq!(Command::from_raw(&raw), Command::Unknown { raw });
}

#[yare::parameterized(
    negative = { -3.0, 0 },
    nan      = { f64::NAN, 0 },
    fraction = { 2.9, 2 },
    huge     = { 1e12, u32::MAX },
)]
fn photo_count_is_saturated(value: f64, expected: u32) {
    let raw = RawCommand { command: 2000, param3: value, ..RawCommand::default() };
    match Command::from_raw(&raw) {
        Command::StartPhotoCapture { count, .. } => assert_eq!(count, expected),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn waypoint_row_scales_into_mission_item_int() {
    let command = Command::Waypoint {
        latitude: 48.8566,
        longitude: -2.3522,
        altitude: 30.0,
        yaw: 90.0,
        hold_time: 4.0,
    };
    let item = command.to_raw(3).to_mission_item_int(1, 1).unwrap();
    assert_eq!(item.seq, 3);
    assert_eq!(item.command, MavCmd::MAV_CMD_NAV_WAYPOINT);
    assert_eq!(item.frame, MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT);
    assert_eq!((item.x, item.y), (488_566_000, -23_522_000));
    assert_eq!((item.param1, item.param2, item.z), (4.0, 5.0, 30.0));
    assert_eq!(item.autocontinue, 1);

    let back = RawCommand::from_mission_item_int(&item);
    assert_eq!(Command::from_raw(&back), command);
}

#[test]
fn mission_item_int_keeps_mission_frame_rows() {
    let row = Command::Delay { seconds: 12.0 }.to_raw(0);
    let item = row.to_mission_item_int(1, 190).unwrap();
    assert_eq!(item.frame, MavFrame::MAV_FRAME_MISSION);
    assert_eq!(item.target_component, 190);
    assert_eq!(RawCommand::from_mission_item_int(&item), row);
}

#[test]
fn vendor_rows_have_no_mission_item_int() {
    let row = Command::SetStillCaptureMode { mode: PhotoMode::FullFrame }.to_raw(0);
    assert_eq!(row.to_mission_item_int(1, 1).unwrap_err(), WireError::NotInDialect(50001));

    let bad_frame = RawCommand { command: 22, frame: 250, ..RawCommand::default() };
    assert_eq!(bad_frame.to_mission_item_int(1, 1).unwrap_err(), WireError::UnknownFrame(250));
}

#[test]
fn plan_file_text() {
    let rows = vec![Command::TakeOff.to_raw(0), Command::Delay { seconds: 2.5 }.to_raw(1)];
    let text = write_plan_file(&rows);
    assert_eq!(
        text,
        "QGC WPL 110\n\
         0\t0\t2\t22\t0\t0\t0\t0\t0\t0\t0\t1\n\
         1\t0\t2\t93\t2.5\t-1\t-1\t-1\t0\t0\t0\t1\n"
    );
    assert_eq!(parse_plan_file(&text).unwrap(), rows);
}

#[test]
fn parse_skips_blank_lines_and_accepts_spaces() {
    let text = "QGC WPL 110\n\n0 1 3 16 0 5 0 0 1.5 2.5 10 1\n";
    let rows = parse_plan_file(text).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].current);
    assert_eq!((rows[0].x, rows[0].y, rows[0].z), (1.5, 2.5, 10.0));
}

#[yare::parameterized(
    empty        = { "",                   WireError::BadHeader },
    wrong_header = { "QGC WPL 100\n",      WireError::BadHeader },
    short_row    = { "QGC WPL 110\n0\t0\t2\n", WireError::FieldCount { line: 2, found: 3 } },
    bad_number   = {
        "QGC WPL 110\n0\t0\t2\t22\t0\t0\t0\t0\t0\t0\t0\t1\n1\t0\t2\t93\tabc\t0\t0\t0\t0\t0\t0\t1\n",
        WireError::InvalidField { line: 3, field: "param1", value: "abc".to_string() }
    },
    bad_command  = {
        "QGC WPL 110\n0\t0\t2\t-4\t0\t0\t0\t0\t0\t0\t0\t1\n",
        WireError::InvalidField { line: 2, field: "command", value: "-4".to_string() }
    },
)]
fn parse_errors(text: &str, expected: WireError) {
    assert_eq!(parse_plan_file(text).unwrap_err(), expected);
}

#[test]
fn parse_error_message_names_line() {
    let err = parse_plan_file("QGC WPL 110\n0\t0\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: expected 12 fields, found 2");
}

proptest! {
    #[test]
    fn modelled_commands_survive_the_wire(command in arb_modelled_command(), seq in 0u16..500) {
        let row = command.to_raw(seq);
        prop_assert_eq!(row.seq, seq);
        prop_assert_eq!(Command::from_raw(&row), command);
    }
}
