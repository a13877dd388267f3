// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use fp_core::FlightPlanState;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary text: darker grey
    pub const MUTED: u8 = 240;
    /// In-flight and in-transfer plans
    pub const ACTIVE: u8 = 114;
    pub const DONE: u8 = 108;
    pub const STOPPED: u8 = 173;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled().header(fg(codes::HEADER)).literal(fg(codes::LITERAL)).placeholder(fg(codes::MUTED))
}

fn paint(code: u8, text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text, should_colorize())
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text, should_colorize())
}

pub fn state(state: FlightPlanState) -> String {
    paint_state(state, should_colorize())
}

fn paint_state(state: FlightPlanState, enabled: bool) -> String {
    let code = match state {
        FlightPlanState::Flying | FlightPlanState::Uploading | FlightPlanState::Processing => {
            codes::ACTIVE
        }
        FlightPlanState::Completed | FlightPlanState::Processed => codes::DONE,
        FlightPlanState::Stopped => codes::STOPPED,
        FlightPlanState::Editable | FlightPlanState::Unknown => codes::LITERAL,
    };
    paint(code, &state.to_string(), enabled)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
