//! Shared UI theme constants.

use ratatui::style::Color;

// Scrollbar colors
pub const SB_ARROW: Color = Color::Rgb(170, 170, 180);
pub const SB_TRACK: Color = Color::Rgb(170, 170, 180);
pub const SB_THUMB: Color = Color::Rgb(170, 170, 180);

// Network chart colors, download/upload
pub const NET_DOWN: Color = Color::Rgb(242, 135, 121);
pub const NET_UP: Color = Color::Rgb(108, 205, 255);

pub const ERROR_BG: Color = Color::Rgb(248, 113, 113);
pub const ERROR_FG: Color = Color::Rgb(69, 10, 10);
