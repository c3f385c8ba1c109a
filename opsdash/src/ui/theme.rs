//! Shared UI theme constants.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Cyan;
pub const MEM: Color = Color::Magenta;
pub const READ: Color = Color::Green;
pub const WRITE: Color = Color::Blue;
pub const DIM: Color = Color::Rgb(140, 140, 150);
pub const GRID: Color = Color::Rgb(60, 60, 70);
pub const FILL: Color = Color::Rgb(40, 60, 80);
pub const OK: Color = Color::Green;
pub const BAD: Color = Color::Red;
