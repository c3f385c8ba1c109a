//! UI module root: exposes drawing functions for individual panels.

pub mod chartpane;
pub mod header;
pub mod kpi;
pub mod logs;
pub mod tasks;
pub mod theme;
pub mod util;
