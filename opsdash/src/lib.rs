//! opsdash: a terminal live-operations dashboard for the sysdash backend.
//!
//! The reusable core lives in [`poll`] (generation-token polling
//! subscriptions), [`window`] (bounded series), [`chart`] (normalized chart
//! geometry), [`api`] (typed backend client) and [`tasks`] (action
//! sequencing with a busy lock). The TUI in [`app`]/[`ui`] is presentation
//! on top.

pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod poll;
pub mod profiles;
pub mod tasks;
pub mod types;
pub mod ui;
pub mod window;
