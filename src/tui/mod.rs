//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home with feature overview and contacts
//! - Emergency panel with SOS, contacts and map
//! - Health-data intake form
//! - Dashboard with vitals and BMI trend
//! - Medical records register

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::Theme;
