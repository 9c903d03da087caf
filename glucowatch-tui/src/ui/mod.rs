//! Terminal rendering using ratatui.
//!
//! Each view gets its own module; `common` holds the header bar, tab bar,
//! status bar, and help overlay shared by all of them.

pub mod chart;
pub mod common;
pub mod readings;
pub mod stats;
pub mod theme;

pub use theme::Theme;
