// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # glucowatch-tui
//!
//! A terminal viewer and library for near-real-time glucose readings.
//!
//! This crate renders a glucose series in an interactive terminal UI,
//! annotated with local maxima/minima so peaks and troughs stand out at a
//! glance. Snapshots can come from various sources (the LibreLinkUp cloud,
//! captured files, in-process channels) and are refreshed on a polling
//! interval.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(annotate)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | LiveSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   implementations for file polling, live API polling, and channel-based input
//! - **[`data`]**: Processing - builds the series from a snapshot, runs the
//!   extrema annotation, classifies glycemic zones, computes summary stats,
//!   and tracks refresh history for the trend arrow
//! - **[`ui`]**: Terminal rendering using ratatui - chart, readings table,
//!   stats, and theme support
//!
//! ## Features
//!
//! - **Chart view**: The series with peak/trough markers and zone-colored axis
//! - **Readings view**: Scrollable table with per-reading zone and flags
//! - **Stats view**: Time-in-range, extrema counts, session trend
//! - **Staleness handling**: On fetch errors the last annotated series stays
//!   on screen, with the time since the last update in the status bar
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # View a captured snapshot file, re-reading it when it changes
//! glucowatch --file glucose.json
//!
//! # Poll the LibreLinkUp API with credentials from a settings file
//! glucowatch --config glucowatch.toml
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use glucowatch_tui::{App, FileSource};
//! use glucowatch_types::ZoneThresholds;
//!
//! let source = Box::new(FileSource::new("glucose.json"));
//! let app = App::new(source, ZoneThresholds::default());
//! ```
//!
//! ### As a library with a channel source (for embedding)
//!
//! ```
//! use glucowatch_tui::{App, ChannelSource};
//! use glucowatch_types::{Sample, SeriesSnapshot, ZoneThresholds};
//!
//! let (tx, source) = ChannelSource::create("simulator");
//! let app = App::new(Box::new(source), ZoneThresholds::default());
//!
//! // Elsewhere: push snapshots as they are produced
//! tx.send(SeriesSnapshot::from_parts(
//!     vec![Sample::new("9:00 AM", 120.0)],
//!     Some(Sample::new("9:05 AM", 126.0)),
//! )).unwrap();
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{trend_symbol, DisplayReading, History, ReadingsData, Stats};
pub use source::{ChannelSource, DataSource, FileSource};

#[cfg(feature = "live")]
pub use source::{LiveSettings, LiveSource};

pub use glucowatch_types::{
    annotate, find_local_maxima, find_local_minima, GlucoseZone, Reading, Sample, SeriesSnapshot,
    ZoneThresholds,
};
