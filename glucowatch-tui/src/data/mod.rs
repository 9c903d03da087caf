//! Data models and processing for glucose snapshots.
//!
//! This module turns raw series snapshots into annotated, zone-classified
//! data ready for display.
//!
//! ## Submodules
//!
//! - [`history`]: Refresh-to-refresh tracking for the trend arrow and the
//!   session sparkline
//! - [`readings`]: Core processing ([`ReadingsData`], [`DisplayReading`],
//!   [`Stats`])
//! - [`timefmt`]: Vendor timestamp parsing/formatting for display
//!
//! ## Data Flow
//!
//! ```text
//! SeriesSnapshot (raw JSON / API)
//!        │
//!        ▼
//! ReadingsData::from_snapshot()
//!        │
//!        ├──▶ extrema annotation + zone classification per reading
//!        │
//!        └──▶ History::record() (trend arrow, sparkline)
//! ```

pub mod history;
pub mod readings;
pub mod timefmt;

pub use history::{trend_symbol, History};
pub use readings::{DisplayReading, ReadingsData, Stats};
