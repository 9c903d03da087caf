//! # glucowatch-types
//!
//! Core types for glucose series annotation. This crate defines the schema
//! shared by every glucowatch data source and viewer: timestamped readings,
//! series snapshots, local-extrema annotation, and glycemic zone
//! classification.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any
//!   serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Source agnostic**: Works with any vendor API, captured file, or
//!   in-process producer that can provide timestamped values
//! - **Deterministic annotation**: The extrema detector is a pure function of
//!   the series - same input, same flags, on every platform
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use glucowatch_types::{annotate, SeriesSnapshot, Sample};
//!
//! let snapshot = SeriesSnapshot::from_parts(
//!     vec![
//!         Sample::new("8:50 AM", 130.0),
//!         Sample::new("8:55 AM", 162.0),
//!         Sample::new("9:00 AM", 140.0),
//!     ],
//!     Some(Sample::new("9:05 AM", 135.0)),
//! );
//!
//! let readings = annotate(&snapshot.into_series()).unwrap();
//! assert_eq!(readings.len(), 4);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod extrema;
mod reading;
mod snapshot;
mod zones;

pub use extrema::*;
pub use reading::*;
pub use snapshot::*;
pub use zones::*;
