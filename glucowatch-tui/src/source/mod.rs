//! Data source abstraction for receiving series snapshots.
//!
//! This module provides a trait-based abstraction for receiving glucose
//! snapshots from various backends (files, the live vendor API, in-process
//! channels).

mod channel;
mod file;

#[cfg(feature = "live")]
mod live;

pub use channel::ChannelSource;
pub use file::FileSource;

#[cfg(feature = "live")]
pub use live::{ApiSettings, LiveSettings, LiveSource, PollSettings};

use std::fmt::Debug;

use glucowatch_types::SeriesSnapshot;

/// Trait for receiving series snapshots from various sources.
///
/// Implementations provide snapshots from different backends - file polling,
/// live API polling, or in-memory channels. Each poll tick is independent;
/// sources never block the caller.
///
/// # Example
///
/// ```
/// use glucowatch_tui::{DataSource, FileSource};
///
/// let mut source = FileSource::new("glucose.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} samples", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method must be non-blocking.
    fn poll(&mut self) -> Option<SeriesSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    /// Owned so that sources backed by a background task can report out of
    /// their shared error slot.
    fn error(&self) -> Option<String>;
}
