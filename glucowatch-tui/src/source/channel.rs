//! Channel-based data source.
//!
//! Receives series snapshots via a tokio watch channel. This is useful for
//! embedding the viewer behind another producer (a simulator, a different
//! vendor fetcher) where snapshots are pushed rather than polled.

use tokio::sync::watch;

use glucowatch_types::SeriesSnapshot;

use super::DataSource;

/// A data source that receives series snapshots via a channel.
///
/// The producer sends snapshots through the channel and this source provides
/// them to the TUI. Only the latest snapshot matters, so a watch channel is
/// the right fit: an unread snapshot is simply replaced.
///
/// # Example
///
/// ```
/// use glucowatch_tui::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("simulator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<SeriesSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    ///   (e.g., "simulator", "nightscout://example")
    pub fn new(receiver: watch::Receiver<SeriesSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// snapshots and the source can be handed to the viewer.
    pub fn create(source_description: &str) -> (watch::Sender<SeriesSnapshot>, Self) {
        let (tx, rx) = watch::channel(SeriesSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<SeriesSnapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            let snapshot = self.receiver.borrow_and_update().clone();
            Some(snapshot)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // Channel sources don't have poll errors; a dropped sender simply
        // stops producing updates.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucowatch_types::Sample;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert!(snapshot.unwrap().is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        // Send a new snapshot
        let new_snapshot = SeriesSnapshot::from_parts(
            vec![Sample::new("9:00 AM", 120.0)],
            Some(Sample::new("9:05 AM", 127.0)),
        );
        tx.send(new_snapshot).unwrap();

        // Now poll returns the new snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert_eq!(snapshot.unwrap().len(), 2);
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("simulator");
        assert_eq!(source.description(), "channel: simulator");
    }
}
