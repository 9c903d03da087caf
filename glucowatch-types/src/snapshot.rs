//! Snapshot - a point-in-time view of a glucose series.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Reading;

/// One raw timestamped sample, before annotation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// When the sample was taken, as reported by the source.
    pub timestamp: String,
    /// Glucose concentration in mg/dL.
    pub value: f64,
}

impl Sample {
    /// Create a sample.
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// A point-in-time snapshot of a glucose series.
///
/// This is the common format between data sources (vendor API adapters,
/// captured files, in-process channels) and the viewer. It mirrors how
/// monitoring APIs report state: a historical graph plus one more recent
/// "current measurement" that is not yet part of the graph.
///
/// # Example
///
/// ```rust
/// use glucowatch_types::{Sample, SeriesSnapshot};
///
/// let snapshot = SeriesSnapshot::from_parts(
///     vec![Sample::new("8:55 AM", 130.0)],
///     Some(Sample::new("9:00 AM", 134.0)),
/// );
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSnapshot {
    /// Historical samples in chronological order.
    pub history: Vec<Sample>,

    /// The latest measurement, taken after the last historical sample.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub current: Option<Sample>,
}

impl SeriesSnapshot {
    /// Create a snapshot from a historical series and an optional current
    /// measurement.
    pub fn from_parts(history: Vec<Sample>, current: Option<Sample>) -> Self {
        Self { history, current }
    }

    /// Check if the snapshot holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.current.is_none()
    }

    /// Number of samples, counting the current measurement.
    pub fn len(&self) -> usize {
        self.history.len() + usize::from(self.current.is_some())
    }

    /// Build the ordered series this snapshot represents.
    ///
    /// Historical samples come first in their stored order; the current
    /// measurement, when present, is appended last. All readings start
    /// unflagged - annotation is a separate pass.
    pub fn into_series(self) -> Vec<Reading> {
        let mut readings: Vec<Reading> = self
            .history
            .into_iter()
            .map(|s| Reading::new(s.timestamp, s.value))
            .collect();

        if let Some(current) = self.current {
            readings.push(Reading::new(current.timestamp, current.value));
        }

        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_into_series_appends_current_last() {
        let snapshot = SeriesSnapshot::from_parts(
            vec![
                Sample::new("8:50 AM", 120.0),
                Sample::new("8:55 AM", 125.0),
            ],
            Some(Sample::new("9:00 AM", 131.0)),
        );

        let series = snapshot.into_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].timestamp, "9:00 AM");
        assert_eq!(series[2].value, 131.0);
        assert!(series.iter().all(|r| !r.is_flagged() && r.label.is_none()));
    }

    #[test]
    fn test_into_series_without_current() {
        let snapshot =
            SeriesSnapshot::from_parts(vec![Sample::new("8:50 AM", 120.0)], None);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.into_series().len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = SeriesSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.into_series().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "history": [
                { "timestamp": "1/15/2025 8:50:00 AM", "value": 130.0 },
                { "timestamp": "1/15/2025 8:55:00 AM", "value": 138.0 }
            ],
            "current": { "timestamp": "1/15/2025 9:00:00 AM", "value": 142.0 }
        }"#;

        let snapshot: SeriesSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(
            snapshot.current,
            Some(Sample::new("1/15/2025 9:00:00 AM", 142.0))
        );
    }
}
