//! Refresh history tracking for the trend arrow and session sparkline.

use std::collections::VecDeque;
use std::time::Instant;

use super::readings::ReadingsData;

/// Maximum number of refreshes to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks the current reading across refreshes.
///
/// Records the latest value of each successfully processed snapshot to
/// enable a rate-of-change trend arrow and a visual session trend in the UI.
#[derive(Debug, Clone)]
pub struct History {
    /// Current-reading values, oldest first.
    pub values: VecDeque<f64>,
    /// Timestamps of refreshes for rate calculations.
    pub timestamps: VecDeque<Instant>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            values: VecDeque::new(),
            timestamps: VecDeque::new(),
        }
    }

    /// Record a processed snapshot's current reading.
    pub fn record(&mut self, data: &ReadingsData) {
        let Some(current) = data.current() else {
            return;
        };

        self.values.push_back(current.reading.value);
        if self.values.len() > MAX_HISTORY_SIZE {
            self.values.pop_front();
        }

        self.timestamps.push_back(data.last_updated);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    /// Get sparkline data (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline_levels(&self) -> Vec<u8> {
        if self.values.len() < 2 {
            return Vec::new();
        }

        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let range = (max - min).max(1.0);

        self.values
            .iter()
            .map(|&v| {
                let normalized = ((v - min) / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// Rate of change of the current reading in mg/dL per minute.
    ///
    /// Returns None if there's not enough history to calculate a rate.
    pub fn rate_per_min(&self) -> Option<f64> {
        if self.values.len() < 2 || self.timestamps.len() < 2 {
            return None;
        }

        let current = *self.values.back()?;
        let previous = *self.values.get(self.values.len() - 2)?;

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some((current - previous) / elapsed * 60.0)
        } else {
            None
        }
    }
}

/// Trend arrow for a glucose rate of change, following the usual CGM
/// conventions (±1 and ±2 mg/dL per minute breakpoints).
pub fn trend_symbol(rate_per_min: f64) -> &'static str {
    if rate_per_min >= 2.0 {
        "↑↑"
    } else if rate_per_min >= 1.0 {
        "↑"
    } else if rate_per_min <= -2.0 {
        "↓↓"
    } else if rate_per_min <= -1.0 {
        "↓"
    } else {
        "→"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use glucowatch_types::{Sample, SeriesSnapshot, ZoneThresholds};

    fn data_with_current(value: f64) -> ReadingsData {
        let snapshot = SeriesSnapshot::from_parts(vec![], Some(Sample::new("now", value)));
        ReadingsData::from_snapshot(snapshot, &ZoneThresholds::default()).unwrap()
    }

    #[test]
    fn test_record_caps_size() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY_SIZE + 10) {
            history.record(&data_with_current(100.0 + i as f64));
        }
        assert_eq!(history.values.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.timestamps.len(), MAX_HISTORY_SIZE);
        // Oldest entries were dropped
        assert_eq!(*history.values.front().unwrap(), 110.0);
    }

    #[test]
    fn test_record_skips_empty_data() {
        let mut history = History::new();
        let empty =
            ReadingsData::from_snapshot(SeriesSnapshot::default(), &ZoneThresholds::default())
                .unwrap();
        history.record(&empty);
        assert!(history.values.is_empty());
    }

    #[test]
    fn test_sparkline_levels() {
        let mut history = History::new();
        assert!(history.sparkline_levels().is_empty());

        history.values = VecDeque::from(vec![100.0, 107.0, 114.0]);
        assert_eq!(history.sparkline_levels(), vec![0, 3, 7]);
    }

    #[test]
    fn test_rate_per_min() {
        let t0 = Instant::now();
        let mut history = History::new();
        history.values = VecDeque::from(vec![100.0, 110.0]);
        history.timestamps = VecDeque::from(vec![t0, t0 + Duration::from_secs(60)]);

        let rate = history.rate_per_min().unwrap();
        assert!((rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_needs_two_points() {
        let mut history = History::new();
        history.values = VecDeque::from(vec![100.0]);
        history.timestamps = VecDeque::from(vec![Instant::now()]);
        assert!(history.rate_per_min().is_none());
    }

    #[test]
    fn test_trend_symbol() {
        assert_eq!(trend_symbol(2.5), "↑↑");
        assert_eq!(trend_symbol(1.2), "↑");
        assert_eq!(trend_symbol(0.0), "→");
        assert_eq!(trend_symbol(-1.2), "↓");
        assert_eq!(trend_symbol(-2.5), "↓↓");
    }
}
