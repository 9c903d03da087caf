//! Readings processing and summary statistics.
//!
//! This module transforms raw series snapshots into annotated readings with
//! glycemic zones computed against configurable thresholds.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use glucowatch_types::{annotate, GlucoseZone, Reading, SeriesSnapshot, ZoneThresholds};

/// One annotated reading plus its glycemic zone.
#[derive(Debug, Clone)]
pub struct DisplayReading {
    pub reading: Reading,
    pub zone: GlucoseZone,
}

/// Summary statistics over one annotated series.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub peaks: usize,
    pub troughs: usize,
    /// Percent of readings per zone, in [`GlucoseZone::ALL`] order.
    pub zone_percentages: [f64; 4],
}

impl Stats {
    fn compute(readings: &[DisplayReading]) -> Self {
        let count = readings.len();
        if count == 0 {
            return Self::default();
        }

        let values = readings.iter().map(|r| r.reading.value);
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.sum::<f64>() / count as f64;

        let peaks = readings.iter().filter(|r| r.reading.is_max).count();
        let troughs = readings.iter().filter(|r| r.reading.is_min).count();

        let mut zone_percentages = [0.0; 4];
        for (slot, zone) in zone_percentages.iter_mut().zip(GlucoseZone::ALL) {
            let in_zone = readings.iter().filter(|r| r.zone == zone).count();
            *slot = in_zone as f64 * 100.0 / count as f64;
        }

        Self {
            count,
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
            peaks,
            troughs,
            zone_percentages,
        }
    }
}

/// Complete processed series ready for display.
#[derive(Debug, Clone)]
pub struct ReadingsData {
    pub readings: Vec<DisplayReading>,
    pub stats: Stats,
    pub last_updated: Instant,
}

impl ReadingsData {
    /// Load and process a snapshot from a JSON file.
    pub fn load(path: &Path, thresholds: &ZoneThresholds) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content, thresholds)
    }

    /// Parse and process a snapshot from a JSON string.
    pub fn parse(content: &str, thresholds: &ZoneThresholds) -> Result<Self> {
        let snapshot: SeriesSnapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot, thresholds)
    }

    /// Process a snapshot into annotated, zone-classified readings.
    ///
    /// This is the primary conversion method used by all data sources. It
    /// fails fast on malformed input (non-finite values) rather than letting
    /// NaN flow through the comparisons.
    pub fn from_snapshot(snapshot: SeriesSnapshot, thresholds: &ZoneThresholds) -> Result<Self> {
        let series = snapshot.into_series();
        let annotated = annotate(&series).context("series rejected by extrema detection")?;

        let readings: Vec<DisplayReading> = annotated
            .into_iter()
            .map(|reading| DisplayReading {
                zone: thresholds.classify(reading.value),
                reading,
            })
            .collect();

        let stats = Stats::compute(&readings);

        Ok(Self {
            readings,
            stats,
            last_updated: Instant::now(),
        })
    }

    /// The most recent reading (the appended current measurement, when the
    /// source provides one).
    pub fn current(&self) -> Option<&DisplayReading> {
        self.readings.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucowatch_types::Sample;

    fn snapshot(values: &[f64], current: Option<f64>) -> SeriesSnapshot {
        let history = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(format!("t{}", i), v))
            .collect();
        SeriesSnapshot::from_parts(history, current.map(|v| Sample::new("now", v)))
    }

    #[test]
    fn test_from_snapshot_annotates_and_classifies() {
        let data = ReadingsData::from_snapshot(
            snapshot(&[100.0, 120.0, 190.0, 260.0, 190.0, 120.0], Some(65.0)),
            &ZoneThresholds::default(),
        )
        .unwrap();

        assert_eq!(data.readings.len(), 7);

        // The spike at index 3 is the only peak
        let peak_indices: Vec<usize> = data
            .readings
            .iter()
            .enumerate()
            .filter(|(_, r)| r.reading.is_max)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(peak_indices, vec![3]);

        // Zones follow the thresholds
        assert_eq!(data.readings[0].zone, GlucoseZone::Normal);
        assert_eq!(data.readings[2].zone, GlucoseZone::High);
        assert_eq!(data.readings[3].zone, GlucoseZone::VeryHigh);
        assert_eq!(data.readings[6].zone, GlucoseZone::Low);

        // Current measurement is the last reading
        assert_eq!(data.current().unwrap().reading.value, 65.0);
    }

    #[test]
    fn test_stats() {
        let data = ReadingsData::from_snapshot(
            snapshot(&[100.0, 200.0, 100.0, 200.0], None),
            &ZoneThresholds::default(),
        )
        .unwrap();

        let stats = &data.stats;
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, Some(100.0));
        assert_eq!(stats.max, Some(200.0));
        assert_eq!(stats.mean, Some(150.0));

        // Half in range, half high; nothing low or very high
        assert_eq!(stats.zone_percentages, [0.0, 50.0, 50.0, 0.0]);
    }

    #[test]
    fn test_empty_snapshot() {
        let data =
            ReadingsData::from_snapshot(SeriesSnapshot::default(), &ZoneThresholds::default())
                .unwrap();
        assert!(data.readings.is_empty());
        assert_eq!(data.stats.count, 0);
        assert!(data.current().is_none());
    }

    #[test]
    fn test_non_finite_value_fails() {
        let result = ReadingsData::from_snapshot(
            snapshot(&[100.0, f64::NAN, 120.0], None),
            &ZoneThresholds::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(ReadingsData::parse("not json", &ZoneThresholds::default()).is_err());
    }
}
