//! Glycemic zone classification.
//!
//! Zones determine how a reading is colored and summarized: below range,
//! in range, high, or very high. Thresholds are injected configuration,
//! not ambient constants.

/// Thresholds for glycemic zone classification, in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneThresholds {
    /// Values strictly below this are low.
    pub low: f64,
    /// Values above `low` and up to this (inclusive) are in range.
    pub high: f64,
    /// Values above `high` and up to this (inclusive) are high; anything
    /// beyond is very high.
    pub very_high: f64,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            low: 70.0,
            high: 180.0,
            very_high: 250.0,
        }
    }
}

impl ZoneThresholds {
    /// Classify a reading value into its glycemic zone.
    pub fn classify(&self, value: f64) -> GlucoseZone {
        if value < self.low {
            GlucoseZone::Low
        } else if value <= self.high {
            GlucoseZone::Normal
        } else if value <= self.very_high {
            GlucoseZone::High
        } else {
            GlucoseZone::VeryHigh
        }
    }
}

/// Glycemic zone of a single reading.
///
/// Ordered by severity of the *excursion above range*, so `max()` over a
/// series picks the worst hyperglycemic zone; `Low` sorts first and is
/// handled separately where it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlucoseZone {
    Low,
    Normal,
    High,
    VeryHigh,
}

impl GlucoseZone {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            GlucoseZone::Low => "LOW",
            GlucoseZone::Normal => "OK",
            GlucoseZone::High => "HIGH",
            GlucoseZone::VeryHigh => "VHIGH",
        }
    }

    /// Returns the full display label.
    pub fn label(&self) -> &'static str {
        match self {
            GlucoseZone::Low => "Low",
            GlucoseZone::Normal => "In range",
            GlucoseZone::High => "High",
            GlucoseZone::VeryHigh => "Very high",
        }
    }

    /// All zones, in ascending value order.
    pub const ALL: [GlucoseZone; 4] = [
        GlucoseZone::Low,
        GlucoseZone::Normal,
        GlucoseZone::High,
        GlucoseZone::VeryHigh,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let thresholds = ZoneThresholds::default();

        assert_eq!(thresholds.classify(69.9), GlucoseZone::Low);
        assert_eq!(thresholds.classify(70.0), GlucoseZone::Normal);
        assert_eq!(thresholds.classify(180.0), GlucoseZone::Normal);
        assert_eq!(thresholds.classify(180.1), GlucoseZone::High);
        assert_eq!(thresholds.classify(250.0), GlucoseZone::High);
        assert_eq!(thresholds.classify(250.1), GlucoseZone::VeryHigh);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ZoneThresholds {
            low: 80.0,
            high: 160.0,
            very_high: 240.0,
        };
        assert_eq!(thresholds.classify(75.0), GlucoseZone::Low);
        assert_eq!(thresholds.classify(160.0), GlucoseZone::Normal);
        assert_eq!(thresholds.classify(200.0), GlucoseZone::High);
        assert_eq!(thresholds.classify(300.0), GlucoseZone::VeryHigh);
    }

    #[test]
    fn test_zone_ordering() {
        assert!(GlucoseZone::VeryHigh > GlucoseZone::High);
        assert!(GlucoseZone::High > GlucoseZone::Normal);
        assert!(GlucoseZone::Normal > GlucoseZone::Low);
    }
}
