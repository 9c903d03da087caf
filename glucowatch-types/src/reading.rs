//! A single annotated glucose reading.

use alloc::string::String;

/// One timestamped sensor reading, with annotation flags.
///
/// The timestamp is carried as an opaque string: it must parse to a datetime
/// for display purposes, but the annotation math never reads it - a series is
/// ordered by position, and position alone drives detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// When the sample was taken, as reported by the source.
    pub timestamp: String,

    /// Glucose concentration in mg/dL.
    pub value: f64,

    /// Whether this reading is a local maximum of its series.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_max: bool,

    /// Whether this reading is a local minimum of its series.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_min: bool,

    /// Equal to `value` when the reading is flagged, for display layers that
    /// want a ready-made marker label. `None` otherwise.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<f64>,
}

impl Reading {
    /// Create an unannotated reading.
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
            is_max: false,
            is_min: false,
            label: None,
        }
    }

    /// Whether the reading carries either extremum flag.
    pub fn is_flagged(&self) -> bool {
        self.is_max || self.is_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reading_is_unflagged() {
        let reading = Reading::new("9:05 AM", 142.0);
        assert_eq!(reading.value, 142.0);
        assert!(!reading.is_max);
        assert!(!reading.is_min);
        assert!(reading.label.is_none());
        assert!(!reading.is_flagged());
    }
}
