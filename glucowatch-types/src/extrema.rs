//! Local extrema detection over an ordered glucose series.
//!
//! The detector classifies each reading against a positional window of up to
//! two neighbors on each side. Runs of equal raw values are disambiguated by
//! a tiny per-position offset added before comparison, so exactly one reading
//! of a tied run is ever flagged: the latest for maxima, the earliest for
//! minima. The offset is never written back to the output - returned readings
//! carry their original values.
//!
//! Detection is a pure function of positions and values; timestamps are
//! ignored and the input is never re-sorted.

use alloc::vec::Vec;

use thiserror::Error;

use crate::Reading;

/// Per-position offset added to comparison values so that no two positions
/// compare exactly equal. Far smaller than any real gap between sensor
/// readings (whole mg/dL in practice).
pub const TIE_BREAK_STEP: f64 = 1e-4;

/// Error returned when a series contains values the detector cannot order.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ExtremaError {
    /// A reading holds NaN or an infinity; comparisons against such values
    /// are meaningless, so the whole series is rejected up front.
    #[error("non-finite value {value} at index {index}")]
    NonFinite { index: usize, value: f64 },
}

/// Annotate a series with local-maximum flags.
///
/// Returns a new series of the same length: `is_max` is set per the windowed
/// rule below, `label` becomes `Some(value)` on flagged readings and `None`
/// otherwise, and `value`/`timestamp`/`is_min` are carried through untouched.
///
/// The rule table, evaluated top to bottom with first match winning (the
/// ranges overlap, so the order is part of the contract):
///
/// | condition   | compares against      | comparator |
/// |-------------|-----------------------|------------|
/// | `n <= 1`    | next two (absent)     | `>`        |
/// | `i <= 2`    | prev 1, next 1, next 2| `>=`       |
/// | `i >= n-3`  | prev 2, prev 1, next 1| `>=`       |
/// | `i >= n-2`  | prev 2, prev 1        | `>`        |
/// | otherwise   | both sides, two deep  | `>=`       |
///
/// Out-of-range neighbors are `-∞`, which makes a singleton series always a
/// maximum. The `i >= n-2` arm is shadowed by the arm above it for every
/// series length; it stays in the table because the mix of inclusive and
/// strict comparators at the tail is part of the documented behavior.
pub fn find_local_maxima(readings: &[Reading]) -> Result<Vec<Reading>, ExtremaError> {
    let adjusted = adjusted_values(readings)?;
    let flags = maxima_flags(&adjusted);

    Ok(readings
        .iter()
        .zip(flags)
        .map(|(reading, is_max)| Reading {
            timestamp: reading.timestamp.clone(),
            value: reading.value,
            is_max,
            is_min: reading.is_min,
            label: if is_max { Some(reading.value) } else { None },
        })
        .collect())
}

/// Annotate a series with local-minimum flags.
///
/// Mirror image of [`find_local_maxima`]: same rule table and branch order,
/// comparators flipped to `<`/`<=`, out-of-range neighbors `+∞`. Minima are
/// always computed from the raw values, never from a prior pass's comparison
/// values - and because the tie-break offset grows with position in both
/// detectors, the EARLIEST of a tied run wins here where the latest wins for
/// maxima. That asymmetry is intentional and relied upon.
pub fn find_local_minima(readings: &[Reading]) -> Result<Vec<Reading>, ExtremaError> {
    let adjusted = adjusted_values(readings)?;
    let flags = minima_flags(&adjusted);

    Ok(readings
        .iter()
        .zip(flags)
        .map(|(reading, is_min)| Reading {
            timestamp: reading.timestamp.clone(),
            value: reading.value,
            is_max: reading.is_max,
            is_min,
            label: if is_min { Some(reading.value) } else { None },
        })
        .collect())
}

/// Annotate a series with both local-maximum and local-minimum flags.
///
/// Runs the maxima rule and, independently from the same raw values, the
/// minima rule; `label` is set whenever either flag is.
pub fn annotate(readings: &[Reading]) -> Result<Vec<Reading>, ExtremaError> {
    let adjusted = adjusted_values(readings)?;
    let maxima = maxima_flags(&adjusted);
    let minima = minima_flags(&adjusted);

    Ok(readings
        .iter()
        .zip(maxima.into_iter().zip(minima))
        .map(|(reading, (is_max, is_min))| Reading {
            timestamp: reading.timestamp.clone(),
            value: reading.value,
            is_max,
            is_min,
            label: if is_max || is_min {
                Some(reading.value)
            } else {
                None
            },
        })
        .collect())
}

/// Comparison values: raw value plus the per-position tie-break offset.
/// Rejects the series at the first non-finite value.
fn adjusted_values(readings: &[Reading]) -> Result<Vec<f64>, ExtremaError> {
    readings
        .iter()
        .enumerate()
        .map(|(index, reading)| {
            if reading.value.is_finite() {
                Ok(reading.value + index as f64 * TIE_BREAK_STEP)
            } else {
                Err(ExtremaError::NonFinite {
                    index,
                    value: reading.value,
                })
            }
        })
        .collect()
}

fn maxima_flags(adjusted: &[f64]) -> Vec<bool> {
    let n = adjusted.len();

    adjusted
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let p2 = if i >= 2 { adjusted[i - 2] } else { f64::NEG_INFINITY };
            let p1 = if i >= 1 { adjusted[i - 1] } else { f64::NEG_INFINITY };
            let n1 = if i + 1 < n { adjusted[i + 1] } else { f64::NEG_INFINITY };
            let n2 = if i + 2 < n { adjusted[i + 2] } else { f64::NEG_INFINITY };

            // First match wins; the arms overlap, so keep this order.
            if n <= 1 {
                value > n1 && value > n2
            } else if i <= 2 {
                value >= p1 && value >= n1 && value >= n2
            } else if i >= n - 3 {
                value >= p2 && value >= p1 && value >= n1
            } else if i >= n - 2 {
                // Shadowed by the arm above; kept for the strict tail rule.
                value > p2 && value > p1
            } else {
                value >= p2 && value >= p1 && value >= n1 && value >= n2
            }
        })
        .collect()
}

fn minima_flags(adjusted: &[f64]) -> Vec<bool> {
    let n = adjusted.len();

    adjusted
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let p2 = if i >= 2 { adjusted[i - 2] } else { f64::INFINITY };
            let p1 = if i >= 1 { adjusted[i - 1] } else { f64::INFINITY };
            let n1 = if i + 1 < n { adjusted[i + 1] } else { f64::INFINITY };
            let n2 = if i + 2 < n { adjusted[i + 2] } else { f64::INFINITY };

            // First match wins; the arms overlap, so keep this order.
            if n <= 1 {
                value < n1 && value < n2
            } else if i <= 2 {
                value <= p1 && value <= n1 && value <= n2
            } else if i >= n - 3 {
                value <= p2 && value <= p1 && value <= n1
            } else if i >= n - 2 {
                // Shadowed by the arm above; kept for the strict tail rule.
                value < p2 && value < p1
            } else {
                value <= p2 && value <= p1 && value <= n1 && value <= n2
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    fn series(values: &[f64]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Reading::new(format!("t{}", i), v))
            .collect()
    }

    fn max_flags_of(values: &[f64]) -> Vec<bool> {
        find_local_maxima(&series(values))
            .unwrap()
            .iter()
            .map(|r| r.is_max)
            .collect()
    }

    fn min_flags_of(values: &[f64]) -> Vec<bool> {
        find_local_minima(&series(values))
            .unwrap()
            .iter()
            .map(|r| r.is_min)
            .collect()
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(find_local_maxima(&[]).unwrap(), vec![]);
        assert_eq!(find_local_minima(&[]).unwrap(), vec![]);
        assert_eq!(annotate(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_singleton_flagged_max() {
        let out = find_local_maxima(&series(&[97.0])).unwrap();
        assert_eq!(
            out,
            vec![Reading {
                timestamp: "t0".to_string(),
                value: 97.0,
                is_max: true,
                is_min: false,
                label: Some(97.0),
            }]
        );
    }

    #[test]
    fn test_length_preserved() {
        for len in [0usize, 1, 2, 3, 4, 5, 8, 13] {
            let values: Vec<f64> = (0..len).map(|i| 100.0 + (i % 3) as f64).collect();
            let input = series(&values);
            assert_eq!(find_local_maxima(&input).unwrap().len(), len);
            assert_eq!(find_local_minima(&input).unwrap().len(), len);
            assert_eq!(annotate(&input).unwrap().len(), len);
        }
    }

    #[test]
    fn test_two_point_series() {
        assert_eq!(max_flags_of(&[5.0, 3.0]), vec![true, false]);
        assert_eq!(max_flags_of(&[3.0, 5.0]), vec![false, true]);
        assert_eq!(min_flags_of(&[5.0, 3.0]), vec![false, true]);
        assert_eq!(min_flags_of(&[3.0, 5.0]), vec![true, false]);
    }

    #[test]
    fn test_tied_run_maxima_flags_last() {
        // Among equal raw values, the tie-break offset makes the latest
        // position win maxima comparisons.
        assert_eq!(max_flags_of(&[100.0, 100.0, 100.0]), vec![false, false, true]);
    }

    #[test]
    fn test_tied_run_minima_flags_first() {
        // Opposite tie direction from maxima: the same offset sign means the
        // earliest of a tied run wins minima comparisons.
        assert_eq!(min_flags_of(&[100.0, 100.0, 100.0]), vec![true, false, false]);
    }

    #[test]
    fn test_peak_shape_literal() {
        let input = series(&[1.0, 2.0, 3.0, 5.0, 3.0, 2.0, 1.0]);
        let expected: Vec<Reading> = input
            .iter()
            .enumerate()
            .map(|(i, r)| Reading {
                timestamp: r.timestamp.clone(),
                value: r.value,
                is_max: i == 3,
                is_min: false,
                label: if i == 3 { Some(5.0) } else { None },
            })
            .collect();

        assert_eq!(find_local_maxima(&input).unwrap(), expected);
    }

    #[test]
    fn test_minima_mirror_flags_endpoints() {
        // Same rise-then-fall shape: the minima pass flags both endpoints.
        assert_eq!(
            min_flags_of(&[1.0, 2.0, 3.0, 5.0, 3.0, 2.0, 1.0]),
            vec![true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_annotate_merges_both_passes() {
        let out = annotate(&series(&[1.0, 2.0, 3.0, 5.0, 3.0, 2.0, 1.0])).unwrap();

        let max_flags: Vec<bool> = out.iter().map(|r| r.is_max).collect();
        let min_flags: Vec<bool> = out.iter().map(|r| r.is_min).collect();
        assert_eq!(max_flags, vec![false, false, false, true, false, false, false]);
        assert_eq!(min_flags, vec![true, false, false, false, false, false, true]);

        assert_eq!(out[0].label, Some(1.0));
        assert_eq!(out[3].label, Some(5.0));
        assert_eq!(out[6].label, Some(1.0));
        assert_eq!(out[1].label, None);
    }

    #[test]
    fn test_raw_values_preserved() {
        // The tie-break offset must never leak into returned values or labels.
        let values = [101.5, 101.5, 99.25, 140.0, 101.5];
        let out = annotate(&series(&values)).unwrap();

        for (reading, &raw) in out.iter().zip(&values) {
            assert_eq!(reading.value, raw);
            if let Some(label) = reading.label {
                assert_eq!(label, raw);
            }
        }
    }

    #[test]
    fn test_spike_with_appended_current() {
        // Ten historical readings with one unambiguous spike, plus a more
        // recent current measurement appended as the eleventh point. Only the
        // spike is a maximum; the last point falls under the tail rule and
        // stays unflagged.
        let values = [
            100.0, 105.0, 110.0, 108.0, 150.0, 112.0, 107.0, 103.0, 101.0, 99.0, 97.0,
        ];
        let flags = max_flags_of(&values);

        let expected: Vec<bool> = (0..values.len()).map(|i| i == 4).collect();
        assert_eq!(flags, expected);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut input = series(&[100.0, 110.0, 120.0]);
        input[2].value = f64::NAN;

        match find_local_maxima(&input) {
            Err(ExtremaError::NonFinite { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected NonFinite error, got {:?}", other),
        }

        let mut input = series(&[100.0, 110.0]);
        input[0].value = f64::INFINITY;
        assert!(annotate(&input).is_err());
    }

    #[test]
    fn test_passes_preserve_other_flag() {
        // A maxima pass must carry through whatever the minima flag already
        // says, and vice versa, so the passes compose in either order.
        let mut input = series(&[1.0, 5.0, 1.0]);
        input[0].is_min = true;

        let out = find_local_maxima(&input).unwrap();
        assert!(out[0].is_min);
        assert!(out[1].is_max);
    }
}
