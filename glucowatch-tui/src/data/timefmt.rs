//! Timestamp parsing and formatting for display.
//!
//! The vendor reports timestamps like `1/15/2025 9:05:00 AM`; captured files
//! may carry ISO 8601 instead. Display never fails: an unparseable timestamp
//! is shown as-is.

use chrono::NaiveDateTime;

/// The sharing API's timestamp format.
const VENDOR_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// ISO 8601 without offset, for captured/synthetic snapshot files.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a source timestamp.
pub fn parse(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, VENDOR_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, ISO_FORMAT))
        .ok()
}

/// Short clock time for axis labels and table rows (`09:05`).
pub fn short_time(timestamp: &str) -> String {
    match parse(timestamp) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Full date and time for detail display (`2025-01-15 09:05:00`).
pub fn full_time(timestamp: &str) -> String {
    match parse(timestamp) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vendor_format() {
        let dt = parse("1/15/2025 9:05:00 AM").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-01-15 09:05:00");

        let pm = parse("1/15/2025 9:05:00 PM").unwrap();
        assert_eq!(pm.format("%H:%M").to_string(), "21:05");
    }

    #[test]
    fn test_parse_iso_format() {
        assert!(parse("2025-01-15T09:05:00").is_some());
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("1/15/2025 9:05:00 AM"), "09:05");
    }

    #[test]
    fn test_unparseable_passthrough() {
        assert!(parse("whenever").is_none());
        assert_eq!(short_time("whenever"), "whenever");
        assert_eq!(full_time("whenever"), "whenever");
    }
}
