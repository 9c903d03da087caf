//! Application state and navigation logic.

use anyhow::Result;

use glucowatch_types::ZoneThresholds;

use crate::data::{DisplayReading, History, ReadingsData};
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Reading detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The series as a chart with peak/trough markers.
    Chart,
    /// All readings in a scrollable table.
    Readings,
    /// Summary statistics and time in range.
    Stats,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Chart => View::Readings,
            View::Readings => View::Stats,
            View::Stats => View::Chart,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Chart => View::Stats,
            View::Readings => View::Chart,
            View::Stats => View::Readings,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Chart => "Chart",
            View::Readings => "Readings",
            View::Stats => "Stats",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<ReadingsData>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: ZoneThresholds,

    // Navigation state (Readings view)
    pub selected_index: usize,
    pub flagged_only: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App with the given data source and zone thresholds.
    pub fn new(source: Box<dyn DataSource>, thresholds: ZoneThresholds) -> Self {
        Self {
            running: true,
            current_view: View::Chart,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            selected_index: 0,
            flagged_only: false,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if a new snapshot was processed, Ok(false) otherwise.
    /// On any failure the previous annotated series is retained so the UI can
    /// keep showing it with a staleness indicator.
    pub fn reload_data(&mut self) -> Result<bool> {
        // Poll first, then pick up whatever error state the poll left behind,
        // so a failing source keeps being retried on every tick
        let snapshot = self.source.poll();

        if let Some(err) = self.source.error() {
            self.load_error = Some(err);
        }

        let Some(snapshot) = snapshot else {
            return Ok(false);
        };

        match ReadingsData::from_snapshot(snapshot, &self.thresholds) {
            Ok(data) => {
                // Record history before updating
                self.history.record(&data);
                self.data = Some(data);
                self.load_error = None;
                self.clamp_selection();
                Ok(true)
            }
            Err(e) => {
                // Malformed snapshot: keep the last good series on screen
                self.load_error = Some(e.to_string());
                Ok(false)
            }
        }
    }

    /// Switch to the next view (cycles through Chart → Readings → Stats).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// The readings currently visible in the Readings view, as
    /// (raw index, reading) pairs after the flagged-only filter.
    pub fn visible_readings<'a>(
        &self,
        data: &'a ReadingsData,
    ) -> Vec<(usize, &'a DisplayReading)> {
        data.readings
            .iter()
            .enumerate()
            .filter(|(_, r)| !self.flagged_only || r.reading.is_flagged())
            .collect()
    }

    fn visible_count(&self) -> usize {
        self.data.as_ref().map_or(0, |data| self.visible_readings(data).len())
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_count().saturating_sub(1);
    }

    /// The currently selected reading, if any.
    pub fn selected_reading(&self) -> Option<&DisplayReading> {
        let data = self.data.as_ref()?;
        let visible = self.visible_readings(data);
        visible.get(self.selected_index).map(|(_, r)| *r)
    }

    /// Toggle the flagged-only filter in the Readings view.
    pub fn toggle_flagged_only(&mut self) {
        self.flagged_only = !self.flagged_only;
        self.selected_index = 0;
        self.clamp_selection();
    }

    /// Open the detail overlay for the currently selected reading.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Readings && self.selected_reading().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the chart.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Chart {
            self.current_view = View::Chart;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current annotated series to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let mut export = serde_json::Map::new();

        // Summary
        let stats = &data.stats;
        let mut summary = serde_json::Map::new();
        summary.insert("readings".to_string(), serde_json::json!(stats.count));
        summary.insert("peaks".to_string(), serde_json::json!(stats.peaks));
        summary.insert("troughs".to_string(), serde_json::json!(stats.troughs));
        summary.insert("min".to_string(), serde_json::json!(stats.min));
        summary.insert("max".to_string(), serde_json::json!(stats.max));
        summary.insert("mean".to_string(), serde_json::json!(stats.mean));

        export.insert("summary".to_string(), serde_json::Value::Object(summary));

        // Annotated readings
        let readings: Vec<serde_json::Value> = data
            .readings
            .iter()
            .map(|r| {
                serde_json::json!({
                    "timestamp": r.reading.timestamp,
                    "value": r.reading.value,
                    "is_max": r.reading.is_max,
                    "is_min": r.reading.is_min,
                    "label": r.reading.label,
                    "zone": r.zone.symbol(),
                })
            })
            .collect();
        export.insert("readings".to_string(), serde_json::Value::Array(readings));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucowatch_types::{Sample, SeriesSnapshot};

    use crate::source::ChannelSource;

    fn snapshot(values: &[f64]) -> SeriesSnapshot {
        let history = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(format!("t{}", i), v))
            .collect();
        SeriesSnapshot::from_parts(history, None)
    }

    #[test]
    fn test_reload_from_channel() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), ZoneThresholds::default());

        // First poll delivers the initial empty snapshot
        assert!(app.reload_data().unwrap());
        assert_eq!(app.data.as_ref().unwrap().readings.len(), 0);

        tx.send(snapshot(&[100.0, 150.0, 100.0])).unwrap();
        assert!(app.reload_data().unwrap());
        assert_eq!(app.data.as_ref().unwrap().readings.len(), 3);

        // Nothing new
        assert!(!app.reload_data().unwrap());
    }

    #[test]
    fn test_bad_snapshot_keeps_last_data() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), ZoneThresholds::default());

        let _ = app.reload_data();
        tx.send(snapshot(&[100.0, 150.0, 100.0])).unwrap();
        assert!(app.reload_data().unwrap());

        // A snapshot with a NaN is rejected, but the previous series stays
        tx.send(snapshot(&[100.0, f64::NAN])).unwrap();
        assert!(!app.reload_data().unwrap());
        assert!(app.load_error.is_some());
        assert_eq!(app.data.as_ref().unwrap().readings.len(), 3);
    }

    #[test]
    fn test_flagged_only_filter() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), ZoneThresholds::default());

        let _ = app.reload_data();
        tx.send(snapshot(&[100.0, 150.0, 100.0])).unwrap();
        let _ = app.reload_data();

        let data = app.data.clone().unwrap();
        assert_eq!(app.visible_readings(&data).len(), 3);

        app.toggle_flagged_only();
        // Peak at index 1, troughs at the endpoints: all flagged but nothing
        // in between for this tiny series
        let flagged = app.visible_readings(&data);
        assert!(flagged.iter().all(|(_, r)| r.reading.is_flagged()));
    }
}
