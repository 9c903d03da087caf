//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use glucowatch_types::GlucoseZone;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for low (below range) readings.
    pub low: Color,
    /// Color for in-range readings.
    pub normal: Color,
    /// Color for high readings.
    pub high: Color,
    /// Color for very high readings.
    pub very_high: Color,
    /// Color for the series line itself.
    pub series: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            low: Color::Blue,
            normal: Color::Green,
            high: Color::Yellow,
            very_high: Color::Red,
            series: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            low: Color::Blue,
            normal: Color::Green,
            high: Color::Yellow,
            very_high: Color::Red,
            series: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get the color for a glycemic zone
    pub fn zone_color(&self, zone: GlucoseZone) -> Color {
        match zone {
            GlucoseZone::Low => self.low,
            GlucoseZone::Normal => self.normal,
            GlucoseZone::High => self.high,
            GlucoseZone::VeryHigh => self.very_high,
        }
    }

    /// Get the style for a glycemic zone.
    ///
    /// Both excursions that need attention fast (low and very high) are bold.
    pub fn zone_style(&self, zone: GlucoseZone) -> Style {
        let style = Style::default().fg(self.zone_color(zone));
        match zone {
            GlucoseZone::Low | GlucoseZone::VeryHigh => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}
