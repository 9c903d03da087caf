//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::trend_symbol;

/// Render the header bar with the current reading and series overview.
///
/// Displays: zone indicator, current value, trend arrow, extrema counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(
                " GLUCOWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = Vec::new();

    if let Some(current) = data.current() {
        let zone_style = app.theme.zone_style(current.zone);
        spans.push(Span::styled(" ● ", zone_style));
        spans.push(Span::styled(
            "GLUCOWATCH ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            format!("{:.0} mg/dL", current.reading.value),
            zone_style,
        ));

        if let Some(rate) = app.history.rate_per_min() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(trend_symbol(rate), zone_style));
        }

        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("({})", current.zone.label()),
            Style::default().add_modifier(Modifier::DIM),
        ));
    } else {
        spans.push(Span::styled(
            " GLUCOWATCH ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("│ no readings"));
    }

    let stats = &data.stats;
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{}▲", stats.peaks),
        Style::default().fg(app.theme.very_high),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("{}▼", stats.troughs),
        Style::default().fg(app.theme.low),
    ));
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{}", stats.count),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" readings"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Chart "),
        Line::from(" 2:Readings "),
        Line::from(" 3:Stats "),
    ];

    let selected = match app.current_view {
        View::Chart => 0,
        View::Readings => 1,
        View::Stats => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since the last update, available controls.
/// When the source is failing, the last annotated series stays on screen and
/// this bar carries the staleness warning.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match (&app.data, &app.load_error) {
        (Some(data), Some(err)) => {
            // Stale: keep showing the last series, say why it stopped updating
            format!(
                " ⚠ data unavailable: {} | showing last readings ({:.0}s old) | r:retry q:quit",
                err,
                data.last_updated.elapsed().as_secs_f64(),
            )
        }
        (Some(data), None) => {
            let controls = match app.current_view {
                View::Chart => "Tab:switch ?:help q:quit",
                View::Readings => "↑↓:select Enter:detail m:flagged Tab:switch ?:help q:quit",
                View::Stats => "Tab:switch e:export ?:help q:quit",
            };
            format!(
                " {} | Updated {:.1}s ago | {}",
                app.source_description(),
                data.last_updated.elapsed().as_secs_f64(),
                controls,
            )
        }
        (None, Some(err)) => format!(" Error: {} | q:quit r:retry", err),
        (None, None) => " Loading... | q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate readings"),
        Line::from("  PgUp/PgDn   Jump 10 readings"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Reading detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Readings",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  m         Show flagged readings only"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload data"),
        Line::from("  e         Export annotated series"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
