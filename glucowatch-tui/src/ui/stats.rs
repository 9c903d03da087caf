//! Stats view rendering.
//!
//! Displays summary statistics for the current series: range, mean, extrema
//! counts, time in range per zone, and the session trend sparkline.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use glucowatch_types::GlucoseZone;

use crate::app::App;
use crate::data::trend_symbol;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of the time-in-range bars, in cells.
const BAR_WIDTH: usize = 30;

/// Render the Stats view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let stats = &data.stats;
    let mut lines: Vec<Line> = Vec::new();

    // Current reading with trend
    if let Some(current) = data.current() {
        let zone_style = app.theme.zone_style(current.zone);
        let mut spans = vec![
            Span::raw("  Current       "),
            Span::styled(format!("{:.0} mg/dL", current.reading.value), zone_style),
            Span::raw("  "),
            Span::styled(current.zone.label(), zone_style),
        ];
        if let Some(rate) = app.history.rate_per_min() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(trend_symbol(rate), zone_style));
            spans.push(Span::styled(
                format!(" {:+.1} mg/dL/min", rate),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!(
        "  Range         {} – {} mg/dL",
        stats.min.map_or("-".to_string(), |v| format!("{:.0}", v)),
        stats.max.map_or("-".to_string(), |v| format!("{:.0}", v)),
    )));
    lines.push(Line::from(format!(
        "  Mean          {}",
        stats.mean.map_or("-".to_string(), |v| format!("{:.1} mg/dL", v)),
    )));
    lines.push(Line::from(vec![
        Span::raw("  Extrema       "),
        Span::styled(
            format!("{} peaks", stats.peaks),
            Style::default().fg(app.theme.very_high),
        ),
        Span::raw(", "),
        Span::styled(
            format!("{} troughs", stats.troughs),
            Style::default().fg(app.theme.low),
        ),
        Span::raw(format!(" in {} readings", stats.count)),
    ]));

    // Time in range
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Time in range",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (zone, pct) in GlucoseZone::ALL.into_iter().zip(stats.zone_percentages) {
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "█".repeat(filled);
        let rest: String = "░".repeat(BAR_WIDTH - filled);

        lines.push(Line::from(vec![
            Span::raw(format!("  {:<10}", zone.label())),
            Span::styled(bar, Style::default().fg(app.theme.zone_color(zone))),
            Span::styled(rest, Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!(" {:>5.1}%", pct)),
        ]));
    }

    // Session trend across refreshes
    let levels = app.history.sparkline_levels();
    if !levels.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  Session trend "),
            Span::styled(
                render_sparkline(&levels),
                Style::default().fg(app.theme.highlight),
            ),
            Span::styled(
                format!(" (last {} refreshes)", levels.len()),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(paragraph, area);
}

fn render_sparkline(levels: &[u8]) -> String {
    // Take the most recent values that fit a modest width
    levels
        .iter()
        .rev()
        .take(32)
        .rev()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}
