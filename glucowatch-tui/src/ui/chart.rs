//! Chart view rendering.
//!
//! Draws the series as a line with scatter markers on flagged readings and
//! zone-colored threshold ticks on the y axis.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::timefmt;

/// Y-axis headroom above the default display ceiling, in mg/dL.
const Y_CEILING: f64 = 320.0;

/// Render the Chart view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        let paragraph = Paragraph::new("Waiting for readings...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL).title(" Glucose (mg/dL) "));
        frame.render_widget(paragraph, area);
        return;
    };

    if data.readings.is_empty() {
        let paragraph = Paragraph::new("No readings in the current snapshot")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL).title(" Glucose (mg/dL) "));
        frame.render_widget(paragraph, area);
        return;
    }

    let readings = &data.readings;

    let series: Vec<(f64, f64)> = readings
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.reading.value))
        .collect();

    let peaks: Vec<(f64, f64)> = readings
        .iter()
        .enumerate()
        .filter(|(_, r)| r.reading.is_max)
        .map(|(i, r)| (i as f64, r.reading.value))
        .collect();

    let troughs: Vec<(f64, f64)> = readings
        .iter()
        .enumerate()
        .filter(|(_, r)| r.reading.is_min)
        .map(|(i, r)| (i as f64, r.reading.value))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("glucose")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.series))
            .data(&series),
        Dataset::default()
            .name("peaks ▲")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(app.theme.very_high).add_modifier(Modifier::BOLD))
            .data(&peaks),
        Dataset::default()
            .name("troughs ▼")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(app.theme.low).add_modifier(Modifier::BOLD))
            .data(&troughs),
    ];

    // X axis: positions, labeled with first/middle/last clock times
    let x_max = (readings.len() - 1).max(1) as f64;
    let mid = readings.len() / 2;
    let x_labels = vec![
        Span::raw(timefmt::short_time(&readings[0].reading.timestamp)),
        Span::raw(timefmt::short_time(&readings[mid].reading.timestamp)),
        Span::raw(timefmt::short_time(
            &readings[readings.len() - 1].reading.timestamp,
        )),
    ];

    // Y axis: ticks at the zone thresholds, colored like the zones they open
    let y_max = Y_CEILING.max(data.stats.max.unwrap_or(0.0) + 20.0);
    let thresholds = &app.thresholds;
    let y_labels = vec![
        Span::raw("0"),
        Span::styled(
            format!("{:.0}", thresholds.low),
            Style::default().fg(app.theme.normal),
        ),
        Span::styled(
            format!("{:.0}", thresholds.high),
            Style::default().fg(app.theme.high),
        ),
        Span::styled(
            format!("{:.0}", thresholds.very_high),
            Style::default().fg(app.theme.very_high),
        ),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let title = format!(
        " Glucose (mg/dL) — {} peaks, {} troughs ",
        data.stats.peaks, data.stats.troughs
    );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
