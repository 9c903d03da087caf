//! Readings view rendering.
//!
//! Displays every reading in a scrollable table with its clock time, value,
//! glycemic zone, and extremum mark, plus a detail overlay for the selected
//! reading.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{timefmt, DisplayReading};

/// Render the Readings view as a table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let visible = app.visible_readings(data);

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("mg/dL"),
        Cell::from("Zone"),
        Cell::from("Mark"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = visible
        .iter()
        .map(|&(_, r)| {
            let zone_style = app.theme.zone_style(r.zone);

            Row::new(vec![
                Cell::from(timefmt::short_time(&r.reading.timestamp)),
                Cell::from(format!("{:>5.0}", r.reading.value)).style(zone_style),
                Cell::from(r.zone.symbol()).style(zone_style),
                Cell::from(mark_spans(r, app)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Min(6),
        Constraint::Min(10),
    ];

    let selected_visual_index = app.selected_index.min(visible.len().saturating_sub(1));

    // Show the filter state and scroll position in the title
    let filter_info = if app.flagged_only { " [flagged only, m:all]" } else { " [m:flagged]" };
    let position_info = if !visible.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, visible.len())
    } else {
        String::new()
    };

    let title = format!(
        " Readings ({}/{}){}{} ",
        visible.len(),
        data.readings.len(),
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Extremum mark cell for one reading.
fn mark_spans(reading: &DisplayReading, app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    if reading.reading.is_max {
        spans.push(Span::styled(
            "▲ peak",
            Style::default().fg(app.theme.very_high),
        ));
    }
    if reading.reading.is_min {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("▼ trough", Style::default().fg(app.theme.low)));
    }
    Line::from(spans)
}

/// Render the detail overlay for the currently selected reading.
///
/// Displayed as a centered modal on top of the readings table.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(selected) = app.selected_reading() else {
        return;
    };

    let reading = &selected.reading;
    let zone_style = app.theme.zone_style(selected.zone);

    let label_line = match reading.label {
        Some(label) => format!("{:.0} mg/dL", label),
        None => "-".to_string(),
    };

    let text = vec![
        Line::from(vec![Span::styled("Reading", app.theme.header)]),
        Line::from(""),
        Line::from(format!("  Time     {}", timefmt::full_time(&reading.timestamp))),
        Line::from(vec![
            Span::raw("  Value    "),
            Span::styled(format!("{:.0} mg/dL", reading.value), zone_style),
        ]),
        Line::from(vec![
            Span::raw("  Zone     "),
            Span::styled(selected.zone.label(), zone_style),
        ]),
        Line::from(format!(
            "  Peak     {}",
            if reading.is_max { "yes" } else { "no" }
        )),
        Line::from(format!(
            "  Trough   {}",
            if reading.is_min { "yes" } else { "no" }
        )),
        Line::from(format!("  Label    {}", label_line)),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Esc/Enter to close, ↑↓ to step",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(text).block(block);

    let width = 44u16.min(area.width.saturating_sub(4));
    let height = 12u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);
    frame.render_widget(paragraph, overlay_area);
}
