// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

use glucowatch_types::ZoneThresholds;

mod app;
mod data;
mod events;
mod source;
mod ui;

use app::{App, View};
use data::ReadingsData;
use source::{DataSource, FileSource};

#[derive(Parser, Debug)]
#[command(name = "glucowatch")]
#[command(about = "Terminal viewer for glucose readings with peak/trough annotation")]
struct Args {
    /// Path to a readings snapshot JSON file
    #[cfg_attr(
        feature = "live",
        arg(short, long, default_value = "glucose.json", conflicts_with = "config")
    )]
    #[cfg_attr(not(feature = "live"), arg(short, long, default_value = "glucose.json"))]
    file: PathBuf,

    /// Poll the LibreLinkUp API using settings from a config file
    /// (api credentials, patient id, poll interval).
    #[cfg(feature = "live")]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (only used with --file)
    #[arg(short, long, default_value = "60")]
    refresh: u64,

    /// Readings below this are flagged low (mg/dL)
    #[arg(long, default_value = "70")]
    low: f64,

    /// Readings above this are flagged high (mg/dL)
    #[arg(long, default_value = "180")]
    high: f64,

    /// Readings above this are flagged very high (mg/dL)
    #[arg(long, default_value = "250")]
    very_high: f64,

    /// Export the annotated series to a JSON file and exit
    #[cfg_attr(feature = "live", arg(short, long, conflicts_with = "config"))]
    #[cfg_attr(not(feature = "live"), arg(short, long))]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    anyhow::ensure!(
        args.low < args.high && args.high < args.very_high,
        "thresholds must be ordered: low < high < very-high"
    );

    let thresholds = ZoneThresholds {
        low: args.low,
        high: args.high,
        very_high: args.very_high,
    };

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, &thresholds);
    }

    // Handle live mode (LibreLinkUp polling)
    #[cfg(feature = "live")]
    if let Some(ref config_path) = args.config {
        return run_with_live(config_path, thresholds);
    }

    // Default: file-based mode
    run_with_file(&args.file, thresholds, Duration::from_secs(args.refresh))
}

/// Run with a file-based data source
fn run_with_file(path: &PathBuf, thresholds: ZoneThresholds, refresh: Duration) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, thresholds, refresh)
}

/// Run with a live LibreLinkUp polling source
#[cfg(feature = "live")]
fn run_with_live(config_path: &std::path::Path, thresholds: ZoneThresholds) -> Result<()> {
    use source::{LiveSettings, LiveSource};

    // The TUI owns stdout, so logs go to a file
    let log_file = std::fs::File::create("glucowatch.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let settings = LiveSettings::load(config_path)?;

    // Build a tokio runtime; the fetch task runs on it while the TUI owns
    // the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async { LiveSource::from_settings(&settings) });

    // Poll the channel frequently; the background task sets the real pace
    run_tui(Box::new(source), thresholds, Duration::from_millis(100))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: ZoneThresholds,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, thresholds);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with current reading
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Chart => ui::chart::render(frame, app, chunks[2]),
                View::Readings => ui::readings::render(frame, app, chunks[2]),
                View::Stats => ui::stats::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::readings::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export an annotated series to a JSON file (non-interactive mode)
fn export_to_file(
    snapshot_path: &std::path::Path,
    export_path: &std::path::Path,
    thresholds: &ZoneThresholds,
) -> Result<()> {
    use std::io::Write;

    let data = ReadingsData::load(snapshot_path, thresholds)?;

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
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported annotated series to: {}", export_path.display());
    Ok(())
}
