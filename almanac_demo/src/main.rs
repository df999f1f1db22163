// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs the Almanac pipeline once and writes an SVG snapshot.
//!
//! Usage: `almanac_demo [forecast.json] [output.svg]`. Without a forecast file a synthetic
//! forecast around the current date is used. `ALMANAC_LOG` sets the log level.

mod panels;
mod svg;
mod synthetic;

use std::path::PathBuf;
use std::process::ExitCode;

use almanac_overview::{ScrollArea, ScrollState, Thumbnail, ViewportNavigator};
use almanac_series::{
    Field, Forecast, LocalClock, PrecipKind, SeriesError, TimeWindow, axis_labels,
    daily_start_index, night_spans, precip_kinds, tooltip_title,
};
use almanac_sync::{
    CoordinateMapping, CursorEvent, CursorSynchronizer, FrameFlag, IndexScale, NowMarker,
    PanelId, PanelRegistry,
};
use chrono::{DateTime, Utc};
use kurbo::{Affine, Line, Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;

use crate::panels::{PANEL_GAP, PANEL_HEIGHT, PLOT_ORIGIN, PX_PER_HOUR};

/// Visible width of the scrolling charts.
const VIEWPORT_WIDTH: f64 = 960.0;
/// Size of the overview below the charts.
const OVERVIEW_SIZE: Size = Size::new(300.0, 40.0);
/// Pixel ratio the thumbnail is rendered for.
const OVERVIEW_DPR: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode forecast: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid forecast data: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug)]
struct Args {
    forecast: Option<PathBuf>,
    output: PathBuf,
}

impl Args {
    fn from_env() -> Self {
        let mut args = std::env::args_os().skip(1).map(PathBuf::from);
        let forecast = args.next();
        let output = args
            .next()
            .unwrap_or_else(|| PathBuf::from("almanac_demo.svg"));
        Self { forecast, output }
    }
}

fn init_logger() -> Result<(), fern::InitError> {
    let level = std::env::var("ALMANAC_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = init_logger() {
        eprintln!("failed to install logger: {err}");
    }
    match run(&Args::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_forecast(args: &Args, now: DateTime<Utc>) -> Result<Forecast, DemoError> {
    let Some(path) = &args.forecast else {
        log::info!("no forecast file given, using synthetic data");
        return Ok(synthetic::forecast(now)?);
    };
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn run(args: &Args) -> Result<(), DemoError> {
    let now = Utc::now();
    let forecast = load_forecast(args, now)?;
    let clock = LocalClock::new(forecast.utc_offset_seconds);
    let window = TimeWindow::align(&forecast.hourly, clock, now);
    log::info!(
        "{} hourly records, window of {} from record {} (local today {})",
        forecast.hourly.len(),
        window.len(),
        window.start_index(),
        window.today()
    );
    if let Some(daily) = &forecast.daily {
        let upcoming = daily.skip(daily_start_index(daily.dates(), window.today()));
        log::info!("{} daily rows from today on", upcoming.len());
    }
    let wet = precip_kinds(&window)
        .iter()
        .filter(|kind| **kind != PrecipKind::None)
        .count();
    log::info!("{wet} wet hours in the window");

    let scale = panels::plot_scale(&window);
    let mut registry = PanelRegistry::new();
    panels::register_all(&mut registry, scale);

    let mut cursor =
        CursorSynchronizer::new(PanelId::Temperature, window.len()).with_panel_origin(PLOT_ORIGIN);
    let now_marker = NowMarker::locate_in(&window, clock, now, &registry, PanelId::Temperature);
    drive_cursor(&mut cursor, &mut registry, &now_marker);

    // Panels are rebuilt when their data changes; the highlight must follow.
    panels::register_all(&mut registry, scale);
    cursor.resync(&mut registry);
    if let Some(index) = cursor.active_index()
        && let Some(t) = window.time().get(index)
    {
        log::info!("cursor on {}", tooltip_title(*t));
    }

    let mut area = ScrollState::new(PLOT_ORIGIN + scale.range().1, VIEWPORT_WIDTH);
    let mut navigator = ViewportNavigator::new(OVERVIEW_SIZE.width, &area);
    drive_navigator(&mut navigator, &mut area);

    let mut thumbnail = Thumbnail::from_series(&forecast.hourly, Field::Temperature);
    thumbnail.resize(OVERVIEW_SIZE, OVERVIEW_DPR);

    let svg = render(&Snapshot {
        window: &window,
        scale: &scale,
        cursor: &cursor,
        registry: &registry,
        now_marker: &now_marker,
        navigator: &navigator,
        thumbnail: &thumbnail,
    });
    std::fs::write(&args.output, svg).map_err(|source| DemoError::Write {
        path: args.output.clone(),
        source,
    })?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

/// Replays a mouse sweep, a pointer leave and a touch drag that ends six hours after now.
fn drive_cursor(
    cursor: &mut CursorSynchronizer,
    registry: &mut PanelRegistry,
    now_marker: &NowMarker,
) {
    let mut frames = FrameFlag::default();
    for frame in 0..6_u32 {
        for step in 0..4_u32 {
            let x = PLOT_ORIGIN + f64::from(frame * 4 + step) * 1.5 * PX_PER_HOUR;
            cursor.pointer_moved(x, &mut frames);
        }
        if frames.take() {
            log_event(cursor.frame(registry));
        }
    }
    log_event(cursor.pointer_left(registry, &mut frames));

    let Some(reference) = registry.get(cursor.reference()) else {
        return;
    };
    let mapping = reference.mapping();
    let target = (now_marker.hour_index() + 6).min(mapping.len().saturating_sub(1));
    let target_x = PLOT_ORIGIN + mapping.index_to_pixel(target);
    for dx in [-3.0, -2.0, -1.0, 0.0] {
        let response = cursor.touch_moved(target_x + dx * PX_PER_HOUR, registry);
        debug_assert!(response.prevent_default);
        log_event(response.event);
    }
    cursor.touch_ended();
}

fn log_event(event: Option<CursorEvent>) {
    match event {
        Some(CursorEvent::Activated { index, crosshair_x }) => {
            log::debug!("cursor at index {index}, crosshair x {crosshair_x}");
        }
        Some(CursorEvent::Cleared) => log::debug!("cursor cleared"),
        None => {}
    }
}

/// Snaps the overview handle to the middle of the wrapper and drags it a little further.
fn drive_navigator(navigator: &mut ViewportNavigator, area: &mut ScrollState) {
    let press = navigator.press(OVERVIEW_SIZE.width / 2.0, area);
    navigator.drag_to(OVERVIEW_SIZE.width / 2.0 + 30.0, area);
    navigator.release();
    log::info!(
        "{press:?}: content scrolled to {} of {}",
        area.scroll_left(),
        area.max_scroll_left()
    );
    navigator.content_scrolled(&*area);
}

struct Snapshot<'a> {
    window: &'a TimeWindow,
    scale: &'a IndexScale,
    cursor: &'a CursorSynchronizer,
    registry: &'a PanelRegistry,
    now_marker: &'a NowMarker,
    navigator: &'a ViewportNavigator,
    thumbnail: &'a Thumbnail,
}

fn render(s: &Snapshot<'_>) -> String {
    let plot_width = s.scale.range().1;
    let charts_height = PanelId::ALL.len() as f64 * (PANEL_HEIGHT + PANEL_GAP);
    let overview_y = charts_height + 24.0;
    let view = Rect::new(
        0.0,
        0.0,
        PLOT_ORIGIN + plot_width + 16.0,
        overview_y + OVERVIEW_SIZE.height + 8.0,
    );
    let mut doc = svg::SvgDocument::new(view);
    let night = night_spans(s.window);
    let grid = css::BLACK.with_alpha(0.25);

    for id in PanelId::ALL {
        let frame = panels::panel_frame(id, plot_width);
        for span in &night {
            let x0 = frame.x0 + s.scale.index_to_pixel(span.start);
            let x1 = frame.x0 + s.scale.index_to_pixel(span.end);
            doc.rect(
                Rect::new(x0, frame.y0, x1, frame.y1),
                css::BLACK.with_alpha(0.05),
            );
        }
        doc.outline(frame, grid, 1.0);
        let (values, color) = panels::panel_series(id, s.window);
        doc.path(&panels::series_path(&values, s.scale, frame), color, 1.5);
    }

    let label_y = charts_height - PANEL_GAP + 12.0;
    for (i, label) in axis_labels(s.window).iter().enumerate() {
        if let Some(label) = label {
            let x = PLOT_ORIGIN + s.scale.index_to_pixel(i);
            doc.text(Point::new(x, label_y), 10.0, label);
        }
    }

    if let Some(line) = s.now_marker.line(0.0, charts_height - PANEL_GAP) {
        doc.line(
            Affine::translate((PLOT_ORIGIN, 0.0)) * line,
            Color::from_rgb8(0xff, 0x98, 0x00),
            2.0,
        );
    }
    if let Some(x) = s.cursor.crosshair_x(s.registry) {
        doc.line(
            Line::new((x, 0.0), (x, charts_height - PANEL_GAP)),
            css::BLACK.with_alpha(0.6),
            1.0,
        );
    }

    // The thumbnail scene is in layout units; its device transform only matters for rasters.
    doc.begin_group(Affine::translate((PLOT_ORIGIN, overview_y)));
    if let Some(scene) = s.thumbnail.scene() {
        for band in &scene.bands {
            doc.rect(*band, scene.band_fill);
        }
        doc.path(&scene.trend, scene.stroke, scene.stroke_width);
    }
    doc.outline(
        Rect::from_origin_size(Point::ORIGIN, OVERVIEW_SIZE),
        grid,
        1.0,
    );
    doc.outline(
        s.navigator.geometry().rect(OVERVIEW_SIZE.height),
        Color::from_rgb8(0x19, 0x76, 0xd2),
        2.0,
    );
    doc.end_group();

    doc.to_svg_string()
}
