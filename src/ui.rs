//! UI rendering helpers for the terminal user interface.
//!
//! The scene is painted on a braille `Canvas` spanning the whole terminal
//! except the last row, which holds the progress bar. World coordinates grow
//! downwards; the canvas grows upwards, hence the flips below.

use std::time::Duration;

use rand::Rng;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders, Clear, Gauge,
        canvas::{Canvas, Circle, Context, Line},
    },
};

use crate::app::Visualizer;
use crate::config::UiSettings;
use crate::scene::{BAR_HEIGHT, GRID_COLS, Scene, WORLD_HEIGHT, WORLD_WIDTH, Walker};

const BACKGROUND: Color = Color::Rgb(24, 24, 24);
const GRID: Color = Color::Rgb(69, 69, 69);
const BAR_FILL: Color = Color::Rgb(69, 255, 69);
const BAND: Color = Color::Rgb(245, 169, 184);

const WALKER_RIGHT: [&str; 3] = ["  (o>", " //\\ ", " V_/_"];
const WALKER_LEFT: [&str; 3] = ["<o)  ", " /\\\\ ", "_\\_V "];

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Text on the progress bar: `title - MM:SS / MM:SS`.
fn progress_text(title: Option<&str>, elapsed: Duration, length: Option<Duration>) -> String {
    let title = title.unwrap_or("?");
    match length {
        Some(length) => format!("{} - {} / {}", title, format_mmss(elapsed), format_mmss(length)),
        None => format!("{} - {}", title, format_mmss(elapsed)),
    }
}

/// Split the terminal into the scene and the one-row progress bar.
fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(3).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Where along the progress bar a click at (`column`, `row`) landed, in `[0, 1)`.
pub fn progress_bar_hit(area: Rect, column: u16, row: u16) -> Option<f32> {
    let (_, bar) = split(area);
    if bar.width == 0 || row != bar.y || column < bar.x || column >= bar.right() {
        return None;
    }
    Some((column - bar.x) as f32 / bar.width as f32)
}

/// Map a terminal cell to world coordinates, `None` outside the scene.
pub fn world_point(area: Rect, column: u16, row: u16) -> Option<(f32, f32)> {
    let (scene, _) = split(area);
    if scene.width == 0
        || scene.height == 0
        || column < scene.x
        || column >= scene.right()
        || row < scene.y
        || row >= scene.bottom()
    {
        return None;
    }
    let x = (column - scene.x) as f32 + 0.5;
    let y = (row - scene.y) as f32 + 0.5;
    Some((
        x / scene.width as f32 * WORLD_WIDTH,
        y / scene.height as f32 * (WORLD_HEIGHT - BAR_HEIGHT),
    ))
}

/// Canvas y for a world y.
fn flip(y: f32) -> f64 {
    (WORLD_HEIGHT - y) as f64
}

fn paint_grid(ctx: &mut Context<'_>) {
    let cell = (WORLD_WIDTH / GRID_COLS as f32).max(WORLD_HEIGHT / GRID_COLS as f32);
    for i in 0..GRID_COLS {
        let x = (i as f32 * cell) as f64;
        ctx.draw(&Line::new(x, BAR_HEIGHT as f64, x, WORLD_HEIGHT as f64, GRID));

        let y = i as f32 * cell;
        if y < WORLD_HEIGHT - BAR_HEIGHT {
            ctx.draw(&Line::new(0.0, flip(y), WORLD_WIDTH as f64, flip(y), GRID));
        }
    }
}

fn paint_bands(ctx: &mut Context<'_>, bands: &[f32], seeking: bool) {
    if bands.is_empty() {
        return;
    }
    let mut rng = rand::rng();
    let width = WORLD_WIDTH / bands.len() as f32;
    let floor = BAR_HEIGHT as f64;
    let max = WORLD_HEIGHT - BAR_HEIGHT;

    for (i, &value) in bands.iter().enumerate() {
        // Scrambled while fast-forwarding, there is nothing meaningful to show.
        let (level, color) = if seeking {
            let level = 0.3 + 0.5 / rng.random_range(1..8) as f32;
            let color = Color::Rgb(rng.random(), rng.random(), rng.random());
            (level, color)
        } else {
            (value.clamp(0.0, 1.0), BAND)
        };

        let top = floor + (max * level) as f64;
        let x = i as f32 * width;
        for fraction in [0.25, 0.75] {
            let bx = (x + width * fraction) as f64;
            ctx.draw(&Line::new(bx, floor, bx, top, color));
        }
    }
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, title_text: &str) {
    for ball in &scene.balls {
        let [r, g, b] = ball.color;
        ctx.draw(&Circle {
            x: ball.x as f64,
            y: flip(ball.y),
            radius: ball.radius as f64,
            color: Color::Rgb(r, g, b),
        });
    }
    ctx.layer();

    let white = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    for glyph in scene.title_glyphs(title_text) {
        ctx.print(
            glyph.x as f64,
            flip(glyph.y),
            Span::styled(glyph.ch.to_string(), white),
        );
    }

    let walker = &scene.walker;
    let sprite = if walker.flipped { WALKER_LEFT } else { WALKER_RIGHT };
    let height = Walker::HEIGHT * Walker::squash(scene.time());
    let step = height / sprite.len() as f32;
    let bottom = WORLD_HEIGHT - BAR_HEIGHT;
    for (i, line) in sprite.iter().enumerate() {
        let y = bottom - height + step * i as f32;
        ctx.print(walker.x as f64, flip(y), Span::styled(*line, Style::default().fg(Color::White)));
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &Visualizer,
    scene: &Scene,
    position: (Duration, Option<Duration>),
    ui_settings: &UiSettings,
) {
    let (scene_area, bar_area) = split(frame.area());
    let seeking = app.seek.is_seeking();

    let canvas = Canvas::default()
        .background_color(BACKGROUND)
        .marker(Marker::Braille)
        .x_bounds([0.0, WORLD_WIDTH as f64])
        .y_bounds([BAR_HEIGHT as f64, WORLD_HEIGHT as f64])
        .paint(|ctx| {
            paint_grid(ctx);
            ctx.layer();
            paint_bands(ctx, app.spectrum.bands(), seeking);
            ctx.layer();
            paint_scene(ctx, scene, &ui_settings.title_text);
        });
    frame.render_widget(canvas, scene_area);

    // Progress bar
    let (elapsed, length) = position;
    let ratio = match length {
        Some(l) if !l.is_zero() => (elapsed.as_secs_f64() / l.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let bar = Gauge::default()
        .gauge_style(Style::default().fg(BAR_FILL).bg(GRID))
        .ratio(ratio)
        .label(progress_text(app.title(), elapsed, length));
    frame.render_widget(bar, bar_area);

    // Volume popup
    if app.popup_visible() {
        let area = centered_rect_sized(frame.area().width / 4, 3, frame.area());
        let volume = app.volume().clamp(0.0, 1.0);
        let popup = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" volume "))
            .gauge_style(Style::default().fg(BAR_FILL).bg(GRID))
            .ratio(volume as f64)
            .label(format!("{}%", (volume * 100.0) as u32));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}
