use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Visualizer;
use crate::audio::{AudioPlayer, SampleTap};
use crate::config;
use crate::scene::Scene;
use crate::ui;

use super::input::{Action, VolumeHold, map_event};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    last_frame: Instant,
    /// Frame size of the last draw, used to map mouse positions.
    area: Rect,
    volume_hold: VolumeHold,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            area: Rect::default(),
            volume_hold: VolumeHold::default(),
        }
    }

    /// Seconds since the previous call.
    fn frame_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}

/// Main terminal loop: one iteration per frame. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut Visualizer,
    scene: &mut Scene,
    player: &mut AudioPlayer,
    tap: &SampleTap,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame_budget = Duration::from_secs_f64(1.0 / settings.ui.target_fps.max(1) as f64);
    let mut rng = rand::rng();

    loop {
        let frame_start = Instant::now();
        let dt = state.frame_time();

        app.absorb_samples(tap, dt);
        if let Some(up) = state.volume_hold.tick(dt) {
            app.change_volume(player, up, dt);
        }
        app.update(player, dt);
        scene.update(dt);

        let position = app.position(player);
        terminal.draw(|f| {
            state.area = f.area();
            ui::draw(f, app, scene, position, &settings.ui);
        })?;

        // Handle input until the frame's time is up.
        let deadline = frame_start + frame_budget;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let Some(action) = map_event(event::read()?, state.area) else {
                continue;
            };
            match action {
                Action::Quit => return Ok(()),
                Action::ChangeTrack(change) => app.change_track(player, change, &mut rng),
                Action::Volume { up } => state.volume_hold.press(up, settings.ui.key_hold_secs),
                Action::VolumeRelease => state.volume_hold.release(),
                Action::SeekTo(ratio) => app.seek_to_ratio(player, ratio),
                Action::Pointer(p) => scene.pointer = p,
            }
        }
    }
}
