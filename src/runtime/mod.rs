use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Visualizer;
use crate::audio::{AudioPlayer, SampleTap};
use crate::catalog::load_catalog;
use crate::scene::Scene;

mod event_loop;
mod input;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    logging::init(&settings.logging);

    // An explicit folder on the command line replaces the configured one.
    if let Some(dir) = env::args_os().nth(1) {
        settings.library.dir = PathBuf::from(dir);
        settings.library.tracks.clear();
    }

    let catalog = load_catalog(&settings.library)?;
    let tap = SampleTap::new(settings.spectrum.queue_capacity);
    let mut player = AudioPlayer::new(Arc::clone(&tap))?;

    let mut rng = rand::rng();
    let mut app = Visualizer::new(catalog, &settings);
    let mut scene = Scene::new(&settings.ui, &mut rng);

    startup::start_playback(&mut app, &mut player, &mut rng);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut scene,
            &mut player,
            &tap,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    run_result
}
