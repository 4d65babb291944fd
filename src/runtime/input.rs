//! Terminal events to visualizer actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::catalog::TrackChange;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    ChangeTrack(TrackChange),
    /// A volume key went down or repeated.
    Volume { up: bool },
    /// A volume key was released (only reported by terminals with key-release support).
    VolumeRelease,
    /// Seek to this fraction of the track.
    SeekTo(f32),
    /// The pointer moved; `None` when it left the scene.
    Pointer(Option<(f32, f32)>),
}

/// Translate one terminal event; `area` is the frame size of the last draw.
pub fn map_event(event: Event, area: Rect) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, area),
        Event::FocusLost => Some(Action::Pointer(None)),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Action> {
    let volume_up = match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(true),
        KeyCode::Char('s') | KeyCode::Down => Some(false),
        _ => None,
    };
    if let Some(up) = volume_up {
        return match key.kind {
            KeyEventKind::Release => Some(Action::VolumeRelease),
            _ => Some(Action::Volume { up }),
        };
    }

    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::ChangeTrack(TrackChange::Random)),
        KeyCode::Char('d') | KeyCode::Right => Some(Action::ChangeTrack(TrackChange::Next)),
        KeyCode::Char('a') | KeyCode::Left => Some(Action::ChangeTrack(TrackChange::Previous)),
        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent, area: Rect) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match ui::progress_bar_hit(area, mouse.column, mouse.row) {
                Some(ratio) => Some(Action::SeekTo(ratio)),
                None => Some(Action::Pointer(ui::world_point(area, mouse.column, mouse.row))),
            }
        }
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(Action::Pointer(ui::world_point(area, mouse.column, mouse.row)))
        }
        _ => None,
    }
}

/// Turns the press/repeat stream of a held volume key into a level.
///
/// Every event keeps the key held for `hold_secs`; the volume then moves a
/// little on each frame for as long as it is held.
#[derive(Debug, Default)]
pub struct VolumeHold {
    up: bool,
    remaining: f32,
}

impl VolumeHold {
    pub fn press(&mut self, up: bool, hold_secs: f32) {
        self.up = up;
        self.remaining = hold_secs;
    }

    pub fn release(&mut self) {
        self.remaining = 0.0;
    }

    /// Direction to move the volume this frame, if a key is held.
    pub fn tick(&mut self, dt: f32) -> Option<bool> {
        if self.remaining <= 0.0 {
            return None;
        }
        self.remaining -= dt;
        Some(self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn track_keys_map_on_press_only() {
        assert_eq!(
            map_event(key(KeyCode::Char(' '), KeyEventKind::Press), AREA),
            Some(Action::ChangeTrack(TrackChange::Random))
        );
        assert_eq!(
            map_event(key(KeyCode::Right, KeyEventKind::Press), AREA),
            Some(Action::ChangeTrack(TrackChange::Next))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('a'), KeyEventKind::Press), AREA),
            Some(Action::ChangeTrack(TrackChange::Previous))
        );
        assert_eq!(map_event(key(KeyCode::Char('d'), KeyEventKind::Repeat), AREA), None);
    }

    #[test]
    fn volume_keys_repeat_and_release() {
        assert_eq!(
            map_event(key(KeyCode::Up, KeyEventKind::Press), AREA),
            Some(Action::Volume { up: true })
        );
        assert_eq!(
            map_event(key(KeyCode::Char('s'), KeyEventKind::Repeat), AREA),
            Some(Action::Volume { up: false })
        );
        assert_eq!(
            map_event(key(KeyCode::Char('w'), KeyEventKind::Release), AREA),
            Some(Action::VolumeRelease)
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_event(key(KeyCode::Esc, KeyEventKind::Press), AREA), Some(Action::Quit));
        assert_eq!(map_event(key(KeyCode::Char('q'), KeyEventKind::Press), AREA), Some(Action::Quit));
        let ctrl_c = Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(ctrl_c, AREA), Some(Action::Quit));
    }

    #[test]
    fn clicks_on_the_bar_seek_and_elsewhere_move_the_pointer() {
        assert_eq!(map_event(click(40, 23), AREA), Some(Action::SeekTo(0.5)));
        assert!(matches!(
            map_event(click(40, 10), AREA),
            Some(Action::Pointer(Some(_)))
        ));
        assert_eq!(map_event(Event::FocusLost, AREA), Some(Action::Pointer(None)));
    }

    #[test]
    fn volume_hold_lasts_for_the_hold_window() {
        let mut hold = VolumeHold::default();
        assert_eq!(hold.tick(0.016), None);

        hold.press(true, 0.05);
        assert_eq!(hold.tick(0.02), Some(true));
        assert_eq!(hold.tick(0.02), Some(true));
        assert_eq!(hold.tick(0.02), Some(true));
        assert_eq!(hold.tick(0.02), None);

        hold.press(false, 1.0);
        hold.release();
        assert_eq!(hold.tick(0.02), None);
    }
}
