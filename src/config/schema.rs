use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/modviz/config.toml` or `~/.config/modviz/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MODVIZ__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub spectrum: SpectrumSettings,
    pub seek: SeekSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume applied at startup, in `[0, 1]`.
    pub initial_volume: f32,
    /// Volume change per second while a volume key is held.
    pub volume_step: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.1,
            volume_step: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpectrumSettings {
    /// Number of bars in the visualizer.
    pub bands: usize,
    /// How fast bars follow the signal (multiplied by frame time).
    pub smoothing: f32,
    /// Samples buffered between the audio thread and the render loop.
    pub queue_capacity: usize,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            bands: 128,
            smoothing: 20.0,
            queue_capacity: 16 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeekSettings {
    /// Playback speed multiplier used while fast-forwarding to a seek target.
    pub pitch: f32,
}

impl Default for SeekSettings {
    fn default() -> Self {
        Self { pitch: 50.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder scanned for tracks when `tracks` is empty.
    pub dir: PathBuf,
    /// File extensions to treat as modules (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Fixed playlist. When non-empty, no directory scan happens.
    pub tracks: Vec<PathBuf>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resources"),
            extensions: vec!["xm".into(), "mod".into()],
            tracks: Vec::new(),
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Frames per second the render loop aims for.
    pub target_fps: u32,
    /// Text orbiting the middle of the screen.
    pub title_text: String,
    pub ball_count: usize,
    /// Title orbit speed in revolutions per second.
    pub text_speed: f32,
    /// Walker speed in world pixels per second.
    pub walker_speed: f32,
    /// How long the volume popup stays visible after a change (seconds).
    pub popup_secs: f32,
    /// How long a volume key counts as held after a key event (seconds).
    ///
    /// Terminals report held keys as a stream of repeats, this bridges the gaps.
    pub key_hold_secs: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            title_text: "asdfghjkl".to_string(),
            ball_count: 69,
            text_speed: 0.25,
            walker_speed: 500.0,
            popup_secs: 1.0,
            key_hold_secs: 0.12,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset (e.g. "warn", "info", "modviz=debug").
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}
