use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional config file, then environment variables
/// (prefix `MODVIZ__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MODVIZ")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.spectrum.bands == 0 {
            return Err("spectrum.bands must be >= 1".to_string());
        }
        if self.spectrum.queue_capacity < self.spectrum.bands {
            return Err("spectrum.queue_capacity must be >= spectrum.bands".to_string());
        }
        if !(self.spectrum.smoothing >= 0.0) {
            return Err("spectrum.smoothing must be >= 0".to_string());
        }
        if !(self.seek.pitch > 0.0) {
            return Err("seek.pitch must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if self.ui.target_fps == 0 {
            return Err("ui.target_fps must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MODVIZ_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MODVIZ_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/modviz/config.toml`
/// or `~/.config/modviz/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("modviz").join("config.toml"))
}
