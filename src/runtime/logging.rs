use std::fs::OpenOptions;

use crate::config::LoggingSettings;

/// Install the global logger.
///
/// `RUST_LOG` wins over the configured level. The terminal belongs to the UI,
/// so a configured log file is preferred over stderr.
pub fn init(settings: &LoggingSettings) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.level.as_str()),
    );
    builder.format_timestamp_millis();

    if let Some(path) = &settings.file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("modviz: cannot open log file {}: {e}", path.display()),
        }
    }

    // A logger may already be installed (tests); keep it.
    let _ = builder.try_init();
}
