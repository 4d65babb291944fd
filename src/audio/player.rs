use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::{OpenedSink, create_looping_sink};
use super::tap::SampleTap;
use super::types::{AudioError, Playback, StreamInfo};

/// [`Playback`] on the default output device.
///
/// Exactly one sink is alive at a time; loading a track always stops and drops
/// the previous one first.
pub struct AudioPlayer {
    stream: OutputStream,
    tap: Arc<SampleTap>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    length: Option<Duration>,
    pitch: f32,
    volume: f32,
}

impl AudioPlayer {
    pub fn new(tap: Arc<SampleTap>) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which scribbles over the UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            tap,
            sink: None,
            path: None,
            length: None,
            pitch: 1.0,
            volume: 1.0,
        })
    }

    fn start(&mut self, path: &Path) -> Result<StreamInfo, AudioError> {
        let OpenedSink { sink, info, length } = create_looping_sink(&self.stream, path, &self.tap)?;

        sink.set_speed(self.pitch);
        sink.set_volume(self.volume);
        sink.play();

        self.sink = Some(sink);
        self.length = length;
        Ok(info)
    }
}

impl Playback for AudioPlayer {
    fn load(&mut self, path: &Path) -> Result<StreamInfo, AudioError> {
        self.unload();
        self.path = Some(path.to_path_buf());
        self.start(path)
    }

    fn unload(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.length = None;
    }

    fn restart(&mut self) -> Result<(), AudioError> {
        let Some(path) = self.path.clone() else {
            return Err(AudioError::NothingLoaded);
        };
        self.unload();
        self.start(&path).map(|_| ())
    }

    fn time_played(&self) -> Duration {
        // `Sink::get_pos` runs at output speed; the tap counts track samples.
        if self.sink.is_some() {
            self.tap.played()
        } else {
            Duration::ZERO
        }
    }

    fn time_length(&self) -> Option<Duration> {
        self.length
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        if let Some(s) = &self.sink {
            s.set_speed(pitch);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = &self.sink {
            s.set_volume(volume);
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.unload();
    }
}
