//! In-memory [`Playback`] used by unit tests.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::spectrum::SampleFormat;

use super::types::{AudioError, Playback, StreamInfo};

#[derive(Debug)]
pub struct FakePlayback {
    pub loaded: Option<PathBuf>,
    pub elapsed: Duration,
    pub length: Option<Duration>,
    pub pitch: f32,
    pub volume: f32,
    pub loads: usize,
    pub unloads: usize,
    pub restarts: usize,
    /// Paths that fail to load.
    pub broken: Vec<PathBuf>,
}

impl FakePlayback {
    pub fn new(length: Duration) -> Self {
        Self {
            loaded: None,
            elapsed: Duration::ZERO,
            length: Some(length),
            pitch: 1.0,
            volume: 1.0,
            loads: 0,
            unloads: 0,
            restarts: 0,
            broken: Vec::new(),
        }
    }

    /// Let `dt` of wall time pass; playback moves `pitch` times as fast.
    pub fn advance(&mut self, dt: Duration) {
        if self.loaded.is_some() {
            self.elapsed += dt.mul_f32(self.pitch);
        }
    }
}

impl Playback for FakePlayback {
    fn load(&mut self, path: &Path) -> Result<StreamInfo, AudioError> {
        self.unload();
        if self.broken.iter().any(|b| b == path) {
            return Err(AudioError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            });
        }
        self.loads += 1;
        self.loaded = Some(path.to_path_buf());
        self.elapsed = Duration::ZERO;
        Ok(StreamInfo {
            sample_rate: 44_100,
            channels: 2,
            format: SampleFormat::F32,
        })
    }

    fn unload(&mut self) {
        if self.loaded.take().is_some() {
            self.unloads += 1;
        }
        self.elapsed = Duration::ZERO;
    }

    fn restart(&mut self) -> Result<(), AudioError> {
        if self.loaded.is_none() {
            return Err(AudioError::NothingLoaded);
        }
        self.restarts += 1;
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    fn time_played(&self) -> Duration {
        self.elapsed
    }

    fn time_length(&self) -> Option<Duration> {
        self.length
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}
