//! Audio-related small types and the playback seam.
//!
//! The rest of the crate talks to the output device only through the
//! [`Playback`] trait, which keeps seeking and track switching testable
//! without a sound card.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::spectrum::SampleFormat;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no track loaded")]
    NothingLoaded,
}

/// Layout of the stream currently being played.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: SampleFormat,
}

/// A sequential, looping player: it can restart a track but not jump into it.
pub trait Playback {
    /// Release the current stream (if any) and start playing `path` on loop.
    fn load(&mut self, path: &Path) -> Result<StreamInfo, AudioError>;
    /// Release the current stream.
    fn unload(&mut self);
    /// Stop the current stream and play it again from the beginning.
    fn restart(&mut self) -> Result<(), AudioError>;
    /// Time played since the stream started, scaled by pitch.
    fn time_played(&self) -> Duration;
    /// Length of one pass through the track, when known.
    fn time_length(&self) -> Option<Duration>;
    /// Playback speed multiplier; 1.0 is normal.
    fn set_pitch(&mut self, pitch: f32);
    /// Output level in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
}
