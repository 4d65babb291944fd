//! The `Visualizer` context object.
//!
//! Everything the frame loop mutates lives here and is passed around
//! explicitly; operations that touch the output take the player as an argument.

use std::time::Duration;

use rand::Rng;

use crate::audio::{Playback, SampleTap, StreamInfo};
use crate::catalog::{Catalog, TrackChange};
use crate::config::Settings;
use crate::seek::SeekController;
use crate::spectrum::{SampleFormat, Spectrum};

pub struct Visualizer {
    pub catalog: Catalog,
    pub spectrum: Spectrum,
    pub seek: SeekController,

    volume: f32,
    volume_step: f32,

    popup_secs: f32,
    popup_remaining: f32,

    title: Option<String>,
    stream: Option<StreamInfo>,

    scratch: Vec<f32>,
    raw: Vec<u8>,
}

impl Visualizer {
    pub fn new(catalog: Catalog, settings: &Settings) -> Self {
        Self {
            catalog,
            spectrum: Spectrum::new(settings.spectrum.bands, settings.spectrum.smoothing),
            seek: SeekController::new(settings.seek.pitch),
            volume: settings.audio.initial_volume.clamp(0.0, 1.0),
            volume_step: settings.audio.volume_step,
            popup_secs: settings.ui.popup_secs,
            popup_remaining: 0.0,
            title: None,
            stream: None,
            scratch: Vec::new(),
            raw: Vec::new(),
        }
    }

    /// Last volume the user asked for, even while a seek keeps output muted.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Layout of the live stream; `None` when the last load failed.
    pub fn stream(&self) -> Option<StreamInfo> {
        self.stream
    }

    pub fn popup_visible(&self) -> bool {
        self.popup_remaining > 0.0
    }

    /// Switch to another track of the catalog.
    ///
    /// Any seek in flight is cancelled and the current stream released before
    /// the new one is loaded. A track that fails to load is logged and leaves
    /// nothing playing; the cursor still moves so the next change skips it.
    pub fn change_track<P, R>(&mut self, engine: &mut P, change: TrackChange, rng: &mut R)
    where
        P: Playback + ?Sized,
        R: Rng + ?Sized,
    {
        self.seek.cancel(engine, self.volume);
        engine.unload();

        let track = self.catalog.advance(change, rng);
        self.title = track.title.clone();

        self.stream = match engine.load(&track.path) {
            Ok(info) => {
                log::info!(
                    "playing {} ({} Hz, {} ch)",
                    track.path.display(),
                    info.sample_rate,
                    info.channels
                );
                Some(info)
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };

        engine.set_pitch(1.0);
        engine.set_volume(self.volume);
    }

    /// Nudge the volume for one frame of a held volume key.
    pub fn change_volume<P: Playback + ?Sized>(&mut self, engine: &mut P, up: bool, frame_time: f32) {
        self.popup_remaining = self.popup_secs;

        let delta = self.volume_step * frame_time;
        self.volume = if up {
            (self.volume + delta).min(1.0)
        } else {
            (self.volume - delta).max(0.0)
        };

        // A running seek keeps output muted and restores this level when done.
        if !self.seek.is_seeking() {
            engine.set_volume(self.volume);
        }
    }

    /// Seek to `ratio` of the track length (a click on the progress bar).
    pub fn seek_to_ratio<P: Playback + ?Sized>(&mut self, engine: &mut P, ratio: f32) {
        let Some(length) = engine.time_length() else {
            log::debug!("ignoring seek: track length unknown");
            return;
        };
        let target = length.mul_f32(ratio.clamp(0.0, 1.0));
        self.seek.start(engine, target, self.volume);
    }

    /// Fold the samples played since the last frame into the bands.
    ///
    /// The tap carries `f32` samples; they are handed to the extractor as a
    /// raw buffer in the live stream's format. Samples arriving while nothing
    /// is loaded are dropped.
    pub fn absorb_samples(&mut self, tap: &SampleTap, frame_time: f32) {
        if self.scratch.capacity() < tap.capacity() {
            self.scratch = tap.scratch();
            self.raw = Vec::with_capacity(tap.capacity() * SampleFormat::F32.bytes());
        }
        if tap.drain_into(&mut self.scratch) == 0 {
            return;
        }
        let Some(info) = self.stream else {
            return;
        };

        self.raw.clear();
        match info.format {
            SampleFormat::F32 => self
                .raw
                .extend(self.scratch.iter().flat_map(|s| s.to_ne_bytes())),
            SampleFormat::I16 => self.raw.extend(
                self.scratch
                    .iter()
                    .flat_map(|s| ((s.clamp(-1.0, 1.0) * 32767.0) as i16).to_ne_bytes()),
            ),
        }
        self.spectrum
            .process_raw(&self.raw, info.format.bits(), info.channels, frame_time);
    }

    /// Per-frame bookkeeping: seek progress and the volume popup timer.
    pub fn update<P: Playback + ?Sized>(&mut self, engine: &mut P, frame_time: f32) {
        self.seek.update(engine, self.volume);
        if self.popup_remaining > 0.0 {
            self.popup_remaining -= frame_time;
        }
    }

    /// Position within the current pass of the looping track and its length.
    pub fn position<P: Playback + ?Sized>(&self, engine: &P) -> (Duration, Option<Duration>) {
        let elapsed = engine.time_played();
        match engine.time_length() {
            Some(length) if !length.is_zero() => {
                let pass = elapsed.as_secs_f64() % length.as_secs_f64();
                (Duration::from_secs_f64(pass), Some(length))
            }
            length => (elapsed, length),
        }
    }
}
