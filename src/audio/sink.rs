//! Utilities for creating `rodio` sinks from track files.
//!
//! The helper here encapsulates opening/decoding a file, wiring the sample
//! tap in and preparing a paused, looping `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::spectrum::SampleFormat;

use super::tap::{SampleTap, TappedSource};
use super::types::{AudioError, StreamInfo};

pub(super) struct OpenedSink {
    pub sink: Sink,
    pub info: StreamInfo,
    pub length: Option<Duration>,
}

/// Create a paused `Sink` looping `path` forever, feeding `tap` as it plays.
pub(super) fn create_looping_sink(
    stream: &OutputStream,
    path: &Path,
    tap: &Arc<SampleTap>,
) -> Result<OpenedSink, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // rodio hands out f32 samples whatever the file stores.
    let info = StreamInfo {
        sample_rate: decoder.sample_rate(),
        channels: decoder.channels(),
        format: SampleFormat::F32,
    };
    // Measured before looping; a repeating source has no end.
    let length = decoder.total_duration();

    tap.reset(info.channels, info.sample_rate);
    let source = TappedSource::new(decoder.repeat_infinite(), Arc::clone(tap));

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();

    Ok(OpenedSink { sink, info, length })
}
