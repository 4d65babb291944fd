//! Hand-off of played samples from rodio's output thread to the render loop.
//!
//! The output thread pushes every sample it pulls into a bounded lock-free
//! queue (oldest samples are dropped when the render loop falls behind). The
//! render loop drains it once per frame and runs band extraction itself, so
//! the band state is only ever touched from one thread.
//!
//! The tap also counts the samples it sees. It sits below rodio's speed
//! stage, so that count is the position within the track whatever the
//! playback speed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use crossbeam::queue::ArrayQueue;
use rodio::source::SeekError;
use rodio::{ChannelCount, Sample, SampleRate, Source};

pub struct SampleTap {
    queue: ArrayQueue<f32>,
    channels: AtomicU16,
    sample_rate: AtomicU32,
    /// Samples pulled through the tap since the last reset.
    played: AtomicU64,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            queue: ArrayQueue::new(capacity.max(1)),
            channels: AtomicU16::new(0),
            sample_rate: AtomicU32::new(0),
            played: AtomicU64::new(0),
        })
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Channel count of the stream feeding the queue.
    pub fn channels(&self) -> u16 {
        self.channels.load(Ordering::Relaxed)
    }

    pub fn push(&self, sample: f32) {
        self.played.fetch_add(1, Ordering::Relaxed);
        let _ = self.queue.force_push(sample);
    }

    /// Forget buffered samples and the play count, and switch to a stream
    /// with the given layout.
    pub fn reset(&self, channels: u16, sample_rate: u32) {
        self.channels.store(channels, Ordering::Relaxed);
        self.sample_rate.store(sample_rate, Ordering::Relaxed);
        self.played.store(0, Ordering::Relaxed);
        while self.queue.pop().is_some() {}
    }

    /// Track time pulled through the tap since the last reset.
    pub fn played(&self) -> Duration {
        let frame_rate = self.channels() as u64 * self.sample_rate.load(Ordering::Relaxed) as u64;
        if frame_rate == 0 {
            return Duration::ZERO;
        }
        let samples = self.played.load(Ordering::Relaxed);
        let secs = samples / frame_rate;
        let rest = samples % frame_rate;
        Duration::from_secs(secs) + Duration::from_nanos(rest * 1_000_000_000 / frame_rate)
    }

    /// Move buffered samples into `out`, replacing its contents.
    ///
    /// Never grows `out` past the queue capacity, so a buffer created with
    /// [`SampleTap::scratch`] is not reallocated.
    pub fn drain_into(&self, out: &mut Vec<f32>) -> usize {
        out.clear();
        let limit = self.capacity();
        while out.len() < limit {
            match self.queue.pop() {
                Some(s) => out.push(s),
                None => break,
            }
        }
        out.len()
    }

    /// A buffer large enough to hold a full drain.
    pub fn scratch(&self) -> Vec<f32> {
        Vec::with_capacity(self.capacity())
    }
}

/// Source adapter copying each sample into a [`SampleTap`].
pub struct TappedSource<S> {
    inner: S,
    tap: Arc<SampleTap>,
}

impl<S> TappedSource<S> {
    pub fn new(inner: S, tap: Arc<SampleTap>) -> Self {
        Self { inner, tap }
    }
}

impl<S> Iterator for TappedSource<S>
where
    S: Source,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let sample = self.inner.next()?;
        self.tap.push(sample);
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Source for TappedSource<S>
where
    S: Source,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)
    }
}
