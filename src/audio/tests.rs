use std::sync::Arc;

use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::{Sink, Source};

use super::tap::{SampleTap, TappedSource};

#[test]
fn tap_drains_in_push_order() {
    let tap = SampleTap::new(8);
    for s in [0.1, 0.2, 0.3] {
        tap.push(s);
    }

    let mut out = tap.scratch();
    assert_eq!(tap.drain_into(&mut out), 3);
    assert_eq!(out, vec![0.1, 0.2, 0.3]);

    assert_eq!(tap.drain_into(&mut out), 0);
    assert!(out.is_empty());
}

#[test]
fn full_tap_drops_oldest_samples() {
    let tap = SampleTap::new(4);
    for i in 0..10 {
        tap.push(i as f32);
    }

    let mut out = tap.scratch();
    tap.drain_into(&mut out);
    assert_eq!(out, vec![6.0, 7.0, 8.0, 9.0]);
    assert!(out.capacity() >= tap.capacity());
}

#[test]
fn reset_clears_and_records_channels() {
    let tap = SampleTap::new(4);
    tap.push(1.0);
    tap.reset(2, 44_100);

    assert_eq!(tap.channels(), 2);
    assert_eq!(tap.played(), Duration::ZERO);
    let mut out = tap.scratch();
    assert_eq!(tap.drain_into(&mut out), 0);
}

#[test]
fn played_counts_frames_even_when_samples_are_dropped() {
    let tap = SampleTap::new(4);
    tap.reset(2, 1000);
    for _ in 0..3000 {
        tap.push(0.0);
    }

    assert_eq!(tap.played(), Duration::from_millis(1500));
}

#[test]
fn played_is_zero_without_a_stream_layout() {
    let tap = SampleTap::new(4);
    tap.push(0.0);
    assert_eq!(tap.played(), Duration::ZERO);
}

#[test]
fn played_follows_track_time_at_any_speed() {
    for speed in [1.0, 2.0, 50.0] {
        let tap = SampleTap::new(16);
        tap.reset(2, 1000);

        let (sink, mut output) = Sink::new();
        let looped = SamplesBuffer::new(2, 1000, vec![0.25; 2000]).repeat_infinite();
        sink.append(TappedSource::new(looped, Arc::clone(&tap)));
        sink.set_speed(speed);

        // Two seconds of two-channel content at 1 kHz, whatever the speed.
        output.by_ref().take(4000).for_each(drop);

        let played = tap.played().as_secs_f32();
        assert!((played - 2.0).abs() < 0.05, "speed {speed}: played {played}s");
    }
}

#[test]
fn zero_capacity_is_bumped_to_one() {
    let tap = SampleTap::new(0);
    assert_eq!(tap.capacity(), 1);
}

#[test]
fn tapped_source_passes_samples_through_and_copies_them() {
    let tap = SampleTap::new(16);
    let data = vec![0.5, -0.5, 0.25, -0.25];
    let source = TappedSource::new(SamplesBuffer::new(2, 44_100, data.clone()), Arc::clone(&tap));

    assert_eq!(source.channels(), 2);
    assert_eq!(source.sample_rate(), 44_100);

    let played: Vec<f32> = source.collect();
    assert_eq!(played, data);

    let mut out = tap.scratch();
    tap.drain_into(&mut out);
    assert_eq!(out, data);
}
