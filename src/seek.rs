//! Seeking for players that can only go forward.
//!
//! Module formats cannot jump to a position, so a seek fast-forwards instead:
//! output is muted and the playback speed raised until the elapsed time
//! reaches the target. A target behind the current position restarts the
//! track first. Completion is noticed by calling [`SeekController::update`]
//! once per frame.

use std::time::Duration;

use crate::audio::Playback;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SeekState {
    Idle,
    Seeking {
        target: Duration,
        /// Elapsed time when the seek began (zero after a restart).
        start: Duration,
        /// `elapsed / target` as of the last update.
        progress: f32,
    },
}

#[derive(Debug)]
pub struct SeekController {
    state: SeekState,
    pitch: f32,
}

impl SeekController {
    /// `pitch` is the speed multiplier used while fast-forwarding.
    pub fn new(pitch: f32) -> Self {
        Self {
            state: SeekState::Idle,
            pitch,
        }
    }

    pub fn state(&self) -> SeekState {
        self.state
    }

    pub fn is_seeking(&self) -> bool {
        matches!(self.state, SeekState::Seeking { .. })
    }

    /// Progress of the active seek in `[0, 1)`, `None` when idle.
    pub fn progress(&self) -> Option<f32> {
        match self.state {
            SeekState::Seeking { progress, .. } => Some(progress),
            SeekState::Idle => None,
        }
    }

    /// Begin fast-forwarding to `target`, replacing any seek in flight.
    ///
    /// `volume` is the user's level, restored if the seek cannot start.
    pub fn start<P: Playback + ?Sized>(&mut self, engine: &mut P, target: Duration, volume: f32) {
        self.cancel(engine, volume);

        let mut start = engine.time_played();
        if target < start {
            if let Err(e) = engine.restart() {
                log::warn!("cannot restart track for seek: {e}");
                return;
            }
            start = Duration::ZERO;
        }

        log::debug!(
            "seeking from {:.1}s to {:.1}s",
            start.as_secs_f32(),
            target.as_secs_f32()
        );

        engine.set_pitch(self.pitch);
        engine.set_volume(0.0);
        self.state = SeekState::Seeking {
            target,
            start,
            progress: progress(start, target),
        };
    }

    /// Advance the state machine; returns `true` on the tick the seek completes.
    pub fn update<P: Playback + ?Sized>(&mut self, engine: &mut P, volume: f32) -> bool {
        let SeekState::Seeking { target, start, .. } = self.state else {
            return false;
        };

        // Volume changes made during the seek must not leak out.
        engine.set_volume(0.0);

        let progress = progress(engine.time_played(), target);
        if progress >= 1.0 {
            self.finish(engine, volume);
            return true;
        }

        self.state = SeekState::Seeking {
            target,
            start,
            progress,
        };
        false
    }

    /// Abort the seek in flight, if any, restoring normal speed and `volume`.
    pub fn cancel<P: Playback + ?Sized>(&mut self, engine: &mut P, volume: f32) {
        if self.is_seeking() {
            self.finish(engine, volume);
        }
    }

    fn finish<P: Playback + ?Sized>(&mut self, engine: &mut P, volume: f32) {
        self.state = SeekState::Idle;
        engine.set_pitch(1.0);
        engine.set_volume(volume);
    }
}

fn progress(elapsed: Duration, target: Duration) -> f32 {
    if target.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f32() / target.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakePlayback;
    use std::path::Path;

    const FRAME: Duration = Duration::from_millis(16);

    fn playing_at(elapsed: Duration) -> FakePlayback {
        let mut p = FakePlayback::new(Duration::from_secs(20));
        p.load(Path::new("resources/song.xm")).unwrap();
        p.elapsed = elapsed;
        p.volume = 0.4;
        p
    }

    fn run_until_idle(seek: &mut SeekController, p: &mut FakePlayback, volume: f32) -> usize {
        let mut ticks = 0;
        while seek.is_seeking() {
            p.advance(FRAME);
            seek.update(p, volume);
            ticks += 1;
            assert!(ticks < 10_000, "seek never finished");
        }
        ticks
    }

    #[test]
    fn forward_seek_mutes_and_accelerates_until_target() {
        let mut p = playing_at(Duration::from_secs(3));
        let mut seek = SeekController::new(50.0);

        seek.start(&mut p, Duration::from_secs(10), 0.4);

        assert!(seek.is_seeking());
        assert_eq!(p.pitch, 50.0);
        assert_eq!(p.volume, 0.0);
        assert_eq!(p.restarts, 0);
        match seek.state() {
            SeekState::Seeking { start, target, .. } => {
                assert_eq!(start, Duration::from_secs(3));
                assert_eq!(target, Duration::from_secs(10));
            }
            SeekState::Idle => unreachable!(),
        }

        run_until_idle(&mut seek, &mut p, 0.4);

        assert!(p.elapsed >= Duration::from_secs(10));
        assert_eq!(p.pitch, 1.0);
        assert_eq!(p.volume, 0.4);
        assert_eq!(seek.progress(), None);
    }

    #[test]
    fn backward_seek_restarts_from_zero() {
        let mut p = playing_at(Duration::from_secs(15));
        let mut seek = SeekController::new(50.0);

        seek.start(&mut p, Duration::from_secs(2), 0.4);

        assert_eq!(p.restarts, 1);
        assert_eq!(p.elapsed, Duration::ZERO);
        match seek.state() {
            SeekState::Seeking { start, progress, .. } => {
                assert_eq!(start, Duration::ZERO);
                assert_eq!(progress, 0.0);
            }
            SeekState::Idle => unreachable!(),
        }

        p.advance(FRAME);
        seek.update(&mut p, 0.4);
        let first = seek.progress().unwrap();
        assert!(first > 0.0 && first < 1.0);

        run_until_idle(&mut seek, &mut p, 0.4);
        assert!(p.elapsed >= Duration::from_secs(2));
        assert!(p.elapsed < Duration::from_secs(15));
    }

    #[test]
    fn progress_grows_monotonically() {
        let mut p = playing_at(Duration::ZERO);
        let mut seek = SeekController::new(50.0);
        seek.start(&mut p, Duration::from_secs(12), 0.4);

        let mut last = 0.0;
        while seek.is_seeking() {
            p.advance(FRAME);
            seek.update(&mut p, 0.4);
            if let Some(now) = seek.progress() {
                assert!(now >= last);
                assert!(now < 1.0);
                last = now;
            }
        }
    }

    #[test]
    fn zero_target_completes_on_first_update() {
        let mut p = playing_at(Duration::ZERO);
        let mut seek = SeekController::new(50.0);

        seek.start(&mut p, Duration::ZERO, 0.4);
        assert!(seek.is_seeking());

        assert!(seek.update(&mut p, 0.4));
        assert!(!seek.is_seeking());
        assert_eq!(p.pitch, 1.0);
        assert_eq!(p.volume, 0.4);
    }

    #[test]
    fn update_keeps_output_muted_and_restores_latest_volume() {
        let mut p = playing_at(Duration::ZERO);
        let mut seek = SeekController::new(50.0);
        seek.start(&mut p, Duration::from_secs(5), 0.4);

        // Someone raised the output level mid-seek.
        p.volume = 0.9;
        p.advance(FRAME);
        seek.update(&mut p, 0.7);
        assert_eq!(p.volume, 0.0);

        run_until_idle(&mut seek, &mut p, 0.7);
        assert_eq!(p.volume, 0.7);
    }

    #[test]
    fn new_seek_replaces_the_one_in_flight() {
        let mut p = playing_at(Duration::from_secs(4));
        let mut seek = SeekController::new(50.0);

        seek.start(&mut p, Duration::from_secs(18), 0.4);
        p.advance(FRAME);
        seek.update(&mut p, 0.4);

        seek.start(&mut p, Duration::from_secs(1), 0.4);
        assert_eq!(p.restarts, 1);
        match seek.state() {
            SeekState::Seeking { target, .. } => assert_eq!(target, Duration::from_secs(1)),
            SeekState::Idle => unreachable!(),
        }
    }

    #[test]
    fn cancel_restores_normal_playback() {
        let mut p = playing_at(Duration::ZERO);
        let mut seek = SeekController::new(50.0);
        seek.start(&mut p, Duration::from_secs(10), 0.4);

        seek.cancel(&mut p, 0.4);

        assert_eq!(seek.state(), SeekState::Idle);
        assert_eq!(p.pitch, 1.0);
        assert_eq!(p.volume, 0.4);
        assert!(!seek.update(&mut p, 0.4));
    }

    #[test]
    fn failed_restart_leaves_controller_idle() {
        let mut p = playing_at(Duration::from_secs(8));
        p.unload();
        p.elapsed = Duration::from_secs(8);
        let mut seek = SeekController::new(50.0);

        seek.start(&mut p, Duration::from_secs(1), 0.4);

        assert!(!seek.is_seeking());
        assert_eq!(p.pitch, 1.0);
    }
}
