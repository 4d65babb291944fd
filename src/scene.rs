//! Background animation: bouncing balls, the walking sprite and the orbiting
//! title text.
//!
//! Everything lives in a fixed virtual world of `WORLD_WIDTH` x `WORLD_HEIGHT`
//! units with the origin at the top-left; the UI scales it to the terminal.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::UiSettings;

pub const WORLD_WIDTH: f32 = 1920.0;
pub const WORLD_HEIGHT: f32 = 1080.0;
/// Height of the progress bar strip at the bottom of the world.
pub const BAR_HEIGHT: f32 = 32.0;
pub const GRID_COLS: usize = 64;

/// Side of the square around the pointer that pushes balls away.
const POINTER_REACH: f32 = 500.0;
const BALL_PUSH: f32 = 300.0;

const TEXT_SIZE: f32 = 69.0;
const GLYPH_ADVANCE: f32 = 48.0;
const TEXT_ORBIT_X: f32 = WORLD_WIDTH / 6.0;
const TEXT_ORBIT_Y: f32 = WORLD_HEIGHT / 4.0;

const WALKER_WIDTH: f32 = 96.0;
const WALKER_HEIGHT: f32 = 96.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Ball {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut ball = Self {
            x: rng.random_range(0.0..WORLD_WIDTH),
            y: rng.random_range(0.0..WORLD_HEIGHT),
            dx: rng.random_range(25.0..75.0),
            dy: rng.random_range(25.0..75.0),
            radius: rng.random_range(35.0..69.0),
            color: [rng.random(), rng.random(), rng.random()],
        };
        ball.keep_inside();
        ball
    }

    fn step(&mut self, dt: f32) {
        self.x += self.dx * dt;
        self.y += self.dy * dt;
        self.keep_inside();
    }

    /// Clamp to the playfield, reversing direction on the wall that was hit.
    fn keep_inside(&mut self) {
        if self.x > WORLD_WIDTH - self.radius {
            self.x = WORLD_WIDTH - self.radius;
            self.dx = -self.dx;
        } else if self.x < self.radius {
            self.x = self.radius;
            self.dx = -self.dx;
        }

        let floor = WORLD_HEIGHT - BAR_HEIGHT - self.radius;
        if self.y > floor {
            self.y = floor;
            self.dy = -self.dy;
        } else if self.y < self.radius {
            self.y = self.radius;
            self.dy = -self.dy;
        }
    }

    fn near(&self, (px, py): (f32, f32)) -> bool {
        let half = POINTER_REACH / 2.0;
        let r = self.radius / 2.0;
        self.x + r > px - half && self.x - r < px + half && self.y + r > py - half && self.y - r < py + half
    }

    /// Shove the ball away from the pointer and point its velocity the same way.
    fn push_from(&mut self, (px, py): (f32, f32), dt: f32) {
        let (vx, vy) = (self.x - px, self.y - py);
        let len = (vx * vx + vy * vy).sqrt();
        let (nx, ny) = if len > 0.0 { (vx / len, vy / len) } else { (0.0, 0.0) };

        self.x += BALL_PUSH * dt * nx;
        self.y += BALL_PUSH * dt * ny;
        self.dx = self.dx.abs().copysign(nx);
        self.dy = self.dy.abs().copysign(ny);

        self.keep_inside();
    }
}

/// The sprite pacing along the progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    pub x: f32,
    pub speed: f32,
    pub flipped: bool,
}

impl Walker {
    pub const WIDTH: f32 = WALKER_WIDTH;
    pub const HEIGHT: f32 = WALKER_HEIGHT;

    fn step(&mut self, dt: f32) {
        let dir = if self.flipped { -1.0 } else { 1.0 };
        self.x += self.speed * dt * dir;

        if self.x > WORLD_WIDTH - Self::WIDTH {
            self.x = WORLD_WIDTH - Self::WIDTH;
            self.flipped = !self.flipped;
        } else if self.x < 0.0 {
            self.x = 0.0;
            self.flipped = !self.flipped;
        }
    }

    /// Squash of the sprite at `time`, in `[0.5, 1]` of its height; two hops per second.
    pub fn squash(time: f32) -> f32 {
        0.75 + (time * 2.0 * TAU).cos() * 0.25
    }
}

/// One letter of the orbiting title, positioned in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
}

pub struct Scene {
    pub balls: Vec<Ball>,
    pub walker: Walker,
    /// Pointer position in world units, when it is over the screen.
    pub pointer: Option<(f32, f32)>,
    time: f32,
    text_speed: f32,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(settings: &UiSettings, rng: &mut R) -> Self {
        let mut balls = Vec::with_capacity(settings.ball_count);
        balls.extend((0..settings.ball_count).map(|_| Ball::random(rng)));

        Self {
            balls,
            walker: Walker {
                x: 0.0,
                speed: settings.walker_speed,
                flipped: false,
            },
            pointer: None,
            time: 0.0,
            text_speed: settings.text_speed,
        }
    }

    /// Seconds since the scene started.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;

        for ball in &mut self.balls {
            match self.pointer {
                Some(p) if ball.near(p) => ball.push_from(p, dt),
                _ => ball.step(dt),
            }
        }

        self.walker.step(dt);
    }

    /// Letters of `text` circling the middle of the world, each riding its own
    /// phase of a sine wave.
    pub fn title_glyphs(&self, text: &str) -> Vec<Glyph> {
        let count = text.chars().count();
        if count == 0 {
            return Vec::new();
        }

        let phase = self.time * self.text_speed * TAU;
        let spread = TAU / count as f32;
        let width = count as f32 * GLYPH_ADVANCE;

        let left = WORLD_WIDTH / 2.0 - width / 2.0 + phase.cos() * TEXT_ORBIT_X;
        let middle = WORLD_HEIGHT / 2.0 - TEXT_SIZE / 2.0 + phase.sin() * TEXT_ORBIT_Y;

        text.chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                x: left + i as f32 * GLYPH_ADVANCE,
                y: middle + (phase + i as f32 * spread).sin() * TEXT_SIZE,
            })
            .collect()
    }
}
