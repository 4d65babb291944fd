//! Audio output: the playback seam, its rodio implementation and the sample
//! tap feeding the visualizer.

mod player;
mod sink;
mod tap;
mod types;

pub use player::AudioPlayer;
pub use tap::SampleTap;
pub use types::*;

#[cfg(test)]
pub mod fake;
#[cfg(test)]
mod tests;
