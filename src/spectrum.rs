//! Bar visualizer data: turns interleaved sample blocks into a fixed number
//! of smoothed amplitude bands.

mod bands;
mod sample;

pub use bands::*;
pub use sample::*;
