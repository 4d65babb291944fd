use super::sample::{SampleBlock, SampleFormat};

/// Fixed-size set of smoothed band magnitudes.
///
/// The band count is chosen once and the storage is never reallocated; every
/// processed block blends its readings into the existing values.
#[derive(Debug, Clone)]
pub struct Spectrum {
    bands: Box<[f32]>,
    smoothing: f32,
}

impl Spectrum {
    /// Create `count` bands at rest. `smoothing` scales frame time into the blend factor.
    pub fn new(count: usize, smoothing: f32) -> Self {
        Self {
            bands: vec![0.0; count].into_boxed_slice(),
            smoothing,
        }
    }

    pub fn bands(&self) -> &[f32] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Blend factor for a frame that took `frame_time` seconds.
    pub fn blend_factor(&self, frame_time: f32) -> f32 {
        (self.smoothing * frame_time).clamp(0.0, 1.0)
    }

    /// Fold one block of interleaved samples into the bands.
    ///
    /// Each band averages the absolute amplitude of a contiguous slice of the
    /// block, reading the first channel of every frame (plus the second one for
    /// stereo). Blocks with fewer samples than bands are skipped.
    fn process_block(&mut self, block: SampleBlock<'_>, channels: u16, frame_time: f32) {
        let channels = channels as usize;
        if channels == 0 || block.is_empty() || self.bands.is_empty() {
            return;
        }

        // Only whole frames take part.
        let total = (block.len() / channels) * channels;
        let per_band = total / self.bands.len();
        if per_band == 0 {
            log::trace!(
                "skipping block of {} samples: fewer than {} bands",
                total,
                self.bands.len()
            );
            return;
        }

        let t = self.blend_factor(frame_time);
        for (i, band) in self.bands.iter_mut().enumerate() {
            let start = i * per_band;
            let end = start + per_band;

            let mut sum = 0.0;
            for j in (start..end).step_by(channels) {
                sum += block.magnitude(j).unwrap_or(0.0);
                if channels == 2 {
                    sum += block.magnitude(j + 1).unwrap_or(0.0);
                }
            }

            let reading = sum / per_band as f32;
            *band = lerp(*band, reading, t);
        }
    }

    /// Fold a raw native-endian buffer of interleaved samples into the bands.
    ///
    /// `bits` is the sample width. Only 16-bit integer and 32-bit float are
    /// understood; other widths are logged and leave the bands untouched.
    pub fn process_raw(&mut self, bytes: &[u8], bits: u32, channels: u16, frame_time: f32) {
        match SampleFormat::from_bits(bits) {
            Ok(format) => self.process_block(SampleBlock::new(bytes, format), channels, frame_time),
            Err(e) => log::warn!("band extraction skipped: {e}"),
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
