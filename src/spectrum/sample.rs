//! Sample formats accepted by the band extractor.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpectrumError {
    #[error("unsupported sample width: {0} bits")]
    UnsupportedSampleWidth(u32),
}

/// Width and encoding of one sample in a raw buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleFormat {
    /// Signed 16-bit fixed point.
    I16,
    /// 32-bit float.
    F32,
}

impl SampleFormat {
    /// Map a bits-per-sample descriptor (16 or 32) to a format.
    pub fn from_bits(bits: u32) -> Result<Self, SpectrumError> {
        match bits {
            16 => Ok(Self::I16),
            32 => Ok(Self::F32),
            other => Err(SpectrumError::UnsupportedSampleWidth(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::I16 => 16,
            Self::F32 => 32,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// A borrowed block of interleaved native-endian samples, as handed over by
/// a device callback.
#[derive(Debug, Copy, Clone)]
pub struct SampleBlock<'a> {
    bytes: &'a [u8],
    format: SampleFormat,
}

impl<'a> SampleBlock<'a> {
    pub fn new(bytes: &'a [u8], format: SampleFormat) -> Self {
        Self { bytes, format }
    }

    /// Number of whole samples (not frames) in the block.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.format.bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute amplitude of sample `j`, normalized to `[0, 1]` for fixed point.
    pub fn magnitude(&self, j: usize) -> Option<f32> {
        let width = self.format.bytes();
        let chunk = self.bytes.get(j * width..(j + 1) * width)?;
        Some(match self.format {
            SampleFormat::I16 => (i16::from_ne_bytes([chunk[0], chunk[1]]) as f32 / 32768.0).abs(),
            SampleFormat::F32 => f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).abs(),
        })
    }
}
