//! Planar audio buffer
//!
//! Offline-side buffer type used by the WAV I/O path, the CLI and the
//! integration tests. The real-time path works directly on the host's
//! sample slices and never touches this type.

use crate::error::{DeckFxError, Result};

/// Convert decibels to linear amplitude.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels. Zero maps to `-inf`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Channel configuration. Only mono and stereo are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    Mono,
    #[default]
    Stereo,
}

impl ChannelLayout {
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

/// Non-interleaved f32 audio: one `Vec<f32>` per channel.
#[derive(Debug, Clone, Default)]
pub struct AudioBuffer {
    /// Sample data; outer Vec is channels, inner Vec is samples.
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Silent buffer with the given length per channel.
    pub fn new(num_samples: usize, layout: ChannelLayout, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0; num_samples]; layout.num_channels()],
            sample_rate,
        }
    }

    /// Build from interleaved data (L, R, L, R, ... for stereo).
    pub fn from_interleaved(
        interleaved: &[f32],
        layout: ChannelLayout,
        sample_rate: u32,
    ) -> Result<Self> {
        let num_channels = layout.num_channels();
        if interleaved.len() % num_channels != 0 {
            return Err(DeckFxError::InvalidAudio {
                reason: format!(
                    "interleaved length {} not divisible by {} channels",
                    interleaved.len(),
                    num_channels
                ),
            });
        }

        let mut samples = vec![Vec::with_capacity(interleaved.len() / num_channels); num_channels];
        for frame in interleaved.chunks_exact(num_channels) {
            for (channel, &sample) in samples.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Flatten to interleaved order.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_samples = self.num_samples();
        let mut interleaved = Vec::with_capacity(num_samples * self.num_channels());
        for i in 0..num_samples {
            for channel in &self.samples {
                interleaved.push(channel[i]);
            }
        }
        interleaved
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Samples per channel.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }

    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples() as f64 / self.sample_rate as f64
    }

    /// One channel's samples. Panics if the index is out of bounds.
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// RMS level across all channels in dBFS. `-inf` for silence.
    pub fn rms_db(&self) -> f32 {
        let total = self.num_channels() * self.num_samples();
        if total == 0 {
            return f32::NEG_INFINITY;
        }
        let sum_squares: f64 = self
            .samples
            .iter()
            .flatten()
            .map(|&s| s as f64 * s as f64)
            .sum();
        linear_to_db((sum_squares / total as f64).sqrt() as f32)
    }

    /// Peak level across all channels in dBFS. `-inf` for silence.
    pub fn peak_db(&self) -> f32 {
        let peak = self
            .samples
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0_f32, f32::max);
        linear_to_db(peak)
    }

    /// True when every sample is finite (no NaN/Inf).
    pub fn is_finite(&self) -> bool {
        self.samples.iter().flatten().all(|s| s.is_finite())
    }
}
