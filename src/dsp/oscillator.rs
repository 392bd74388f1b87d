//! Low-frequency oscillator
//!
//! Phase-accumulator oscillator used as the modulation source for the filter
//! cutoff. Output is in [-1, 1] for every waveform.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Oscillator waveform selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Decode a waveform index as published by a control surface.
    /// Unknown indices fall back to `Sine`.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Waveform::Sine,
            1 => Waveform::Square,
            2 => Waveform::Triangle,
            3 => Waveform::Sawtooth,
            _ => Waveform::Sine,
        }
    }

    /// Index used when publishing this waveform through an atomic store.
    pub fn index(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Triangle => 2,
            Waveform::Sawtooth => 3,
        }
    }
}

/// Low-frequency oscillator with a phase accumulator in [0, 1).
///
/// Negative rates are clamped to zero so the phase only ever advances
/// forward; the rate is a modulation speed, not a signed frequency.
#[derive(Debug, Clone)]
pub struct Lfo {
    phase: f32,
    rate: f32,
    sample_rate: f32,
    waveform: Waveform,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Lfo {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            rate: 1.0,
            sample_rate: 44100.0,
            waveform: Waveform::Sine,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
    }

    /// Set the oscillation rate in Hz (clamped to >= 0).
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = rate_hz.max(0.0);
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current phase in [0, 1), exposed for tests and visualization.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return the waveform value at the current phase, then advance.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let output = match self.waveform {
            Waveform::Sine => (self.phase * TAU).sin(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            // Round-to-nearest via floor(phase + 0.5)
            Waveform::Triangle => {
                2.0 * (2.0 * (self.phase - (self.phase + 0.5).floor())).abs() - 1.0
            }
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
        };

        self.phase = (self.phase + self.rate / self.sample_rate).fract();

        output
    }

    /// Restart the cycle from phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
