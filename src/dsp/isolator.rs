//! Two-band isolator
//!
//! DJ-mixer style kill filter: one position control sweeps from cutting
//! highs (hard left) through a true bypass at center to cutting lows (hard
//! right). Internally a lowpass and a highpass [`CascadedFilter`] share a
//! corner frequency mapped logarithmically from the position.

use super::biquad::FilterType;
use super::cascade::CascadedFilter;

/// Positions closer to center than this are treated as exact bypass.
const BYPASS_EPSILON: f32 = 0.01;

/// Corner frequency at position extremes: 1000 * 10^p spans 100 Hz-10 kHz.
const CENTER_FREQ_HZ: f32 = 1000.0;

const MIN_Q: f32 = 0.5;
const MAX_Q: f32 = 10.0;

/// Crossfaded lowpass/highpass pair driven by a single position control.
///
/// Only the filter selected by the position sign is advanced per sample;
/// the idle filter keeps its last state until the position crosses center.
#[derive(Debug, Clone)]
pub struct Isolator {
    position: f32,
    q: f32,
    lowpass: CascadedFilter,
    highpass: CascadedFilter,
}

impl Default for Isolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Isolator {
    pub fn new() -> Self {
        let mut isolator = Self {
            position: 0.0,
            q: 0.707,
            lowpass: CascadedFilter::new(FilterType::Lowpass),
            highpass: CascadedFilter::new(FilterType::Highpass),
        };
        isolator.retune();
        isolator
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lowpass.set_sample_rate(sample_rate);
        self.highpass.set_sample_rate(sample_rate);
    }

    /// Set the band position (clamped to [-1, 1]): negative favors lows,
    /// positive favors highs, zero is bypass.
    pub fn set_position(&mut self, position: f32) {
        self.position = position.clamp(-1.0, 1.0);
        self.retune();
    }

    /// Set the filter sharpness (clamped to [0.5, 10]).
    pub fn set_q(&mut self, q: f32) {
        self.q = q.clamp(MIN_Q, MAX_Q);
        self.retune();
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    /// Push the shared corner frequency and Q into both filters. Runs at
    /// setter time so the per-sample path does no coefficient work.
    fn retune(&mut self) {
        let freq = CENTER_FREQ_HZ * 10.0_f32.powf(self.position);
        self.lowpass.set_cutoff(freq);
        self.lowpass.set_resonance(self.q);
        self.highpass.set_cutoff(freq);
        self.highpass.set_resonance(self.q);
    }

    /// Process one sample: route through the active filter and crossfade
    /// with the dry signal by the position magnitude.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let amount = self.position.abs();
        if amount < BYPASS_EPSILON {
            return input;
        }

        let filtered = if self.position < 0.0 {
            self.lowpass.process(input)
        } else {
            self.highpass.process(input)
        };

        input * (1.0 - amount) + filtered * amount
    }

    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;
    use test_case::test_case;

    #[test_case(0.5)]
    #[test_case(2.0)]
    #[test_case(10.0)]
    fn test_center_is_exact_bypass(q: f32) {
        let mut isolator = Isolator::new();
        isolator.set_q(q);
        isolator.set_position(0.0);

        for i in 0..1000 {
            let x = (i as f32 * 0.37).sin();
            assert_eq!(isolator.process(x), x);
        }
    }

    #[test]
    fn test_near_center_is_bypass() {
        let mut isolator = Isolator::new();
        isolator.set_position(0.009);
        assert_eq!(isolator.process(0.5), 0.5);

        isolator.set_position(-0.009);
        assert_eq!(isolator.process(0.5), 0.5);
    }

    #[test]
    fn test_position_clamped() {
        let mut isolator = Isolator::new();
        isolator.set_position(-3.0);
        assert_eq!(isolator.position(), -1.0);
        isolator.set_position(3.0);
        assert_eq!(isolator.position(), 1.0);
    }

    #[test]
    fn test_q_clamped() {
        let mut isolator = Isolator::new();
        isolator.set_q(0.0);
        assert_eq!(isolator.q(), 0.5);
        isolator.set_q(50.0);
        assert_eq!(isolator.q(), 10.0);
    }

    /// Peak of the isolator output for a settled sine.
    fn settled_peak(isolator: &mut Isolator, freq: f32, sample_rate: f32) -> f32 {
        let mut peak = 0.0f32;
        for i in 0..8000 {
            let x = (TAU * freq * i as f32 / sample_rate).sin();
            let y = isolator.process(x);
            if i >= 4000 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn test_full_left_cuts_highs() {
        let sample_rate = 44100.0;
        let mut isolator = Isolator::new();
        isolator.set_sample_rate(sample_rate);
        isolator.set_position(-1.0); // corner at 100 Hz, lowpass path

        let lows = settled_peak(&mut isolator, 50.0, sample_rate);
        isolator.reset();
        let highs = settled_peak(&mut isolator, 5000.0, sample_rate);

        assert!(lows > 0.7, "lows attenuated too much: {}", lows);
        assert!(highs < 0.1, "highs leaked through: {}", highs);
    }

    #[test]
    fn test_full_right_cuts_lows() {
        let sample_rate = 44100.0;
        let mut isolator = Isolator::new();
        isolator.set_sample_rate(sample_rate);
        isolator.set_position(1.0); // corner at 10 kHz, highpass path

        let lows = settled_peak(&mut isolator, 100.0, sample_rate);
        isolator.reset();
        let highs = settled_peak(&mut isolator, 15_000.0, sample_rate);

        assert!(lows < 0.1, "lows leaked through: {}", lows);
        assert!(highs > 0.7, "highs attenuated too much: {}", highs);
    }

    #[test]
    fn test_partial_position_crossfades() {
        // At half position, at most half the signal is filtered away
        let sample_rate = 44100.0;
        let mut isolator = Isolator::new();
        isolator.set_sample_rate(sample_rate);
        isolator.set_position(0.5);

        let lows = settled_peak(&mut isolator, 100.0, sample_rate);
        assert!(lows > 0.45, "dry portion missing: {}", lows);
    }
}
