//! Flanger
//!
//! Short modulated delay: an internal sine LFO sweeps the delay time between
//! 1 and 10 ms, scaled by the depth control. The read/write logic matches
//! [`super::DelayLine`] over a much smaller buffer.

use std::f32::consts::TAU;

const MIN_RATE_HZ: f32 = 0.1;
const MAX_RATE_HZ: f32 = 10.0;
const MAX_FEEDBACK: f32 = 0.95;

/// Shortest delay in the sweep, in milliseconds.
const BASE_DELAY_MS: f32 = 1.0;
/// Width of the sweep above the base delay at full depth, in milliseconds.
const SWEEP_RANGE_MS: f32 = 9.0;
/// Longest delay the buffer has to hold, in seconds.
const MAX_DELAY_SECS: f32 = 0.010;

/// Mono flanger with an internal sine LFO.
#[derive(Debug, Clone)]
pub struct Flanger {
    buffer: Vec<f32>,
    write_pos: usize,
    lfo_phase: f32,
    sample_rate: f32,
    rate: f32,
    depth: f32,
    feedback: f32,
    wet_dry: f32,
}

impl Default for Flanger {
    fn default() -> Self {
        Self::new()
    }
}

impl Flanger {
    pub fn new() -> Self {
        let mut flanger = Self {
            buffer: Vec::new(),
            write_pos: 0,
            lfo_phase: 0.0,
            sample_rate: 44100.0,
            rate: 0.5,
            depth: 0.5,
            feedback: 0.5,
            wet_dry: 0.5,
        };
        flanger.resize_buffer();
        flanger
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.resize_buffer();
    }

    /// Set the sweep rate in Hz (clamped to [0.1, 10]).
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
    }

    /// Set how far the LFO swings the delay time (clamped to [0, 1]).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    pub fn set_wet_dry_mix(&mut self, mix: f32) {
        self.wet_dry = mix.clamp(0.0, 1.0);
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    fn resize_buffer(&mut self) {
        // 10 ms plus headroom for the interpolation neighbor
        let size = (self.sample_rate * MAX_DELAY_SECS) as usize + 2;
        self.buffer.clear();
        self.buffer.resize(size, 0.0);
        self.write_pos = 0;
    }

    /// Process one sample, advancing the internal LFO.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.buffer.is_empty() {
            return input;
        }

        let lfo = (self.lfo_phase * TAU).sin();
        self.lfo_phase = (self.lfo_phase + self.rate / self.sample_rate).fract();

        let delay_ms = BASE_DELAY_MS + SWEEP_RANGE_MS * self.depth * (lfo * 0.5 + 0.5);
        let delay_samples = delay_ms * 0.001 * self.sample_rate;

        let size = self.buffer.len();
        self.buffer[self.write_pos] = input;

        let mut read_pos = self.write_pos as f32 - delay_samples;
        while read_pos < 0.0 {
            read_pos += size as f32;
        }

        let index = read_pos as usize % size;
        let next = (index + 1) % size;
        let frac = read_pos - read_pos.floor();
        let delayed = self.buffer[index] * (1.0 - frac) + self.buffer[next] * frac;

        self.buffer[self.write_pos] = input + delayed * self.feedback;
        self.write_pos = (self.write_pos + 1) % size;

        input * (1.0 - self.wet_dry) + delayed * self.wet_dry
    }

    /// Clear the buffer and restart the sweep.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.lfo_phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_depth_is_static_delay() {
        // With no sweep the flanger is a fixed 1 ms delay
        let sample_rate = 48000.0;
        let n = 48; // 1 ms at 48 kHz
        let mut flanger = Flanger::new();
        flanger.set_sample_rate(sample_rate);
        flanger.set_depth(0.0);
        flanger.set_feedback(0.0);
        flanger.set_wet_dry_mix(1.0);

        let mut output = Vec::new();
        for i in 0..(n * 3) {
            let x = if i == 0 { 1.0 } else { 0.0 };
            output.push(flanger.process(x));
        }

        assert!(
            (output[n] - 1.0).abs() < 1e-5,
            "expected impulse at {}, got {}",
            n,
            output[n]
        );
        for (i, &y) in output.iter().enumerate() {
            if i != n {
                assert!(y.abs() < 1e-5, "unexpected energy at {}: {}", i, y);
            }
        }
    }

    #[test]
    fn test_rate_clamped() {
        let mut flanger = Flanger::new();
        flanger.set_rate(0.0);
        assert_eq!(flanger.rate(), 0.1);
        flanger.set_rate(100.0);
        assert_eq!(flanger.rate(), 10.0);
    }

    #[test]
    fn test_depth_clamped() {
        let mut flanger = Flanger::new();
        flanger.set_depth(-0.5);
        assert_eq!(flanger.depth(), 0.0);
        flanger.set_depth(1.5);
        assert_eq!(flanger.depth(), 1.0);
    }

    #[test]
    fn test_output_bounded_at_full_settings() {
        let mut flanger = Flanger::new();
        flanger.set_sample_rate(44100.0);
        flanger.set_rate(10.0);
        flanger.set_depth(1.0);
        flanger.set_feedback(0.95);
        flanger.set_wet_dry_mix(1.0);

        for i in 0..100_000 {
            let x = (i as f32 * 0.1).sin();
            let y = flanger.process(x);
            assert!(y.is_finite());
            assert!(y.abs() < 50.0, "flanger blew up at {}: {}", i, y);
        }
    }

    #[test]
    fn test_dry_mix_passthrough() {
        let mut flanger = Flanger::new();
        flanger.set_wet_dry_mix(0.0);

        for x in [0.5, -0.25, 1.0] {
            assert_eq!(flanger.process(x), x);
        }
    }

    #[test]
    fn test_reset_clears_tail() {
        let mut flanger = Flanger::new();
        flanger.set_sample_rate(48000.0);
        flanger.set_depth(0.0);
        flanger.set_feedback(0.5);
        flanger.set_wet_dry_mix(1.0);
        flanger.process(1.0);

        flanger.reset();
        for _ in 0..1000 {
            assert_eq!(flanger.process(0.0), 0.0);
        }
    }
}
