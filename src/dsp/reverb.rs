//! Multi-tap reverb
//!
//! Eight parallel feedback delay lines, each with a one-pole damping lowpass
//! in its loop, summed and averaged. The tap lengths are approximately
//! mutually prime so the lines do not reinforce a common period.

/// Tap lengths in samples. These exact values are load-bearing for the
/// diffusion quality; do not round them off.
const TAP_LENGTHS: [usize; 8] = [1557, 1617, 1491, 1422, 1277, 1356, 1188, 1116];

/// Feedback gain at room_size = 1.0.
const FEEDBACK_SCALE: f32 = 0.5;

/// One feedback delay line with damping state.
#[derive(Debug, Clone)]
struct DampedTap {
    buffer: Vec<f32>,
    pos: usize,
    last_output: f32,
}

impl DampedTap {
    fn new(length: usize) -> Self {
        Self {
            buffer: vec![0.0; length],
            pos: 0,
            last_output: 0.0,
        }
    }

    /// Read the tap, damp it, write back input plus feedback, advance.
    #[inline]
    fn process(&mut self, input: f32, room_size: f32, damping: f32) -> f32 {
        let delayed = self.buffer[self.pos];

        // One-pole lowpass toward the fresh sample; damping = 1 leaves the
        // tap unfiltered, damping = 0 holds the previous output
        let damped = self.last_output + damping * (delayed - self.last_output);
        self.last_output = damped;

        self.buffer[self.pos] = input + damped * FEEDBACK_SCALE * room_size;
        self.pos = (self.pos + 1) % self.buffer.len();

        damped
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
        self.last_output = 0.0;
    }
}

/// Mono reverb built from eight damped feedback delay lines.
///
/// Tap lengths are fixed in samples, so a sample-rate change only clears the
/// lines; effective decay and diffusion time scale with the sample rate.
#[derive(Debug, Clone)]
pub struct Reverb {
    taps: Vec<DampedTap>,
    room_size: f32,
    damping: f32,
    wet_dry: f32,
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Reverb {
    pub fn new() -> Self {
        Self {
            taps: TAP_LENGTHS.iter().map(|&len| DampedTap::new(len)).collect(),
            room_size: 0.5,
            damping: 0.5,
            wet_dry: 0.3,
        }
    }

    /// Reinitialize for a new sample rate. The physical tap lengths do not
    /// change; only the accumulated state is dropped.
    pub fn set_sample_rate(&mut self, _sample_rate: f32) {
        self.reset();
    }

    /// Set the feedback amount (clamped to [0, 1]).
    pub fn set_room_size(&mut self, size: f32) {
        self.room_size = size.clamp(0.0, 1.0);
    }

    /// Set the high-frequency damping (clamped to [0, 1]).
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn set_wet_dry_mix(&mut self, mix: f32) {
        self.wet_dry = mix.clamp(0.0, 1.0);
    }

    pub fn room_size(&self) -> f32 {
        self.room_size
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn wet_dry_mix(&self) -> f32 {
        self.wet_dry
    }

    /// Process one sample through all eight lines and average.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sum = 0.0;
        for tap in &mut self.taps {
            sum += tap.process(input, self.room_size, self.damping);
        }
        let reverb_out = sum / self.taps.len() as f32;

        input * (1.0 - self.wet_dry) + reverb_out * self.wet_dry
    }

    /// Zero every line's buffer, position and damping state.
    pub fn reset(&mut self) {
        for tap in &mut self.taps {
            tap.clear();
        }
    }
}
