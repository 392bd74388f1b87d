//! Cascaded Butterworth-style filter
//!
//! Three identical biquad sections in series for a steeper rolloff than a
//! single section (roughly 3rd-order behavior). All stages share one
//! coefficient set from the bilinear-transform design in
//! [`BiquadCoeffs::bilinear`] — not the RBJ design, which differs numerically
//! at equal parameters.

use super::biquad::{BiquadCoeffs, BiquadState, FilterType};

const MIN_CUTOFF_HZ: f32 = 20.0;
const MAX_CUTOFF_HZ: f32 = 20_000.0;
const MIN_Q: f32 = 0.1;
const MAX_Q: f32 = 10.0;

const NUM_STAGES: usize = 3;

/// Three-stage cascaded IIR filter with internally clamped parameters.
#[derive(Debug, Clone)]
pub struct CascadedFilter {
    sample_rate: f32,
    cutoff: f32,
    q: f32,
    filter_type: FilterType,
    coeffs: BiquadCoeffs,
    stages: [BiquadState; NUM_STAGES],
}

impl Default for CascadedFilter {
    fn default() -> Self {
        Self::new(FilterType::Lowpass)
    }
}

impl CascadedFilter {
    pub fn new(filter_type: FilterType) -> Self {
        let mut filter = Self {
            sample_rate: 44100.0,
            cutoff: 1000.0,
            q: 0.707,
            filter_type,
            coeffs: BiquadCoeffs::default(),
            stages: [BiquadState::default(); NUM_STAGES],
        };
        filter.update_coefficients();
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.update_coefficients();
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
        self.update_coefficients();
    }

    /// Set the corner frequency in Hz (clamped to 20-20000).
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        self.update_coefficients();
    }

    /// Set the resonance (clamped to 0.1-10).
    pub fn set_resonance(&mut self, q: f32) {
        self.q = q.clamp(MIN_Q, MAX_Q);
        self.update_coefficients();
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn resonance(&self) -> f32 {
        self.q
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    fn update_coefficients(&mut self) {
        // Keep the shared corner below Nyquist even for low sample rates
        let cutoff = self.cutoff.min(self.sample_rate * 0.49);
        self.coeffs = BiquadCoeffs::bilinear(self.filter_type, self.sample_rate, cutoff, self.q);
    }

    /// Run one sample through all three stages in series.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sample = input;
        for stage in &mut self.stages {
            sample = stage.process(sample, &self.coeffs);
        }
        sample
    }

    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}
