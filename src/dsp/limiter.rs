//! Soft limiter
//!
//! Saturating tanh stage that bounds the chain output just below its
//! threshold. Stateless; the last line of defense against runaway feedback,
//! so it runs on every processed sample.

/// Default output ceiling.
pub const DEFAULT_THRESHOLD: f32 = 0.95;

/// Scaled-tanh saturator: `y = tanh(x / threshold) * threshold`.
///
/// Output magnitude is strictly below the threshold for any finite input;
/// signals well under the threshold pass nearly unchanged.
#[derive(Debug, Clone, Copy)]
pub struct SoftLimiter {
    threshold: f32,
}

impl Default for SoftLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftLimiter {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Limiter with a custom ceiling (clamped to (0, 1]).
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(1e-3, 1.0),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        (input / self.threshold).tanh() * self.threshold
    }
}
