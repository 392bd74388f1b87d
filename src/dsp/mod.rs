//! DSP effects
//!
//! Per-sample mono effects for the DeckFX chain. Each effect processes one
//! `f32` sample at a time and keeps its own state; stereo processing is two
//! independent instances driven by the same parameter values.

mod biquad;
mod cascade;
mod delay;
mod flanger;
mod isolator;
mod limiter;
mod oscillator;
mod reverb;

pub use biquad::{BiquadFilter, FilterType};
pub use cascade::CascadedFilter;
pub use delay::DelayLine;
pub use flanger::Flanger;
pub use isolator::Isolator;
pub use limiter::{SoftLimiter, DEFAULT_THRESHOLD};
pub use oscillator::{Lfo, Waveform};
pub use reverb::Reverb;
