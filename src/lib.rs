//! DeckFX - Real-time DJ-style audio effects core
//!
//! DeckFX is the signal-processing heart of a DJ effects rack: a set of
//! per-sample mono effects (oscillator, filters, delay, flanger, reverb,
//! two-band isolator) combined into a fixed stereo pipeline.
//!
//! # Architecture
//!
//! - [`dsp`]: the individual effects. Each is a mono per-sample processor;
//!   stereo is two independent instances driven by shared parameter values.
//! - [`engine`]: block-level orchestration — the parameter snapshot, the
//!   lock-free parameter store, the stereo [`engine::FxProcessor`], and
//!   offline WAV I/O for the CLI and tests.
//!
//! The host calls [`engine::FxProcessor::prepare`] once with the sample rate,
//! then [`engine::FxProcessor::process_block`] per audio callback with the
//! current parameter snapshot. Nothing in the block path allocates or blocks.

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use error::{DeckFxError, Result};
