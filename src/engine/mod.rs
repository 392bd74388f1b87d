//! Block-level orchestration
//!
//! Everything above the per-sample effects: the parameter snapshot and its
//! lock-free store, the stereo chain processor, and the offline audio
//! buffer / WAV I/O used by the CLI and tests.

pub mod buffer;
pub mod io;
pub mod params;
pub mod processor;

pub use buffer::{AudioBuffer, ChannelLayout};
pub use io::{export_wav, import_wav};
pub use params::{
    ChainParams, DelayParams, FilterParams, FlangerParams, IsolatorParams, LfoParams,
    MasterParams, ReverbParams, SharedParams,
};
pub use processor::{FxProcessor, LFO_CUTOFF_MOD_DEPTH};
