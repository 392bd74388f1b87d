//! Parameter snapshot and lock-free parameter store
//!
//! [`ChainParams`] is the flat, host-visible parameter set: a plain value
//! struct the audio thread receives once per block. [`SharedParams`] is the
//! control-thread hand-off — every scalar is an independent atomic, so the
//! UI can publish values while audio runs without locks or torn reads.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::dsp::{FilterType, Waveform};
use crate::error::{DeckFxError, Result};

/// Filter section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub enabled: bool,
    /// Corner frequency in Hz.
    pub cutoff: f32,
    /// Resonance (Q).
    pub resonance: f32,
    pub filter_type: FilterType,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            enabled: true,
            cutoff: 1000.0,
            resonance: 1.0,
            filter_type: FilterType::Lowpass,
        }
    }
}

/// Reverb section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverbParams {
    pub enabled: bool,
    pub room_size: f32,
    pub damping: f32,
    pub wet_dry: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            enabled: false,
            room_size: 0.5,
            damping: 0.5,
            wet_dry: 0.3,
        }
    }
}

/// Delay section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayParams {
    pub enabled: bool,
    /// Delay time in seconds.
    pub time_secs: f32,
    pub feedback: f32,
    pub wet_dry: f32,
}

impl Default for DelayParams {
    fn default() -> Self {
        Self {
            enabled: false,
            time_secs: 0.5,
            feedback: 0.3,
            wet_dry: 0.5,
        }
    }
}

/// Flanger section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlangerParams {
    pub enabled: bool,
    /// Sweep rate in Hz.
    pub rate: f32,
    pub depth: f32,
    pub feedback: f32,
    pub wet_dry: f32,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            enabled: false,
            rate: 0.5,
            depth: 0.5,
            feedback: 0.5,
            wet_dry: 0.5,
        }
    }
}

/// Isolator section parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsolatorParams {
    pub enabled: bool,
    /// Band position in [-1, 1]: negative favors lows, zero is bypass.
    pub position: f32,
    pub q: f32,
}

impl Default for IsolatorParams {
    fn default() -> Self {
        Self {
            enabled: false,
            position: 0.0,
            q: 0.707,
        }
    }
}

/// Shared LFO parameters (one LFO modulates the filter cutoff on both
/// channels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LfoParams {
    /// Modulation rate in Hz.
    pub rate: f32,
    /// How far the LFO swings the filter cutoff, 0 disables modulation.
    pub depth: f32,
    pub waveform: Waveform,
}

impl Default for LfoParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            depth: 0.0,
            waveform: Waveform::Sine,
        }
    }
}

/// Master output parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasterParams {
    /// Dry/processed crossfade applied after the whole pipeline.
    pub mix: f32,
    /// When set, the block is returned untouched.
    pub bypass: bool,
}

impl Default for MasterParams {
    fn default() -> Self {
        Self {
            mix: 1.0,
            bypass: false,
        }
    }
}

/// The complete host-visible parameter set, read once per audio block.
///
/// Serializes to JSON so a host shell (or the CLI) can persist and restore
/// the whole snapshot. The DSP layer clamps everything it receives, so a
/// snapshot with out-of-range values degrades gracefully; [`Self::validate`]
/// is the stricter edge-layer check for values arriving from files or UIs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    pub filter: FilterParams,
    pub reverb: ReverbParams,
    pub delay: DelayParams,
    pub flanger: FlangerParams,
    pub isolator: IsolatorParams,
    pub lfo: LfoParams,
    pub master: MasterParams,
}

fn check_range(param: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(DeckFxError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            expected: format!("{}..{}", min, max),
        });
    }
    Ok(())
}

impl ChainParams {
    /// Check every field against its host-visible range.
    ///
    /// Ranges follow the plugin's parameter registration; the DSP setters
    /// clamp more defensively, so passing an unvalidated snapshot to the
    /// processor is safe but may not do what the caller expects.
    pub fn validate(&self) -> Result<()> {
        check_range("filter.cutoff", self.filter.cutoff, 20.0, 20_000.0)?;
        check_range("filter.resonance", self.filter.resonance, 0.1, 10.0)?;

        check_range("reverb.room_size", self.reverb.room_size, 0.0, 1.0)?;
        check_range("reverb.damping", self.reverb.damping, 0.0, 1.0)?;
        check_range("reverb.wet_dry", self.reverb.wet_dry, 0.0, 1.0)?;

        check_range("delay.time_secs", self.delay.time_secs, 0.0, 2.0)?;
        check_range("delay.feedback", self.delay.feedback, 0.0, 0.95)?;
        check_range("delay.wet_dry", self.delay.wet_dry, 0.0, 1.0)?;

        check_range("flanger.rate", self.flanger.rate, 0.1, 10.0)?;
        check_range("flanger.depth", self.flanger.depth, 0.0, 1.0)?;
        check_range("flanger.feedback", self.flanger.feedback, 0.0, 0.95)?;
        check_range("flanger.wet_dry", self.flanger.wet_dry, 0.0, 1.0)?;

        check_range("isolator.position", self.isolator.position, -1.0, 1.0)?;
        check_range("isolator.q", self.isolator.q, 0.5, 10.0)?;

        check_range("lfo.rate", self.lfo.rate, 0.1, 20.0)?;
        check_range("lfo.depth", self.lfo.depth, 0.0, 1.0)?;

        check_range("master.mix", self.master.mix, 0.0, 1.0)?;

        Ok(())
    }
}

/// Lock-free control-thread / audio-thread parameter hand-off.
///
/// Floats are stored as `AtomicU32` bit patterns, enums as checked `AtomicU8`
/// indices. All accesses are relaxed: each scalar is independently atomic and
/// the audio thread reads a fresh snapshot at the top of every block, so no
/// ordering between fields is required.
#[derive(Debug, Default)]
pub struct SharedParams {
    filter_enabled: AtomicBool,
    filter_cutoff: AtomicU32,
    filter_resonance: AtomicU32,
    filter_type: AtomicU8,

    reverb_enabled: AtomicBool,
    reverb_room_size: AtomicU32,
    reverb_damping: AtomicU32,
    reverb_wet_dry: AtomicU32,

    delay_enabled: AtomicBool,
    delay_time_secs: AtomicU32,
    delay_feedback: AtomicU32,
    delay_wet_dry: AtomicU32,

    flanger_enabled: AtomicBool,
    flanger_rate: AtomicU32,
    flanger_depth: AtomicU32,
    flanger_feedback: AtomicU32,
    flanger_wet_dry: AtomicU32,

    isolator_enabled: AtomicBool,
    isolator_position: AtomicU32,
    isolator_q: AtomicU32,

    lfo_rate: AtomicU32,
    lfo_depth: AtomicU32,
    lfo_waveform: AtomicU8,

    master_mix: AtomicU32,
    master_bypass: AtomicBool,
}

#[inline]
fn store_f32(slot: &AtomicU32, value: f32) {
    slot.store(value.to_bits(), Ordering::Relaxed);
}

#[inline]
fn load_f32(slot: &AtomicU32) -> f32 {
    f32::from_bits(slot.load(Ordering::Relaxed))
}

impl SharedParams {
    /// Store initialized with a parameter snapshot.
    pub fn new(params: &ChainParams) -> Self {
        let shared = Self::default();
        shared.store(params);
        shared
    }

    /// Publish a whole snapshot. Callable from any thread.
    pub fn store(&self, p: &ChainParams) {
        self.filter_enabled
            .store(p.filter.enabled, Ordering::Relaxed);
        store_f32(&self.filter_cutoff, p.filter.cutoff);
        store_f32(&self.filter_resonance, p.filter.resonance);
        self.filter_type
            .store(p.filter.filter_type.index(), Ordering::Relaxed);

        self.reverb_enabled
            .store(p.reverb.enabled, Ordering::Relaxed);
        store_f32(&self.reverb_room_size, p.reverb.room_size);
        store_f32(&self.reverb_damping, p.reverb.damping);
        store_f32(&self.reverb_wet_dry, p.reverb.wet_dry);

        self.delay_enabled.store(p.delay.enabled, Ordering::Relaxed);
        store_f32(&self.delay_time_secs, p.delay.time_secs);
        store_f32(&self.delay_feedback, p.delay.feedback);
        store_f32(&self.delay_wet_dry, p.delay.wet_dry);

        self.flanger_enabled
            .store(p.flanger.enabled, Ordering::Relaxed);
        store_f32(&self.flanger_rate, p.flanger.rate);
        store_f32(&self.flanger_depth, p.flanger.depth);
        store_f32(&self.flanger_feedback, p.flanger.feedback);
        store_f32(&self.flanger_wet_dry, p.flanger.wet_dry);

        self.isolator_enabled
            .store(p.isolator.enabled, Ordering::Relaxed);
        store_f32(&self.isolator_position, p.isolator.position);
        store_f32(&self.isolator_q, p.isolator.q);

        store_f32(&self.lfo_rate, p.lfo.rate);
        store_f32(&self.lfo_depth, p.lfo.depth);
        self.lfo_waveform
            .store(p.lfo.waveform.index(), Ordering::Relaxed);

        store_f32(&self.master_mix, p.master.mix);
        self.master_bypass
            .store(p.master.bypass, Ordering::Relaxed);
    }

    /// Read every atomic into a plain snapshot. Called by the audio thread
    /// at the top of each block.
    pub fn snapshot(&self) -> ChainParams {
        ChainParams {
            filter: FilterParams {
                enabled: self.filter_enabled.load(Ordering::Relaxed),
                cutoff: load_f32(&self.filter_cutoff),
                resonance: load_f32(&self.filter_resonance),
                filter_type: FilterType::from_index(self.filter_type.load(Ordering::Relaxed)),
            },
            reverb: ReverbParams {
                enabled: self.reverb_enabled.load(Ordering::Relaxed),
                room_size: load_f32(&self.reverb_room_size),
                damping: load_f32(&self.reverb_damping),
                wet_dry: load_f32(&self.reverb_wet_dry),
            },
            delay: DelayParams {
                enabled: self.delay_enabled.load(Ordering::Relaxed),
                time_secs: load_f32(&self.delay_time_secs),
                feedback: load_f32(&self.delay_feedback),
                wet_dry: load_f32(&self.delay_wet_dry),
            },
            flanger: FlangerParams {
                enabled: self.flanger_enabled.load(Ordering::Relaxed),
                rate: load_f32(&self.flanger_rate),
                depth: load_f32(&self.flanger_depth),
                feedback: load_f32(&self.flanger_feedback),
                wet_dry: load_f32(&self.flanger_wet_dry),
            },
            isolator: IsolatorParams {
                enabled: self.isolator_enabled.load(Ordering::Relaxed),
                position: load_f32(&self.isolator_position),
                q: load_f32(&self.isolator_q),
            },
            lfo: LfoParams {
                rate: load_f32(&self.lfo_rate),
                depth: load_f32(&self.lfo_depth),
                waveform: Waveform::from_index(self.lfo_waveform.load(Ordering::Relaxed)),
            },
            master: MasterParams {
                mix: load_f32(&self.master_mix),
                bypass: self.master_bypass.load(Ordering::Relaxed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ChainParams::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_plugin_registration() {
        let p = ChainParams::default();
        assert!(p.filter.enabled);
        assert_eq!(p.filter.cutoff, 1000.0);
        assert_eq!(p.filter.filter_type, FilterType::Lowpass);
        assert!(!p.reverb.enabled);
        assert_eq!(p.reverb.wet_dry, 0.3);
        assert_eq!(p.delay.time_secs, 0.5);
        assert_eq!(p.lfo.depth, 0.0);
        assert_eq!(p.master.mix, 1.0);
        assert!(!p.master.bypass);
    }

    #[test]
    fn test_validate_rejects_out_of_range_cutoff() {
        let mut p = ChainParams::default();
        p.filter.cutoff = 50_000.0;
        let err = p.validate().unwrap_err();
        assert!(matches!(err, DeckFxError::InvalidParameter { ref param, .. } if param == "filter.cutoff"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut p = ChainParams::default();
        p.delay.feedback = f32::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excess_feedback() {
        let mut p = ChainParams::default();
        p.flanger.feedback = 0.99;
        let err = p.validate().unwrap_err();
        assert!(matches!(err, DeckFxError::InvalidParameter { ref param, .. } if param == "flanger.feedback"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut p = ChainParams::default();
        p.reverb.enabled = true;
        p.reverb.room_size = 0.8;
        p.filter.filter_type = FilterType::Bandpass;
        p.lfo.waveform = Waveform::Triangle;

        let json = serde_json::to_string(&p).unwrap();
        let back: ChainParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn test_json_enums_are_snake_case() {
        let json = serde_json::to_string(&ChainParams::default()).unwrap();
        assert!(json.contains("\"lowpass\""));
        assert!(json.contains("\"sine\""));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let p: ChainParams = serde_json::from_str(r#"{"delay": {"enabled": true, "time_secs": 0.25, "feedback": 0.4, "wet_dry": 0.6}}"#).unwrap();
        assert!(p.delay.enabled);
        assert_eq!(p.delay.time_secs, 0.25);
        assert_eq!(p.filter.cutoff, 1000.0);
    }

    #[test]
    fn test_shared_params_round_trip() {
        let mut p = ChainParams::default();
        p.filter.cutoff = 440.0;
        p.filter.filter_type = FilterType::Highpass;
        p.flanger.enabled = true;
        p.isolator.position = -0.5;
        p.lfo.waveform = Waveform::Sawtooth;
        p.master.bypass = true;

        let shared = SharedParams::new(&p);
        assert_eq!(shared.snapshot(), p);
    }

    #[test]
    fn test_shared_params_default_snapshot_is_zeroed() {
        // Default atomics decode to all-zero floats and Sine/Lowpass
        let snapshot = SharedParams::default().snapshot();
        assert_eq!(snapshot.filter.cutoff, 0.0);
        assert_eq!(snapshot.filter.filter_type, FilterType::Lowpass);
        assert_eq!(snapshot.lfo.waveform, Waveform::Sine);
    }
}
