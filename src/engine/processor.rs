//! Stereo effect chain processor
//!
//! Owns one instance of every effect per channel plus the shared LFO, pulls
//! a [`ChainParams`] snapshot once per block, and pushes each sample through
//! the enabled effects in a fixed order:
//!
//! filter (cutoff modulated by the LFO) -> reverb -> delay -> flanger ->
//! isolator -> soft limiter.
//!
//! Disabled effects are skipped entirely and their state is untouched. The
//! block path never allocates; buffer sizing happens in [`FxProcessor::prepare`],
//! which must not run concurrently with processing.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, info};

use crate::dsp::{BiquadFilter, DelayLine, Flanger, Isolator, Lfo, Reverb, SoftLimiter};
use crate::engine::params::ChainParams;

/// Multiplier on the LFO excursion when modulating the filter cutoff.
/// At full LFO depth the cutoff swings between (1 - K) and (1 + K) times
/// its base value before the filter's own clamping.
pub const LFO_CUTOFF_MOD_DEPTH: f32 = 3.0;

/// Longest selectable delay time in seconds, matching the host parameter
/// range. Fixes the delay buffer size at prepare time.
const MAX_DELAY_SECS: f32 = 2.0;

/// One channel's worth of effects, processed in pipeline order.
#[derive(Debug, Clone)]
struct ChannelStrip {
    filter: BiquadFilter,
    reverb: Reverb,
    delay: DelayLine,
    flanger: Flanger,
    isolator: Isolator,
}

impl ChannelStrip {
    fn new() -> Self {
        Self {
            filter: BiquadFilter::new(),
            reverb: Reverb::new(),
            delay: DelayLine::new(MAX_DELAY_SECS),
            flanger: Flanger::new(),
            isolator: Isolator::new(),
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.filter.set_sample_rate(sample_rate);
        self.reverb.set_sample_rate(sample_rate);
        self.delay.set_sample_rate(sample_rate);
        self.flanger.set_sample_rate(sample_rate);
        self.isolator.set_sample_rate(sample_rate);
    }

    /// Run one sample through every enabled effect in pipeline order.
    #[inline]
    fn process(&mut self, input: f32, params: &ChainParams) -> f32 {
        let mut sample = input;
        if params.filter.enabled {
            sample = self.filter.process(sample);
        }
        if params.reverb.enabled {
            sample = self.reverb.process(sample);
        }
        if params.delay.enabled {
            sample = self.delay.process(sample);
        }
        if params.flanger.enabled {
            sample = self.flanger.process(sample);
        }
        if params.isolator.enabled {
            sample = self.isolator.process(sample);
        }
        sample
    }

    fn reset(&mut self) {
        self.filter.reset();
        self.reverb.reset();
        self.delay.reset();
        self.flanger.reset();
        self.isolator.reset();
    }
}

/// The DeckFX core: a stereo effect chain behind a prepare/process interface.
///
/// The host calls [`Self::prepare`] once with the sample rate (and again on
/// any rate change, with processing stopped), then [`Self::process_block`]
/// per audio callback. Left and right run through independent effect
/// instances; only the LFO is shared, so both channels see the same cutoff
/// modulation.
#[derive(Debug)]
pub struct FxProcessor {
    sample_rate: f32,
    lfo: Lfo,
    limiter: SoftLimiter,
    left: ChannelStrip,
    right: ChannelStrip,
    /// Most recent block's output RMS as f32 bits, readable from any thread.
    output_level: AtomicU32,
}

impl Default for FxProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FxProcessor {
    pub fn new() -> Self {
        Self {
            sample_rate: 44100.0,
            lfo: Lfo::new(),
            limiter: SoftLimiter::new(),
            left: ChannelStrip::new(),
            right: ChannelStrip::new(),
            output_level: AtomicU32::new(0),
        }
    }

    /// (Re)initialize every effect for a new sample rate and clear all state.
    ///
    /// Resizes delay buffers and recomputes filter coefficients, so it must
    /// never run concurrently with [`Self::process_block`] — callers stop
    /// audio first (quiescence contract).
    pub fn prepare(&mut self, sample_rate: f32) {
        let sample_rate = sample_rate.max(1.0);
        info!("Preparing effect chain at {} Hz", sample_rate);

        self.sample_rate = sample_rate;
        self.lfo.set_sample_rate(sample_rate);
        self.left.set_sample_rate(sample_rate);
        self.right.set_sample_rate(sample_rate);
        self.reset();
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Most recent block's output RMS in [0, 1]. Lock-free, callable from
    /// any thread (UI metering).
    pub fn output_level(&self) -> f32 {
        f32::from_bits(self.output_level.load(Ordering::Relaxed))
    }

    /// Clear every effect's state and restart the LFO.
    pub fn reset(&mut self) {
        debug!("Resetting effect chain state");
        self.lfo.reset();
        self.left.reset();
        self.right.reset();
        self.output_level.store(0, Ordering::Relaxed);
    }

    /// Push the block's parameter values into each enabled effect's setters.
    /// Disabled effects are left alone so their coefficients and buffers
    /// stay as they were.
    fn apply_params(&mut self, p: &ChainParams) {
        self.lfo.set_rate(p.lfo.rate);
        self.lfo.set_waveform(p.lfo.waveform);

        for strip in [&mut self.left, &mut self.right] {
            if p.filter.enabled {
                strip.filter.set_type(p.filter.filter_type);
                strip.filter.set_resonance(p.filter.resonance);
                strip.filter.set_cutoff(p.filter.cutoff);
            }
            if p.reverb.enabled {
                strip.reverb.set_room_size(p.reverb.room_size);
                strip.reverb.set_damping(p.reverb.damping);
                strip.reverb.set_wet_dry_mix(p.reverb.wet_dry);
            }
            if p.delay.enabled {
                strip.delay.set_delay_time(p.delay.time_secs);
                strip.delay.set_feedback(p.delay.feedback);
                strip.delay.set_wet_dry_mix(p.delay.wet_dry);
            }
            if p.flanger.enabled {
                strip.flanger.set_rate(p.flanger.rate);
                strip.flanger.set_depth(p.flanger.depth);
                strip.flanger.set_feedback(p.flanger.feedback);
                strip.flanger.set_wet_dry_mix(p.flanger.wet_dry);
            }
            if p.isolator.enabled {
                strip.isolator.set_position(p.isolator.position);
                strip.isolator.set_q(p.isolator.q);
            }
        }
    }

    /// Process one stereo block in place.
    ///
    /// Master bypass returns the buffers untouched. Otherwise parameters are
    /// applied once, then every sample runs through the enabled effects, the
    /// soft limiter (unconditionally), and the master dry/processed mix.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32], params: &ChainParams) {
        let num_samples = left.len().min(right.len());

        if params.master.bypass {
            self.update_meter(&left[..num_samples], &right[..num_samples]);
            return;
        }

        self.apply_params(params);

        // Cutoff modulation needs a coefficient recompute per sample; skip
        // the trigonometry entirely when the LFO cannot move the cutoff.
        let modulate_cutoff = params.filter.enabled && params.lfo.depth > 0.0;
        let mix = params.master.mix.clamp(0.0, 1.0);

        for i in 0..num_samples {
            let lfo_value = self.lfo.process();

            if modulate_cutoff {
                let cutoff = params.filter.cutoff
                    * (1.0 + lfo_value * params.lfo.depth * LFO_CUTOFF_MOD_DEPTH);
                self.left.filter.set_cutoff(cutoff);
                self.right.filter.set_cutoff(cutoff);
            }

            let dry_l = left[i];
            let dry_r = right[i];

            let wet_l = self.limiter.process(self.left.process(dry_l, params));
            let wet_r = self.limiter.process(self.right.process(dry_r, params));

            left[i] = dry_l * (1.0 - mix) + wet_l * mix;
            right[i] = dry_r * (1.0 - mix) + wet_r * mix;
        }

        self.update_meter(&left[..num_samples], &right[..num_samples]);
    }

    /// Store the block's RMS for [`Self::output_level`].
    fn update_meter(&self, left: &[f32], right: &[f32]) {
        let total = left.len() + right.len();
        if total == 0 {
            return;
        }

        let sum_squares: f32 = left
            .iter()
            .chain(right.iter())
            .map(|&sample| sample * sample)
            .sum();
        let rms = (sum_squares / total as f32).sqrt().clamp(0.0, 1.0);
        self.output_level.store(rms.to_bits(), Ordering::Relaxed);
    }
}
