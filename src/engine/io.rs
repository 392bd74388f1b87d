//! WAV import and export
//!
//! Offline file I/O for the CLI and tests. Reads 16-bit PCM and 32-bit
//! float WAV (mono or stereo), writes 16-bit PCM. The buffer keeps the
//! file's sample rate; the processor is prepared at that rate, so no
//! resampling happens anywhere.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{DeckFxError, Result};

/// Read a WAV file into a planar buffer.
pub fn import_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    let layout = ChannelLayout::from_count(spec.channels as usize).ok_or_else(|| {
        DeckFxError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono/stereo supported)", spec.channels),
        }
    })?;

    let interleaved = read_samples_as_f32(reader, &spec)?;
    if interleaved.is_empty() {
        return Err(DeckFxError::EmptyAudio);
    }

    debug!(
        "Imported {} ({} Hz, {} ch, {} frames)",
        path.display(),
        spec.sample_rate,
        spec.channels,
        interleaved.len() / spec.channels as usize
    );

    AudioBuffer::from_interleaved(&interleaved, layout, spec.sample_rate)
}

/// Write a buffer to a 16-bit PCM WAV file.
pub fn export_wav(path: &Path, buffer: &AudioBuffer) -> Result<()> {
    if buffer.is_empty() {
        return Err(DeckFxError::EmptyAudio);
    }
    if ChannelLayout::from_count(buffer.num_channels()).is_none() {
        return Err(DeckFxError::UnsupportedFormat {
            format: format!("{}-channel buffer", buffer.num_channels()),
        });
    }

    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in buffer.to_interleaved() {
        let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(scaled)?;
    }
    writer.finalize()?;

    debug!("Exported {} ({} frames)", path.display(), buffer.num_samples());
    Ok(())
}

fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    spec: &WavSpec,
) -> Result<Vec<f32>> {
    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(DeckFxError::from),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(DeckFxError::from),
        (format, bits) => Err(DeckFxError::UnsupportedFormat {
            format: format!("{}-bit {:?} WAV", bits, format),
        }),
    }
}

/// Mono sine tone, for tests and demos.
pub fn sine_tone(frequency: f32, duration_secs: f32, sample_rate: u32) -> AudioBuffer {
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Mono, sample_rate);

    let step = std::f32::consts::TAU * frequency / sample_rate as f32;
    for (i, sample) in buffer.channel_mut(0).iter_mut().enumerate() {
        *sample = (step * i as f32).sin();
    }
    buffer
}

/// Stereo sine tone with independent frequencies per channel.
pub fn stereo_sine_tone(
    freq_left: f32,
    freq_right: f32,
    duration_secs: f32,
    sample_rate: u32,
) -> AudioBuffer {
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Stereo, sample_rate);

    for (channel, frequency) in [(0, freq_left), (1, freq_right)] {
        let step = std::f32::consts::TAU * frequency / sample_rate as f32;
        for (i, sample) in buffer.channel_mut(channel).iter_mut().enumerate() {
            *sample = (step * i as f32).sin();
        }
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sine_tone_properties() {
        let buffer = sine_tone(440.0, 0.5, 48000);
        assert_eq!(buffer.num_channels(), 1);
        assert_eq!(buffer.num_samples(), 24000);
        assert_eq!(buffer.sample_rate, 48000);
        // Full-scale sine sits near -3 dBFS RMS
        assert!((buffer.rms_db() - (-3.01)).abs() < 0.1);
    }

    #[test]
    fn test_stereo_tone_channels_differ() {
        let buffer = stereo_sine_tone(440.0, 880.0, 0.2, 48000);
        assert_eq!(buffer.num_channels(), 2);
        assert!((buffer.channel(0)[100] - buffer.channel(1)[100]).abs() > 0.01);
    }

    #[test]
    fn test_wav_round_trip_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");

        let original = sine_tone(440.0, 0.25, 44100);
        export_wav(&path, &original).unwrap();
        let imported = import_wav(&path).unwrap();

        assert_eq!(imported.num_channels(), 1);
        assert_eq!(imported.num_samples(), original.num_samples());
        assert_eq!(imported.sample_rate, 44100);

        // 16-bit quantization error stays small
        for (a, b) in original.channel(0).iter().zip(imported.channel(0)) {
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_wav_round_trip_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let original = stereo_sine_tone(220.0, 550.0, 0.25, 48000);
        export_wav(&path, &original).unwrap();
        let imported = import_wav(&path).unwrap();

        assert_eq!(imported.num_channels(), 2);
        for ch in 0..2 {
            for (a, b) in original.channel(ch).iter().zip(imported.channel(ch)) {
                assert!((a - b).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_import_missing_file_fails() {
        let result = import_wav(Path::new("/nonexistent/audio.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_export_empty_buffer_fails() {
        let dir = tempdir().unwrap();
        let buffer = AudioBuffer::default();
        let result = export_wav(&dir.path().join("empty.wav"), &buffer);
        assert!(matches!(result, Err(DeckFxError::EmptyAudio)));
    }
}
