//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use tracing::info;

use crate::engine::{export_wav, import_wav, ChainParams, FxProcessor};
use crate::error::Result;

/// Render a WAV file through the effect chain, block by block.
///
/// Mono input is duplicated to stereo before processing, since the chain is
/// a stereo pipeline; the output is then always stereo.
pub fn render(
    input: &Path,
    output: &Path,
    params_path: Option<&Path>,
    block_size: usize,
) -> Result<()> {
    let params = load_params(params_path)?;
    let block_size = block_size.max(1);

    let mut buffer = import_wav(input)?;
    info!(
        "Loaded {} ({:.2}s at {} Hz, peak {:.1} dBFS)",
        input.display(),
        buffer.duration_secs(),
        buffer.sample_rate,
        buffer.peak_db()
    );

    if buffer.num_channels() == 1 {
        let duplicate = buffer.samples[0].clone();
        buffer.samples.push(duplicate);
    }

    let mut processor = FxProcessor::new();
    processor.prepare(buffer.sample_rate as f32);

    let num_samples = buffer.num_samples();
    let (left, right) = buffer.samples.split_at_mut(1);
    let mut start = 0;
    while start < num_samples {
        let end = (start + block_size).min(num_samples);
        processor.process_block(&mut left[0][start..end], &mut right[0][start..end], &params);
        start = end;
    }

    info!(
        "Rendered {} samples, output peak {:.1} dBFS",
        num_samples,
        buffer.peak_db()
    );

    export_wav(output, &buffer)?;
    println!("Wrote {}", output.display());

    Ok(())
}

/// Print the default parameter snapshot as a JSON template.
pub fn params() -> Result<()> {
    let template = ChainParams::default();
    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

fn load_params(path: Option<&Path>) -> Result<ChainParams> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let params: ChainParams = serde_json::from_str(&text)?;
            params.validate()?;
            info!("Loaded parameters from {}", path.display());
            Ok(params)
        }
        None => Ok(ChainParams::default()),
    }
}
