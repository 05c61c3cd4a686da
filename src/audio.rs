//! Audio file decoding.
//!
//! Boundary to the hound WAV decoder: reads a file once, normalizes integer
//! sample formats to [-1.0, 1.0] and averages multi-channel audio down to
//! mono. The wavetable model only ever sees the resulting flat f64 buffer.

use anyhow::anyhow;
use std::path::Path;

/// A decoded audio file: mono samples plus the source sample rate.
pub struct DecodedAudio {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Decodes a WAV file into a mono f64 sample buffer.
///
/// Integer samples are scaled by the format's full-scale value; float samples
/// pass through unchanged. Multi-channel files are mixed to mono by averaging
/// each sample frame across channels.
///
/// # Errors
/// - If the file cannot be opened or is not a readable WAV file
/// - If sample data is truncated or corrupt
pub fn decode_wav(path: &Path) -> Result<DecodedAudio, anyhow::Error> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| anyhow!("Failed to open audio file '{}': {e}", path.display()))?;
    let spec = reader.spec();

    tracing::debug!(
        "Decoding '{}': {} Hz, {} channel(s), {} bits, {:?}",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|sample| sample.map(|v| v as f64))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|v| v as f64 / full_scale))
                .collect::<Result<_, _>>()?
        }
    };

    let samples = mix_to_mono(interleaved, spec.channels as usize);

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Averages interleaved channel data down to a single mono channel.
fn mix_to_mono(interleaved: Vec<f64>, channels: usize) -> Vec<f64> {
    if channels <= 1 {
        return interleaved;
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}
