//! WAV encode/decode for [`AudioClip`].
//!
//! Clips are written as 16-bit integer PCM. Multi-channel input is mixed
//! down to mono by averaging, since the pipeline works on mono buffers.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::audio::AudioClip;
use crate::errors::AudioError;

/// Read a WAV file into a mono clip.
pub fn read_wav(path: &Path) -> Result<AudioClip, AudioError> {
    let mut reader = WavReader::open(path).map_err(|e| AudioError::Wav {
        path: path.to_path_buf(),
        source: e,
    })?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let mut interleaved = Vec::new();
    match spec.sample_format {
        SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                let value = sample.map_err(|e| AudioError::Wav {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                interleaved.push(value);
            }
        }
        SampleFormat::Int => {
            let max = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            for sample in reader.samples::<i32>() {
                let value = sample.map_err(|e| AudioError::Wav {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                interleaved.push(value as f32 / max);
            }
        }
    }

    let samples = if channels <= 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    Ok(AudioClip::new(samples, spec.sample_rate))
}

/// Write a clip as 16-bit PCM WAV.
pub fn write_wav(path: &Path, clip: &AudioClip) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let wav_err = |e| AudioError::Wav {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_err)?;
    for &sample in clip.samples() {
        let value = sample.clamp(-1.0, 1.0);
        let scaled = (value * f32::from(i16::MAX)).round() as i16;
        writer.write_sample(scaled).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
