//! Sample format and in-memory audio helpers

use std::path::Path;

use crate::{Error, Result};

pub mod capture;

pub use capture::{AudioCapture, list_input_devices};

/// Sample rate for all training samples (16kHz, required by microWakeWord)
pub const SAMPLE_RATE: u32 = 16000;

/// All samples are mono
pub const CHANNELS: u16 = 1;

/// Bit depth of the on-disk PCM format
pub const BITS_PER_SAMPLE: u16 = 16;

/// WAV spec for the fixed training sample format
#[must_use]
pub const fn wav_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode f32 samples as WAV bytes in the fixed sample format
///
/// # Errors
///
/// Returns error if WAV encoding fails
pub fn samples_to_wav(samples: &[f32]) -> Result<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, wav_spec())
            .map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            // Convert f32 [-1.0, 1.0] to i16
            #[allow(clippy::cast_possible_truncation)]
            let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// Write f32 samples to a WAV file in the fixed sample format
///
/// # Errors
///
/// Returns error if the file cannot be created or encoding fails
pub fn write_wav(path: &Path, samples: &[f32]) -> Result<()> {
    let mut writer =
        hound::WavWriter::create(path, wav_spec()).map_err(|e| Error::Audio(e.to_string()))?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| Error::Audio(e.to_string()))?;
    }

    writer.finalize().map_err(|e| Error::Audio(e.to_string()))
}

/// Calculate RMS energy of audio samples
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Trim leading and trailing audio below `threshold` amplitude, keeping
/// `padding` samples on each side of the detected non-silent region.
///
/// If nothing exceeds the threshold the input is returned untrimmed, so the
/// result never exceeds the originally captured range.
#[must_use]
pub fn trim_silence(samples: &[f32], threshold: f32, padding: usize) -> &[f32] {
    let Some(first) = samples.iter().position(|s| s.abs() > threshold) else {
        return samples;
    };
    let last = samples
        .iter()
        .rposition(|s| s.abs() > threshold)
        .unwrap_or(first);

    let start = first.saturating_sub(padding);
    let end = (last + 1 + padding).min(samples.len());
    &samples[start..end]
}

/// Duration in seconds of a sample buffer at the fixed sample rate
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_secs(samples: &[f32]) -> f32 {
    samples.len() as f32 / SAMPLE_RATE as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_silence_is_zero() {
        let silence = vec![0.0f32; 100];
        assert!(rms(&silence) < 0.001);

        let loud = vec![0.5f32; 100];
        assert!(rms(&loud) > 0.4);
    }

    #[test]
    fn rms_of_empty_is_zero() {
        assert!(rms(&[]).abs() < f32::EPSILON);
    }

    #[test]
    fn trim_keeps_all_silent_input() {
        let silence = vec![0.001f32; 1000];
        let trimmed = trim_silence(&silence, 0.01, 100);
        assert_eq!(trimmed.len(), silence.len());
    }

    #[test]
    fn trim_drops_leading_and_trailing_silence() {
        let mut samples = vec![0.0f32; 1000];
        samples[400] = 0.5;
        samples[500] = 0.5;

        let trimmed = trim_silence(&samples, 0.01, 0);
        assert_eq!(trimmed.len(), 101);
    }

    #[test]
    fn trim_retains_padding() {
        let mut samples = vec![0.0f32; 1000];
        samples[500] = 0.5;

        let trimmed = trim_silence(&samples, 0.01, 100);
        assert_eq!(trimmed.len(), 201);
    }

    #[test]
    fn trim_padding_clamped_to_input() {
        let mut samples = vec![0.0f32; 10];
        samples[0] = 0.5;
        samples[9] = 0.5;

        let trimmed = trim_silence(&samples, 0.01, 100);
        assert_eq!(trimmed.len(), samples.len());
    }

    #[test]
    fn wav_spec_is_fixed_format() {
        let spec = wav_spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.bits_per_sample, 16);
    }
}
