//! Audio helper integration tests
//!
//! Tests sample-format and trimming behavior without audio hardware.

use std::io::Cursor;

use wakeforge::SAMPLE_RATE;
use wakeforge::audio::{duration_secs, rms, samples_to_wav, trim_silence, write_wav};

mod common;

use common::{generate_sine_samples, generate_silence};

#[test]
fn test_samples_to_wav_header() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = samples_to_wav(&samples).unwrap();

    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");
    assert!(wav_data.len() > 44); // WAV header is 44 bytes
}

#[test]
fn test_wav_is_fixed_format() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = samples_to_wav(&samples).unwrap();

    let reader = hound::WavReader::new(Cursor::new(wav_data)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
}

#[test]
fn test_wav_roundtrip() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = samples_to_wav(&original_samples).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(wav_data)).unwrap();
    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
}

#[test]
fn test_write_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("take.wav");

    let samples = generate_sine_samples(440.0, 0.25, 0.5);
    write_wav(&path, &samples).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
    assert_eq!(reader.len() as usize, samples.len());
}

#[test]
fn test_trim_never_exceeds_captured_duration() {
    // Silence, speech, silence - like a real take
    let mut take = generate_silence(0.5);
    take.extend(generate_sine_samples(440.0, 0.8, 0.3));
    take.extend(generate_silence(0.7));
    let captured = take.len();

    let trimmed = trim_silence(&take, 0.01, 1600);
    assert!(trimmed.len() <= captured);
    assert!(duration_secs(trimmed) <= duration_secs(&take));
}

#[test]
fn test_trim_retains_padding_around_speech() {
    let mut take = generate_silence(0.5);
    take.extend(generate_sine_samples(440.0, 0.5, 0.3));
    take.extend(generate_silence(0.5));

    let speech_len = generate_sine_samples(440.0, 0.5, 0.3).len();
    let padding = 1600; // 0.1s

    let trimmed = trim_silence(&take, 0.01, padding);

    // Speech plus up to one padding span per side, and at least the speech
    // with some padding (the sine crosses the threshold almost immediately)
    assert!(trimmed.len() >= speech_len);
    assert!(trimmed.len() <= speech_len + 2 * padding);
}

#[test]
fn test_trim_of_pure_silence_keeps_input() {
    let take = generate_silence(1.0);
    let trimmed = trim_silence(&take, 0.01, 1600);
    assert_eq!(trimmed.len(), take.len());
}

#[test]
fn test_rms_distinguishes_silence_from_speech() {
    assert!(rms(&generate_silence(0.2)) < 0.001);
    assert!(rms(&generate_sine_samples(440.0, 0.2, 0.3)) > 0.1);
}
