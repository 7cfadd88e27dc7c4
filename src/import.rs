//! Long-recording importer
//!
//! Turns one long recording (e.g. a phone voice memo of the wake word said
//! repeatedly with pauses) into individual positive samples: convert to the
//! fixed format, split at silence boundaries, drop segments outside the
//! plausible single-utterance duration range, renumber survivors.

use std::path::Path;

use crate::store::{SampleCategory, SampleStore};
use crate::{Error, Result, convert};

/// Filename prefix for imported real samples
pub const IMPORT_PREFIX: &str = "real";

/// Segments shorter than this are treated as noise
pub const MIN_CLIP_SECS: f32 = 0.3;

/// Segments longer than this are treated as multiple utterances
pub const MAX_CLIP_SECS: f32 = 3.0;

/// Whether a segment duration is plausible for a single utterance
#[must_use]
pub fn keep_duration(secs: f32) -> bool {
    (MIN_CLIP_SECS..=MAX_CLIP_SECS).contains(&secs)
}

/// Import one recording, returning the number of samples extracted
///
/// Splitting happens in a scratch directory; only surviving segments are
/// copied into the store, numbered after the pre-existing `real_*.wav` files.
///
/// # Errors
///
/// Any external tool failure aborts the whole import. Returns
/// [`Error::NotFound`] if the input file does not exist.
pub async fn import_recording(store: &SampleStore, input: &Path) -> Result<usize> {
    if !input.exists() {
        return Err(Error::NotFound(input.display().to_string()));
    }
    convert::ensure_available()?;

    let target_dir = store.ensure_dir(SampleCategory::Positive)?;
    let start = store.count_existing(SampleCategory::Positive, IMPORT_PREFIX)?;

    println!("processing: {}", input.display());
    tracing::info!(input = %input.display(), start, "importing recording");

    let scratch = tempfile::tempdir()?;

    // Whole recording in the fixed format
    let full = scratch.path().join("full.wav");
    println!("  converting to 16kHz mono WAV...");
    convert::to_pcm(input, &full).await?;

    // One file per detected segment
    println!("  splitting on silence...");
    let template = scratch.path().join("segment.wav");
    convert::split_on_silence(&full, &template).await?;

    let mut segments: Vec<_> = std::fs::read_dir(scratch.path())?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("segment") && n.ends_with(".wav") && n != "segment.wav")
        })
        .collect();
    segments.sort();

    let mut kept = 0;
    for segment in &segments {
        let duration = convert::duration_secs(segment).await?;
        if !keep_duration(duration) {
            tracing::debug!(segment = %segment.display(), duration, "segment outside duration bounds, dropping");
            continue;
        }

        let destination = store.sample_path(SampleCategory::Positive, IMPORT_PREFIX, start + kept);
        std::fs::copy(segment, &destination)?;
        kept += 1;
    }

    println!("  extracted {kept} samples into {}/", target_dir.display());
    tracing::info!(kept, dropped = segments.len() - kept, "import complete");

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bounds_are_inclusive() {
        assert!(keep_duration(MIN_CLIP_SECS));
        assert!(keep_duration(MAX_CLIP_SECS));
        assert!(keep_duration(1.2));
    }

    #[test]
    fn noise_and_multi_word_segments_are_dropped() {
        assert!(!keep_duration(0.05));
        assert!(!keep_duration(0.29));
        assert!(!keep_duration(3.01));
        assert!(!keep_duration(10.0));
    }

    #[tokio::test]
    async fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path().join("samples"));

        let result = import_recording(&store, Path::new("/no/such/recording.m4a")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
