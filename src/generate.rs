//! Synthetic sample generation
//!
//! Batch loops over phrase/voice/rate combinations. Each combination is one
//! synthesizer invocation followed by one conversion to the fixed sample
//! format; a failed combination is logged and skipped.

use rand::seq::SliceRandom;

use crate::phrases::{NEGATIVE_PHRASES, NEGATIVE_RATES, PREFERRED_VOICES, RATES, WAKE_PHRASES};
use crate::store::{SampleCategory, SampleStore};
use crate::synth::SpeechSynth;
use crate::{Result, convert};

/// Filename prefix for synthetic positive samples
pub const POSITIVE_PREFIX: &str = "synthetic";

/// Filename prefix for synthetic negative samples
pub const NEGATIVE_PREFIX: &str = "negative";

/// Default number of positive samples to generate
pub const DEFAULT_TARGET: usize = 200;

/// Outcome of a batch generation run
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateReport {
    /// Samples successfully written
    pub produced: usize,
    /// Combinations that failed and were skipped
    pub failed: usize,
}

/// Generate synthetic positive samples until `target` new files exist
///
/// Iterates wake phrases, then voices, then rates, wrapping around until the
/// target is reached. Numbering continues from pre-existing files.
///
/// # Errors
///
/// Returns error if no synthesizer or converter is installed, or the output
/// directory cannot be prepared. Per-combination failures are skipped.
pub async fn positive(store: &SampleStore, target: usize) -> Result<GenerateReport> {
    convert::ensure_available()?;
    let synth = SpeechSynth::detect()?;
    let voices = synth.voices(PREFERRED_VOICES).await?;

    store.ensure_dir(SampleCategory::Positive)?;
    let start = store.count_existing(SampleCategory::Positive, POSITIVE_PREFIX)?;

    tracing::info!(target, voices = voices.len(), start, "generating positive samples");

    let mut report = GenerateReport::default();

    'outer: loop {
        let produced_before_pass = report.produced;
        for phrase in WAKE_PHRASES {
            for voice in &voices {
                for &rate in RATES {
                    if report.produced >= target {
                        break 'outer;
                    }

                    let output = store.tagged_sample_path(
                        SampleCategory::Positive,
                        POSITIVE_PREFIX,
                        start + report.produced,
                        &format!("{voice}_{rate}"),
                    );

                    match generate_one(&synth, phrase, voice, rate, &output).await {
                        Ok(()) => {
                            report.produced += 1;
                            if report.produced % 20 == 0 {
                                println!("  generated {}/{target} samples...", report.produced);
                            }
                        }
                        Err(e) => {
                            report.failed += 1;
                            tracing::warn!(voice, rate, error = %e, "synthesis failed, skipping");
                        }
                    }
                }
            }
        }

        // Every combination failed in a full pass; bail rather than spin
        if report.produced == produced_before_pass {
            break;
        }
    }

    tracing::info!(produced = report.produced, failed = report.failed, "positive generation done");
    Ok(report)
}

/// Generate one synthetic negative sample per negative phrase
///
/// Voice and rate are picked at random per phrase. Numbering continues from
/// pre-existing files.
///
/// # Errors
///
/// Returns error if no synthesizer or converter is installed, or the output
/// directory cannot be prepared. Per-phrase failures are skipped.
pub async fn negative(store: &SampleStore) -> Result<GenerateReport> {
    convert::ensure_available()?;
    let synth = SpeechSynth::detect()?;
    let voices = synth.voices(PREFERRED_VOICES).await?;

    store.ensure_dir(SampleCategory::Negative)?;
    let start = store.count_existing(SampleCategory::Negative, NEGATIVE_PREFIX)?;

    tracing::info!(phrases = NEGATIVE_PHRASES.len(), start, "generating negative samples");

    let mut report = GenerateReport::default();

    for phrase in NEGATIVE_PHRASES {
        let (voice, rate) = {
            let mut rng = rand::thread_rng();
            let voice = voices
                .choose(&mut rng)
                .cloned()
                .unwrap_or_else(|| "en-us".to_string());
            let rate = NEGATIVE_RATES.choose(&mut rng).copied().unwrap_or(180);
            (voice, rate)
        };

        let output = store.sample_path(
            SampleCategory::Negative,
            NEGATIVE_PREFIX,
            start + report.produced,
        );

        match generate_one(&synth, phrase, &voice, rate, &output).await {
            Ok(()) => {
                report.produced += 1;
                if report.produced % 10 == 0 {
                    println!("  generated {} samples...", report.produced);
                }
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(phrase, error = %e, "synthesis failed, skipping");
            }
        }
    }

    tracing::info!(produced = report.produced, failed = report.failed, "negative generation done");
    Ok(report)
}

/// Synthesize one phrase and convert it to the fixed sample format
///
/// The intermediate native-format file is deleted when this returns.
async fn generate_one(
    synth: &SpeechSynth,
    text: &str,
    voice: &str,
    rate: u32,
    output: &std::path::Path,
) -> Result<()> {
    let intermediate = tempfile::Builder::new()
        .prefix("wakeforge-tts-")
        .suffix(&format!(".{}", synth.backend().native_extension()))
        .tempfile()?;

    synth.synthesize(text, voice, rate, intermediate.path()).await?;
    convert::to_pcm(intermediate.path(), output).await
}
