//! Training orchestration against the external microWakeWord repository
//!
//! This crate does no training itself: it verifies sample counts, stages the
//! collected samples into the layout microWakeWord expects, and invokes its
//! training entry point. The operation is not idempotent; a failed run is
//! reported and expected to be re-run manually.

use std::path::{Path, PathBuf};

use dialoguer::Confirm;

use crate::store::{SampleCategory, SampleStore};
use crate::{Error, Result, tool};

/// Recommended minimum positive sample count
pub const MIN_POSITIVE: usize = 50;

/// Recommended minimum negative sample count
pub const MIN_NEGATIVE: usize = 30;

/// Upstream training repository
const TRAINING_REPO_URL: &str = "https://github.com/kahrendt/microWakeWord.git";

/// Where to point the operator when the external interface changes
const TRAINING_DOCS_URL: &str = "https://github.com/kahrendt/microWakeWord";

/// Training run parameters
#[derive(Clone, Debug)]
pub struct TrainOptions {
    /// Model name; also names the staged training-data directory and artifact
    pub name: String,
    /// Local checkout of the training repository
    pub repo_dir: PathBuf,
    /// Where the trained model artifact is copied on success
    pub output_dir: PathBuf,
    /// Training epochs
    pub epochs: u32,
    /// Training batch size
    pub batch_size: u32,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            name: "wakeword".to_string(),
            repo_dir: PathBuf::from("microWakeWord"),
            output_dir: PathBuf::from("trained_model"),
            epochs: 50,
            batch_size: 32,
        }
    }
}

/// Verify counts, stage samples, and run training
///
/// Below-threshold counts produce warnings and an interactive confirmation,
/// not a hard stop.
///
/// # Errors
///
/// Returns error if staging fails or an external invocation (git clone,
/// training script) fails
pub async fn run(store: &SampleStore, opts: &TrainOptions) -> Result<()> {
    let positive = store.count_wavs(SampleCategory::Positive)?;
    let negative = store.count_wavs(SampleCategory::Negative)?;

    println!("sample counts:");
    println!("  positive (wake word): {positive}");
    println!("  negative (not wake):  {negative}");
    println!();

    let warnings = check_sample_counts(positive, negative);
    if !warnings.is_empty() {
        for warning in &warnings {
            println!("warning: {warning}");
        }

        let proceed = Confirm::new()
            .with_prompt("Continue anyway?")
            .default(false)
            .interact()
            .map_err(|e| Error::Train(format!("confirmation prompt failed: {e}")))?;

        if !proceed {
            println!("aborted; collect more samples and re-run");
            return Ok(());
        }
    }

    ensure_training_repo(&opts.repo_dir).await?;

    println!("preparing training data...");
    let (staged_pos, staged_neg) = stage_samples(store, opts)?;
    tracing::info!(staged_pos, staged_neg, "training data staged");

    println!("starting training (this may take a while)...");
    run_training(opts).await?;

    collect_artifact(opts)?;
    Ok(())
}

/// Warnings for below-threshold sample counts
fn check_sample_counts(positive: usize, negative: usize) -> Vec<String> {
    let mut warnings = Vec::new();
    if positive < MIN_POSITIVE {
        warnings.push(format!(
            "fewer than {MIN_POSITIVE} positive samples ({positive}); \
             recommend 100-200 for good accuracy"
        ));
    }
    if negative < MIN_NEGATIVE {
        warnings.push(format!(
            "fewer than {MIN_NEGATIVE} negative samples ({negative}); \
             run `wakeforge generate-negative` for more"
        ));
    }
    warnings
}

/// Clone the training repository if it is not already present
async fn ensure_training_repo(repo_dir: &Path) -> Result<()> {
    if repo_dir.exists() {
        tracing::debug!(repo = %repo_dir.display(), "training repository already present");
        return Ok(());
    }

    println!("cloning training repository...");
    tool::require("git")?;
    let dir = repo_dir.to_string_lossy().to_string();
    tool::run_inherited("git", &["clone", TRAINING_REPO_URL, &dir], None)
        .await
        .map_err(|e| Error::Train(format!("clone failed: {e}")))
}

/// Copy collected samples into the repository's expected layout
///
/// Layout: `<repo>/training_data/<name>/{positive,negative}/*.wav`
fn stage_samples(store: &SampleStore, opts: &TrainOptions) -> Result<(usize, usize)> {
    let train_dir = opts.repo_dir.join("training_data").join(&opts.name);

    let mut staged = [0usize; 2];
    for (slot, category) in [SampleCategory::Positive, SampleCategory::Negative]
        .into_iter()
        .enumerate()
    {
        let target = train_dir.join(category.dir_name());
        std::fs::create_dir_all(&target)?;

        for source in store.wav_paths(category)? {
            let Some(name) = source.file_name() else {
                continue;
            };
            std::fs::copy(&source, target.join(name))?;
            staged[slot] += 1;
        }
    }

    Ok((staged[0], staged[1]))
}

/// Invoke the external training entry point
async fn run_training(opts: &TrainOptions) -> Result<()> {
    tool::require("python3")?;

    let epochs = opts.epochs.to_string();
    let batch_size = opts.batch_size.to_string();
    let args = [
        "train.py",
        "--name",
        &opts.name,
        "--epochs",
        &epochs,
        "--batch-size",
        &batch_size,
    ];

    tool::run_inherited("python3", &args, Some(&opts.repo_dir))
        .await
        .map_err(|e| {
            Error::Train(format!(
                "training failed: {e}\n\
                 the microWakeWord training interface may have changed; \
                 check its README for current instructions: {TRAINING_DOCS_URL}"
            ))
        })
}

/// Copy the trained model artifact to the output directory
fn collect_artifact(opts: &TrainOptions) -> Result<()> {
    let artifact = opts
        .repo_dir
        .join("models")
        .join(format!("{}.tflite", opts.name));

    if artifact.exists() {
        std::fs::create_dir_all(&opts.output_dir)?;
        let destination = opts.output_dir.join(format!("{}.tflite", opts.name));
        std::fs::copy(&artifact, &destination)?;
        println!("model saved to: {}", destination.display());
    } else {
        tracing::warn!(
            artifact = %artifact.display(),
            "training finished but no model artifact was found; see {TRAINING_DOCS_URL}"
        );
        println!("training finished but no model artifact was found");
        println!("check the training repository's output layout: {TRAINING_DOCS_URL}");
    }

    Ok(())
}
