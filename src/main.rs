use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wakeforge::audio::{self, AudioCapture};
use wakeforge::store::{SampleCategory, SampleStore};
use wakeforge::train::TrainOptions;
use wakeforge::{generate, import, record, train};

/// Wakeforge - wake-word training sample toolkit
#[derive(Parser)]
#[command(name = "wakeforge", version, about)]
struct Cli {
    /// Root directory for collected samples
    #[arg(long, env = "WAKEFORGE_SAMPLES_DIR", default_value = "samples")]
    samples_dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate synthetic positive samples with the OS speech synthesizer
    Generate {
        /// Number of new samples to generate
        #[arg(short, long, default_value_t = generate::DEFAULT_TARGET)]
        target: usize,
    },
    /// Generate synthetic negative samples (one per negative phrase)
    GenerateNegative,
    /// Split long recordings into individual samples
    Import {
        /// Recording files to import (any format sox can read)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Record samples interactively from the microphone
    Record {
        /// Record negative samples instead of positive
        #[arg(short, long)]
        negative: bool,
    },
    /// Train a wake-word model from the collected samples
    Train {
        /// Model name
        #[arg(long, default_value = "wakeword")]
        name: String,
        /// Local checkout of the training repository (cloned if absent)
        #[arg(long, default_value = "microWakeWord")]
        repo_dir: PathBuf,
        /// Where to copy the trained model artifact
        #[arg(long, default_value = "trained_model")]
        output_dir: PathBuf,
        /// Training epochs
        #[arg(long, default_value_t = 50)]
        epochs: u32,
        /// Training batch size
        #[arg(long, default_value_t = 32)]
        batch_size: u32,
    },
    /// Test microphone input levels
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,wakeforge=info",
        1 => "info,wakeforge=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = SampleStore::new(cli.samples_dir);

    match cli.command {
        Command::Generate { target } => {
            let report = generate::positive(&store, target).await?;
            println!(
                "generated {} positive samples in {}/ ({} failed)",
                report.produced,
                store.category_dir(SampleCategory::Positive).display(),
                report.failed
            );
        }
        Command::GenerateNegative => {
            let report = generate::negative(&store).await?;
            println!(
                "generated {} negative samples in {}/ ({} failed)",
                report.produced,
                store.category_dir(SampleCategory::Negative).display(),
                report.failed
            );
        }
        Command::Import { files } => {
            let mut total = 0;
            for file in &files {
                total += import::import_recording(&store, file).await?;
            }
            println!("imported {total} samples");
        }
        Command::Record { negative } => {
            let category = if negative {
                SampleCategory::Negative
            } else {
                SampleCategory::Positive
            };
            record::run_session(&store, category).await?;
        }
        Command::Train {
            name,
            repo_dir,
            output_dir,
            epochs,
            batch_size,
        } => {
            let opts = TrainOptions {
                name,
                repo_dir,
                output_dir,
                epochs,
                batch_size,
            };
            train::run(&store, &opts).await?;
        }
        Command::TestMic { duration } => test_mic(duration).await?,
    }

    Ok(())
}

/// Test microphone input with a live level meter
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    println!("Sample rate: {} Hz", audio::SAMPLE_RATE);
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.peek_buffer();
        let energy = audio::rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );

        capture.clear_buffer();
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working.");
    println!("If RMS stayed near 0, check your input device and levels.");

    Ok(())
}
