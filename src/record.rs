//! Interactive microphone recording session
//!
//! A blocking command loop for a single operator: each take is a fixed
//! 2-second capture (deliberately not push-to-talk), trimmed at an amplitude
//! threshold and written as one sample file. Uncaught audio-subsystem errors
//! end the session; that is acceptable for an interactive tool.

use std::io::Write as _;
use std::time::Duration;

use crate::audio::{self, AudioCapture, list_input_devices};
use crate::store::{SampleCategory, SampleStore};
use crate::{Error, Result};

/// Filename prefix for microphone-recorded samples
pub const RECORD_PREFIX: &str = "mic";

/// Fixed capture length per take
const CAPTURE_SECS: f32 = 2.0;

/// Amplitude below which leading/trailing audio is trimmed
const TRIM_THRESHOLD: f32 = 0.01;

/// Padding kept around the detected non-silent region (0.1s at 16kHz)
const TRIM_PADDING: usize = 1600;

/// Countdown ticks before each capture
const COUNTDOWN_TICKS: u32 = 3;

/// Run a recording session until the operator quits
///
/// Loop: prompt -> countdown -> capture -> trim -> save -> prompt. The `q`
/// command ends the session and prints a summary.
///
/// # Errors
///
/// Returns error if the output directory cannot be prepared, the microphone
/// cannot be opened, or a sample cannot be written
pub async fn run_session(store: &SampleStore, category: SampleCategory) -> Result<()> {
    let output_dir = store.ensure_dir(category)?;
    let existing = store.count_existing(category, RECORD_PREFIX)?;
    let mut sample_num = existing;

    println!("wakeforge recording session");
    println!("{}", "-".repeat(45));
    println!("recording: {category} samples");
    println!("output:    {}/", output_dir.display());
    println!("starting from sample #{sample_num}");
    println!();

    match list_input_devices() {
        Ok(devices) => {
            println!("input devices:");
            for name in devices {
                println!("  {name}");
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not enumerate input devices"),
    }
    println!();

    match category {
        SampleCategory::Positive => {
            println!("say the wake word clearly when recording;");
            println!("vary your tone, speed, and distance from the mic");
        }
        SampleCategory::Negative => {
            println!("say phrases that should NOT trigger the wake word");
        }
    }
    println!();
    println!("controls:");
    println!("  ENTER = record a {CAPTURE_SECS}s take");
    println!("  q     = quit");

    let mut capture = AudioCapture::new()?;
    let stdin = std::io::stdin();

    loop {
        print!("\n[sample #{sample_num}] press ENTER to record (q to quit): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }

        match line.trim() {
            "" => {
                record_take(&mut capture, store, category, sample_num).await?;
                sample_num += 1;
            }
            cmd if cmd.eq_ignore_ascii_case("q") => break,
            other => println!("  unknown command {other:?} (ENTER to record, q to quit)"),
        }
    }

    println!("\nsession complete: recorded {} new samples", sample_num - existing);
    println!("total in {}/: {sample_num}", output_dir.display());

    Ok(())
}

/// One take: countdown, fixed-duration capture, trim, save
async fn record_take(
    capture: &mut AudioCapture,
    store: &SampleStore,
    category: SampleCategory,
    index: usize,
) -> Result<()> {
    for tick in (1..=COUNTDOWN_TICKS).rev() {
        print!("  {tick}... ");
        std::io::stdout().flush()?;
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    println!();

    print!("  RECORDING... ");
    std::io::stdout().flush()?;

    let duration = Duration::from_secs_f32(CAPTURE_SECS);
    let samples = capture.record_for(duration).await?;
    println!("done");

    if samples.is_empty() {
        return Err(Error::Audio("no samples captured".to_string()));
    }

    let trimmed = audio::trim_silence(&samples, TRIM_THRESHOLD, TRIM_PADDING);

    let path = store.sample_path(category, RECORD_PREFIX, index);
    audio::write_wav(&path, trimmed)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    println!("  saved: {name} ({:.2}s)", audio::duration_secs(trimmed));

    Ok(())
}
