//! Format conversion and silence splitting via `sox`

use std::path::Path;

use crate::audio::{BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
use crate::{Error, Result, tool};

/// Leading-silence strip: duration (secs) and amplitude threshold
const LEADING_SILENCE: (&str, &str) = ("0.1", "1%");

/// Inter-segment split: silence duration (secs) and amplitude threshold
const SPLIT_SILENCE: (&str, &str) = ("0.3", "1%");

/// Verify that `sox` is installed
///
/// # Errors
///
/// Returns [`Error::ToolMissing`] if `sox` is not on PATH
pub fn ensure_available() -> Result<()> {
    tool::require("sox").map(|_| ())
}

/// Convert any audio file to the fixed sample format (mono 16kHz 16-bit)
///
/// # Errors
///
/// Returns error if the conversion fails
pub async fn to_pcm(input: &Path, output: &Path) -> Result<()> {
    let input = input.to_string_lossy().to_string();
    let output = output.to_string_lossy().to_string();
    let rate = SAMPLE_RATE.to_string();
    let channels = CHANNELS.to_string();
    let bits = BITS_PER_SAMPLE.to_string();

    tool::run_checked(
        "sox",
        &[&input, "-r", &rate, "-c", &channels, "-b", &bits, &output],
    )
    .await
    .map(|_| ())
    .map_err(|e| Error::Convert(e.to_string()))
}

/// Split a recording into one file per detected segment
///
/// `output_template` names the first output file; sox appends a running
/// number per segment (`segment.wav` -> `segment001.wav`, ...).
///
/// # Errors
///
/// Returns error if the split invocation fails
pub async fn split_on_silence(input: &Path, output_template: &Path) -> Result<()> {
    let input = input.to_string_lossy().to_string();
    let template = output_template.to_string_lossy().to_string();

    let mut args = vec![input.as_str(), template.as_str()];
    let filter = silence_filter_args();
    args.extend(filter.iter().map(String::as_str));

    tool::run_checked("sox", &args)
        .await
        .map(|_| ())
        .map_err(|e| Error::Convert(e.to_string()))
}

/// Measured duration of an audio file in seconds (`sox --i -D`)
///
/// # Errors
///
/// Returns error if the probe fails or its output is not a number
pub async fn duration_secs(path: &Path) -> Result<f32> {
    let path = path.to_string_lossy().to_string();
    let output = tool::run_checked("sox", &["--i", "-D", &path])
        .await
        .map_err(|e| Error::Convert(e.to_string()))?;

    parse_duration(&output)
}

/// The sox `silence` effect chain: strip leading silence, then start a new
/// file at every inter-segment pause
fn silence_filter_args() -> Vec<String> {
    let (lead_dur, lead_thresh) = LEADING_SILENCE;
    let (split_dur, split_thresh) = SPLIT_SILENCE;

    [
        "silence", "1", lead_dur, lead_thresh, "1", split_dur, split_thresh, ":", "newfile", ":",
        "restart",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn parse_duration(output: &str) -> Result<f32> {
    output
        .trim()
        .parse::<f32>()
        .map_err(|e| Error::Convert(format!("unparseable duration {:?}: {e}", output.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sox_duration_output() {
        assert!((parse_duration("1.500000\n").unwrap() - 1.5).abs() < f32::EPSILON);
        assert!((parse_duration("0.287500").unwrap() - 0.2875).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage_duration() {
        assert!(parse_duration("not a number").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn silence_filter_strips_then_splits() {
        let args = silence_filter_args();
        assert_eq!(args[0], "silence");
        // leading strip at 0.1s / 1%, split at 0.3s / 1%
        assert_eq!(&args[1..4], &["1", "0.1", "1%"]);
        assert_eq!(&args[4..7], &["1", "0.3", "1%"]);
        assert!(args.contains(&"newfile".to_string()));
        assert!(args.contains(&"restart".to_string()));
    }
}
