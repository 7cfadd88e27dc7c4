//! OS speech synthesizer wrapper
//!
//! Synthesis is delegated to whatever the platform provides: `say` on macOS,
//! `espeak-ng` or `espeak` elsewhere. Output lands in an intermediate file in
//! the synthesizer's native format; callers convert it to the fixed sample
//! format and delete it.

use std::path::Path;

use crate::phrases::MAX_VOICES;
use crate::{Error, Result, tool};

/// Synthesizer voices for the espeak backends
///
/// espeak voices are language/variant codes rather than installed named
/// voices, so the set is static.
const ESPEAK_VOICES: &[&str] = &[
    "en-us",
    "en-gb",
    "en-us+f3",
    "en-us+m3",
    "en-gb+f4",
    "en-gb+m4",
];

/// Which synthesizer binary is driving synthesis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynthBackend {
    /// macOS `say`
    Say,
    /// `espeak-ng`
    EspeakNg,
    /// legacy `espeak`
    Espeak,
}

impl SynthBackend {
    /// Binary name on PATH
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Say => "say",
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
        }
    }

    /// File extension of the synthesizer's native output
    #[must_use]
    pub const fn native_extension(self) -> &'static str {
        match self {
            Self::Say => "aiff",
            Self::EspeakNg | Self::Espeak => "wav",
        }
    }
}

/// Speech synthesizer bound to a detected backend
pub struct SpeechSynth {
    backend: SynthBackend,
}

impl SpeechSynth {
    /// Detect an installed synthesizer, preferring `say`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolMissing`] if no supported synthesizer is on PATH
    pub fn detect() -> Result<Self> {
        let backend = [SynthBackend::Say, SynthBackend::EspeakNg, SynthBackend::Espeak]
            .into_iter()
            .find(|b| tool::available(b.program()))
            .ok_or_else(|| Error::ToolMissing("say / espeak-ng / espeak".to_string()))?;

        tracing::debug!(backend = ?backend, "speech synthesizer detected");
        Ok(Self { backend })
    }

    /// The detected backend
    #[must_use]
    pub const fn backend(&self) -> SynthBackend {
        self.backend
    }

    /// Installed voices, preferring the entries of `preferred`
    ///
    /// Falls back to whatever is installed when none of the preferred voices
    /// are present; capped at [`MAX_VOICES`].
    ///
    /// # Errors
    ///
    /// Returns error if the voice query fails
    pub async fn voices(&self, preferred: &[&str]) -> Result<Vec<String>> {
        match self.backend {
            SynthBackend::Say => {
                let output = tool::run_checked("say", &["-v", "?"])
                    .await
                    .map_err(|e| Error::Synth(e.to_string()))?;
                Ok(select_voices(&parse_say_voices(&output), preferred))
            }
            SynthBackend::EspeakNg | SynthBackend::Espeak => Ok(ESPEAK_VOICES
                .iter()
                .take(MAX_VOICES)
                .map(ToString::to_string)
                .collect()),
        }
    }

    /// Synthesize `text` to `output` in the backend's native format
    ///
    /// `rate` is in words per minute for every backend.
    ///
    /// # Errors
    ///
    /// Returns error if the synthesizer invocation fails
    pub async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        rate: u32,
        output: &Path,
    ) -> Result<()> {
        let rate = rate.to_string();
        let out = output.to_string_lossy().to_string();

        let result = match self.backend {
            SynthBackend::Say => {
                tool::run_checked("say", &["-v", voice, "-r", &rate, "-o", &out, text]).await
            }
            SynthBackend::EspeakNg | SynthBackend::Espeak => {
                tool::run_checked(
                    self.backend.program(),
                    &["-v", voice, "-s", &rate, "-w", &out, text],
                )
                .await
            }
        };

        result.map(|_| ()).map_err(|e| Error::Synth(e.to_string()))
    }
}

/// Parse `say -v ?` output: one voice per line, name is the first token
fn parse_say_voices(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

/// Intersect installed voices with the preferred list, falling back to
/// whatever is installed; capped at [`MAX_VOICES`]
fn select_voices(installed: &[String], preferred: &[&str]) -> Vec<String> {
    let matched: Vec<String> = installed
        .iter()
        .filter(|v| preferred.contains(&v.as_str()))
        .cloned()
        .collect();

    let pool = if matched.is_empty() {
        installed.to_vec()
    } else {
        matched
    };

    pool.into_iter().take(MAX_VOICES).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAY_OUTPUT: &str = "\
Alex                en_US    # Most people recognize me by my voice.
Karen               en_AU    # Hi, my name is Karen.
Yuri                ru_RU    # Most people recognize me by my voice.
";

    #[test]
    fn parses_voice_names_from_say_listing() {
        let voices = parse_say_voices(SAY_OUTPUT);
        assert_eq!(voices, vec!["Alex", "Karen", "Yuri"]);
    }

    #[test]
    fn prefers_listed_voices() {
        let installed = parse_say_voices(SAY_OUTPUT);
        let selected = select_voices(&installed, &["Alex", "Karen", "Samantha"]);
        assert_eq!(selected, vec!["Alex", "Karen"]);
    }

    #[test]
    fn falls_back_to_installed_voices() {
        let installed = parse_say_voices(SAY_OUTPUT);
        let selected = select_voices(&installed, &["Samantha"]);
        assert_eq!(selected, vec!["Alex", "Karen", "Yuri"]);
    }

    #[test]
    fn voice_selection_is_capped() {
        let installed: Vec<String> = (0..20).map(|i| format!("Voice{i}")).collect();
        let selected = select_voices(&installed, &[]);
        assert_eq!(selected.len(), MAX_VOICES);
    }

    #[test]
    fn native_extension_matches_backend() {
        assert_eq!(SynthBackend::Say.native_extension(), "aiff");
        assert_eq!(SynthBackend::EspeakNg.native_extension(), "wav");
    }
}
