//! Wakeforge - wake-word training sample toolkit
//!
//! Collects and prepares audio training data for a wake-word detector, then
//! hands the data to an external training repository:
//! - Synthetic sample generation via the OS speech synthesizer
//! - Long-recording import with silence splitting
//! - Interactive microphone recording
//! - Training orchestration against microWakeWord
//!
//! Speech synthesis, resampling, silence detection, and model training are
//! all delegated to external command-line tools. This crate supplies the
//! workflow around them: sample naming, format enforcement, duration
//! filtering, and operator interaction.

pub mod audio;
pub mod convert;
pub mod error;
pub mod generate;
pub mod import;
pub mod phrases;
pub mod record;
pub mod store;
pub mod synth;
pub mod tool;
pub mod train;

pub use audio::SAMPLE_RATE;
pub use error::{Error, Result};
pub use store::{SampleCategory, SampleStore};
