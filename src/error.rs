//! Error types for wakeforge

use thiserror::Error;

/// Result type alias for wakeforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting or preparing samples
#[derive(Debug, Error)]
pub enum Error {
    /// Audio capture error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synth(String),

    /// Audio format conversion error
    #[error("conversion error: {0}")]
    Convert(String),

    /// Recording import error
    #[error("import error: {0}")]
    Import(String),

    /// Training orchestration error
    #[error("training error: {0}")]
    Train(String),

    /// External tool invocation error
    #[error("tool error: {0}")]
    Tool(String),

    /// Required external tool is not on PATH
    #[error("required tool not found on PATH: {0}")]
    ToolMissing(String),

    /// Input file not found
    #[error("not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
