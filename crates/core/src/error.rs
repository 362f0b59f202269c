use std::io;

/// Errors that can occur while assembling or executing package manager commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command exited successfully but produced no output
    #[error("Command succeeded but produced no output data")]
    OutputData,

    /// The command exited with a non-zero status
    #[error("Command failed with exit code {code}: {message}")]
    Generic { code: i32, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Executor panicked: {0}")]
    ExecutorPanicked(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    /// Exit code of the failed process, if the error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Generic { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for buildkit operations
pub type Result<T> = std::result::Result<T, Error>;
