//! Error types for TSPLIB files.

use thiserror::Error;

use tourforge_core::TourForgeError;

/// Error raised while reading or writing a TSPLIB file.
#[derive(Debug, Error)]
pub enum TsplibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content. `line` is 1-based, 0 when the whole file is at fault.
    #[error("TSPLIB parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A recognised TSPLIB feature this crate does not handle.
    #[error("Unsupported TSPLIB feature: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Core(#[from] TourForgeError),
}

impl TsplibError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for TSPLIB operations.
pub type Result<T> = std::result::Result<T, TsplibError>;
