//! Error type shared by every analysis stage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a corpus, analyzing it or exporting results.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A configuration value is out of range. Raised before any scanning.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The corpus (or an export target) could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The corpus path has an extension we cannot read.
    #[error("Unsupported corpus file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Text extraction from a binary document failed.
    #[error("Failed to extract text from {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    /// A corpus directory contained no supported files.
    #[error("No corpus files found in {}", .0.display())]
    EmptyInput(PathBuf),

    /// The tagging oracle reported a failure.
    #[error("Tagging oracle failed: {0}")]
    Oracle(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for corpus analysis.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Shorthand for [`AnalysisError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
