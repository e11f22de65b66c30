//! Error types for the experiment
//!
//! User cancellation at the participant dialog is not an error; it is
//! reported through `SessionOutcome::Cancelled`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a session
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// An image resource could not be opened or decoded
    #[error("Failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The results file could not be created or appended to
    #[error("Failed to write results to {path}: {source}")]
    ResultsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Drawing to, or reading from, the terminal failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The operator pressed Ctrl+C while a phase was waiting for input
    #[error("Session interrupted by operator")]
    Interrupted,

    /// A scripted key source ran out of keys before the session finished
    #[error("Input exhausted while waiting for a key press")]
    InputExhausted,

    /// Invalid configuration file or environment override
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for experiment operations
pub type Result<T> = std::result::Result<T, ExperimentError>;
