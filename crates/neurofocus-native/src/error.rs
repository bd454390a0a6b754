//! Error types for host-side processing
//!
//! Pipeline and configuration errors using `thiserror`. Classification
//! errors from the core crate are wrapped, not re-declared.

use std::path::PathBuf;

use neurofocus_core::ClassifyError;
use thiserror::Error;

/// Errors raised while turning a raw window into a classification
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Window shorter than one FFT segment
    #[error("Insufficient EEG data: got {got} samples, need {need}")]
    InsufficientSamples {
        /// Number of samples received
        got: usize,
        /// Number of samples needed
        need: usize,
    },

    /// Spectral analyzer built with a zero-length FFT segment
    #[error("FFT segment length must be non-zero")]
    EmptySegment,

    /// Raw window contains NaN or infinity
    #[error("Non-finite sample at index {index}")]
    NonFiniteSample {
        /// Position of the first bad sample
        index: usize,
    },

    /// An injected cleaning stage failed
    #[error("Cleaning stage failed: {reason}")]
    Cleaner {
        /// Reason reported by the stage
        reason: String,
    },

    /// Band powers could not be classified
    #[error("Classification failed: {0}")]
    Classify(#[from] ClassifyError),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Threshold table rejected
    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] ClassifyError),

    /// Pre-processing parameters out of range
    #[error("Invalid preprocessing config: {reason}")]
    Preprocessing {
        /// Description of the issue
        reason: String,
    },
}
