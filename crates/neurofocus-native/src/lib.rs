//! Neurofocus Native - Host-side EEG processing and concentration classification
//!
//! This crate provides host-side processing for concentration scoring:
//! - Signal cleaning (IIR band-pass, pluggable artifact rejection)
//! - FFT band power extraction
//! - Threshold-ladder classification with per-call logging
//! - TOML configuration
//!
//! # Modules
//!
//! - [`classifier`]: Beta/alpha ratio classifier
//! - [`processing`]: Signal processing stages
//! - [`pipeline`]: Raw window to classification
//! - [`config`]: Configuration loading and validation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processing;

// Re-export key types
pub use classifier::{Classification, ConcentrationClassifier};
pub use config::{ClassifierConfig, PreprocessingConfig};
pub use error::{ConfigError, PipelineError};
pub use pipeline::{ConcentrationPipeline, WindowAnalysis};
pub use processing::clean::{BandpassCleaner, PassThrough, SignalCleaner};
pub use processing::fft::{BandPowers, SpectralAnalyzer};
