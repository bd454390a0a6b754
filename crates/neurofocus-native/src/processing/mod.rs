//! Signal processing pipelines
//!
//! This module provides the pre-processing and spectral steps that turn a
//! raw EEG window into band power:
//! - [`filters`]: Digital filtering (IIR)
//! - [`clean`]: Pluggable cleaning stages (band-pass, external artifact rejection)
//! - [`fft`]: Spectral analysis and band power

pub mod clean;
pub mod fft;
pub mod filters;
