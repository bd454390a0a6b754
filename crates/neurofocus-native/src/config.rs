//! Classifier and pre-processing configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file yields the
//! thresholds and result codes currently in use:
//!
//! ```toml
//! rank_scheme = "observed"   # or "distinct"
//!
//! [thresholds]
//! none = 0.0
//! low = 0.0
//! medium = 3.0
//! high = 4.0
//! really_high = 4.5
//!
//! [preprocessing]
//! sample_rate_hz = 250.0
//! low_cut_hz = 4.0
//! high_cut_hz = 40.0
//! fft_size = 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use neurofocus_core::threshold::{LevelThresholds, ThresholdTable};
use neurofocus_core::types::RankScheme;

use crate::classifier::ConcentrationClassifier;
use crate::error::ConfigError;
use crate::processing::clean::{BandpassCleaner, DEFAULT_PASSBAND_HZ};
use crate::processing::fft::SpectralAnalyzer;

/// Smallest FFT segment accepted
pub const MIN_FFT_SIZE: usize = 16;

// ============================================================================
// Pre-processing
// ============================================================================

/// Band-pass and spectral settings applied before classification.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// EEG sample rate in Hz
    pub sample_rate_hz: f64,
    /// Band-pass lower edge in Hz
    pub low_cut_hz: f64,
    /// Band-pass upper edge in Hz
    pub high_cut_hz: f64,
    /// FFT segment length in samples
    pub fft_size: usize,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 250.0,
            low_cut_hz: DEFAULT_PASSBAND_HZ.0,
            high_cut_hz: DEFAULT_PASSBAND_HZ.1,
            fft_size: 256,
        }
    }
}

impl PreprocessingConfig {
    /// Check rates, cut-offs and segment length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Preprocessing`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Preprocessing { reason });

        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return invalid(format!("sample rate must be positive, got {}", self.sample_rate_hz));
        }

        let nyquist = self.sample_rate_hz / 2.0;
        if !(self.low_cut_hz > 0.0 && self.low_cut_hz < self.high_cut_hz && self.high_cut_hz < nyquist) {
            return invalid(format!(
                "need 0 < low_cut ({}) < high_cut ({}) < nyquist ({nyquist})",
                self.low_cut_hz, self.high_cut_hz
            ));
        }

        if self.fft_size < MIN_FFT_SIZE {
            return invalid(format!(
                "fft_size must be at least {MIN_FFT_SIZE}, got {}",
                self.fft_size
            ));
        }

        Ok(())
    }

    /// Band-pass cleaner for these settings
    #[must_use]
    pub fn build_cleaner(&self) -> BandpassCleaner {
        BandpassCleaner::new(self.sample_rate_hz, self.low_cut_hz, self.high_cut_hz)
    }

    /// Spectral analyzer for these settings
    #[must_use]
    pub fn build_analyzer(&self) -> SpectralAnalyzer {
        SpectralAnalyzer::new(self.fft_size, self.sample_rate_hz)
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// How levels map to result codes
    pub rank_scheme: RankScheme,
    /// Minimum beta/alpha ratio per level
    pub thresholds: LevelThresholds,
    /// Pre-processing settings
    pub preprocessing: PreprocessingConfig,
}

impl ClassifierConfig {
    /// Read and validate a TOML config file.
    ///
    /// # Errors
    ///
    /// The errors of [`Self::read`] and [`Self::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file without validating it, so callers can apply
    /// overrides before a single [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read or
    /// [`ConfigError::Parse`] for malformed TOML.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), scheme = config.rank_scheme.name(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or the errors of
    /// [`Self::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if rendering fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check thresholds and pre-processing settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Thresholds`] or [`ConfigError::Preprocessing`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_table()?;
        self.preprocessing.validate()?;

        if self.rank_scheme == RankScheme::Observed && self.thresholds.low > self.thresholds.none {
            tracing::warn!(
                none = self.thresholds.none,
                low = self.thresholds.low,
                "NONE and LOW have different thresholds but share result code 0 under the observed scheme"
            );
        }

        Ok(())
    }

    /// Threshold table for this config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Thresholds`] if the thresholds are invalid.
    pub fn build_table(&self) -> Result<ThresholdTable, ConfigError> {
        Ok(ThresholdTable::new(self.thresholds, self.rank_scheme)?)
    }

    /// Classifier for this config.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_table`].
    pub fn build_classifier(&self) -> Result<ConcentrationClassifier, ConfigError> {
        Ok(ConcentrationClassifier::new(self.build_table()?))
    }
}
