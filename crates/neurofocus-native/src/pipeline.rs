//! Window-to-concentration pipeline
//!
//! Cleans a raw single-channel window, extracts mean alpha and beta band
//! power, and classifies their ratio.

use serde::Serialize;

use crate::classifier::{Classification, ConcentrationClassifier};
use crate::config::ClassifierConfig;
use crate::error::{ConfigError, PipelineError};
use crate::processing::clean::{BandpassCleaner, SignalCleaner};
use crate::processing::fft::{BandPowers, SpectralAnalyzer};

/// Result of processing one window
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WindowAnalysis {
    /// Mean band powers of the cleaned window
    pub band_powers: BandPowers,
    /// Concentration classification of those powers
    pub classification: Classification,
}

/// Cleaner, spectral analyzer and classifier wired together.
pub struct ConcentrationPipeline<C> {
    cleaner: C,
    analyzer: SpectralAnalyzer,
    classifier: ConcentrationClassifier,
}

impl<C: SignalCleaner> ConcentrationPipeline<C> {
    /// Assemble a pipeline from its parts
    pub fn new(cleaner: C, analyzer: SpectralAnalyzer, classifier: ConcentrationClassifier) -> Self {
        Self { cleaner, analyzer, classifier }
    }

    /// Replace the cleaning stage, e.g. to append artifact rejection
    pub fn map_cleaner<D: SignalCleaner>(self, f: impl FnOnce(C) -> D) -> ConcentrationPipeline<D> {
        ConcentrationPipeline {
            cleaner: f(self.cleaner),
            analyzer: self.analyzer,
            classifier: self.classifier,
        }
    }

    /// Clean, measure and classify one raw window.
    ///
    /// # Errors
    ///
    /// - Errors from the cleaning stage
    /// - [`PipelineError::InsufficientSamples`] if the cleaned window is
    ///   shorter than one FFT segment
    /// - [`PipelineError::Classify`] if the band powers cannot be
    ///   classified, e.g. a silent window with zero alpha power
    pub fn process_window(&mut self, raw: &[f64]) -> Result<WindowAnalysis, PipelineError> {
        let cleaned = self.cleaner.clean(raw)?;
        tracing::debug!(raw = raw.len(), cleaned = cleaned.len(), "Cleaned window");

        let band_powers = self.analyzer.mean_band_powers(&cleaned)?;
        tracing::debug!(alpha = band_powers.alpha, beta = band_powers.beta, "Mean band power");

        let classification = self
            .classifier
            .classify_detailed(band_powers.alpha, band_powers.beta)?;

        Ok(WindowAnalysis { band_powers, classification })
    }
}

impl ConcentrationPipeline<BandpassCleaner> {
    /// Band-pass pipeline built from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Preprocessing`] or [`ConfigError::Thresholds`].
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        config.preprocessing.validate()?;
        Ok(Self::new(
            config.preprocessing.build_cleaner(),
            config.preprocessing.build_analyzer(),
            config.build_classifier()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use neurofocus_core::types::ConcentrationLevel;
    use neurofocus_core::ClassifyError;

    use crate::processing::clean::PassThrough;

    const FS: f64 = 250.0;

    fn mix(alpha_amp: f64, beta_amp: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / FS;
                alpha_amp * (2.0 * PI * 10.0 * t).sin() + beta_amp * (2.0 * PI * 20.0 * t).sin()
            })
            .collect()
    }

    fn default_pipeline() -> ConcentrationPipeline<BandpassCleaner> {
        ConcentrationPipeline::from_config(&ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_beta_dominated_window_is_really_high() {
        let mut pipeline = default_pipeline();
        let analysis = pipeline.process_window(&mix(0.3, 1.0, 1024)).unwrap();

        assert!(analysis.band_powers.beta > analysis.band_powers.alpha);
        assert_eq!(analysis.classification.level, ConcentrationLevel::ReallyHigh);
        assert_eq!(analysis.classification.rank, 3);
    }

    #[test]
    fn test_alpha_dominated_window_is_bottom_tier() {
        let mut pipeline = default_pipeline();
        let analysis = pipeline.process_window(&mix(1.0, 0.3, 1024)).unwrap();

        assert!(analysis.classification.ratio < 1.0);
        assert_eq!(analysis.classification.rank, 0);
    }

    #[test]
    fn test_silent_window_reports_zero_alpha() {
        let mut pipeline = default_pipeline();
        let err = pipeline.process_window(&[0.0; 512]).unwrap_err();
        assert!(matches!(err, PipelineError::Classify(ClassifyError::ZeroAlphaPower { .. })));
    }

    #[test]
    fn test_short_window_rejected() {
        let mut pipeline = default_pipeline();
        let err = pipeline.process_window(&mix(1.0, 1.0, 100)).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientSamples { got: 100, need: 256 }));
    }

    #[test]
    fn test_injected_cleaner_is_used() {
        let mut calls = 0;
        let counting = |w: &[f64]| -> Result<Vec<f64>, PipelineError> {
            calls += 1;
            Ok(w.to_vec())
        };

        {
            let mut pipeline = ConcentrationPipeline::new(
                counting,
                SpectralAnalyzer::new(256, FS),
                ConcentrationClassifier::default(),
            );
            pipeline.process_window(&mix(1.0, 1.0, 512)).unwrap();
            pipeline.process_window(&mix(1.0, 1.0, 512)).unwrap();
        }

        assert_eq!(calls, 2);
    }

    #[test]
    fn test_map_cleaner_appends_stage() {
        let failing = |_: &[f64]| -> Result<Vec<f64>, PipelineError> {
            Err(PipelineError::Cleaner { reason: "artifact rejection unavailable".to_string() })
        };
        let mut pipeline = default_pipeline().map_cleaner(|bp| bp.then(failing));

        let err = pipeline.process_window(&mix(1.0, 1.0, 512)).unwrap_err();
        assert!(matches!(err, PipelineError::Cleaner { .. }));
    }

    #[test]
    fn test_pass_through_matches_direct_classification() {
        let mut pipeline = ConcentrationPipeline::new(
            PassThrough,
            SpectralAnalyzer::new(256, FS),
            ConcentrationClassifier::default(),
        );
        let analysis = pipeline.process_window(&mix(0.5, 1.0, 512)).unwrap();

        let direct = ConcentrationClassifier::default()
            .classify_detailed(analysis.band_powers.alpha, analysis.band_powers.beta)
            .unwrap();
        assert_eq!(analysis.classification, direct);
    }
}
