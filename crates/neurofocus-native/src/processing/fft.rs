//! FFT-based spectral analysis
//!
//! Provides band power extraction over cleaned EEG windows.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::Serialize;

use neurofocus_core::types::EegBand;

use crate::error::PipelineError;

/// FFT-based spectral analyzer
pub struct SpectralAnalyzer {
    fft_size: usize,
    sample_rate: f64,
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralAnalyzer {
    /// Create a new spectral analyzer
    ///
    /// # Arguments
    ///
    /// * `fft_size` - FFT size (should be power of 2)
    /// * `sample_rate` - Sample rate in Hz
    #[must_use]
    pub fn new(fft_size: usize, sample_rate: f64) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch_len = fft.get_inplace_scratch_len();

        Self {
            fft_size,
            sample_rate,
            fft,
            window: hann_window(fft_size),
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Frequency resolution (Hz per bin)
    #[must_use]
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate / self.fft_size as f64
    }

    /// Compute power spectrum of the first `fft_size` samples
    ///
    /// Returns power spectral density (magnitude squared), positive
    /// frequencies only.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptySegment`] if the analyzer was built
    /// with `fft_size == 0`, or [`PipelineError::InsufficientSamples`] if
    /// `samples` is shorter than one FFT segment.
    pub fn compute_psd(&mut self, samples: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if self.fft_size == 0 {
            return Err(PipelineError::EmptySegment);
        }
        if samples.len() < self.fft_size {
            return Err(PipelineError::InsufficientSamples {
                got: samples.len(),
                need: self.fft_size,
            });
        }

        for (slot, (&s, &w)) in self.buffer.iter_mut().zip(samples.iter().zip(&self.window)) {
            *slot = Complex::new(s * w, 0.0);
        }

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let n_freqs = self.fft_size / 2 + 1;
        let norm = 1.0 / (self.fft_size as f64).powi(2);

        Ok(self.buffer[..n_freqs]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im) * norm)
            .collect())
    }

    /// Sum of PSD bins whose centre frequency lies in `[low_hz, high_hz)`
    #[must_use]
    pub fn band_power(&self, psd: &[f64], low_hz: f64, high_hz: f64) -> f64 {
        let freq_res = self.frequency_resolution();
        let start_bin = ((low_hz / freq_res).ceil() as usize).min(psd.len());
        let end_bin = ((high_hz / freq_res).ceil() as usize).min(psd.len());

        if start_bin >= end_bin {
            return 0.0;
        }
        psd[start_bin..end_bin].iter().sum()
    }

    /// Extract power for a standard EEG band
    #[must_use]
    pub fn eeg_band_power(&self, psd: &[f64], band: EegBand) -> f64 {
        let (low, high) = band.range_hz();
        self.band_power(psd, f64::from(low), f64::from(high))
    }

    /// Extract all standard EEG band powers
    #[must_use]
    pub fn all_band_powers(&self, psd: &[f64]) -> BandPowers {
        BandPowers {
            delta: self.eeg_band_power(psd, EegBand::Delta),
            theta: self.eeg_band_power(psd, EegBand::Theta),
            alpha: self.eeg_band_power(psd, EegBand::Alpha),
            beta: self.eeg_band_power(psd, EegBand::Beta),
            gamma: self.eeg_band_power(psd, EegBand::Gamma),
        }
    }

    /// Mean band powers over consecutive non-overlapping FFT segments.
    ///
    /// Trailing samples that do not fill a whole segment are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptySegment`] for a zero `fft_size`, or
    /// [`PipelineError::InsufficientSamples`] if the window holds less than
    /// one segment.
    pub fn mean_band_powers(&mut self, window: &[f64]) -> Result<BandPowers, PipelineError> {
        let segments = window
            .len()
            .checked_div(self.fft_size)
            .ok_or(PipelineError::EmptySegment)?;
        if segments == 0 {
            return Err(PipelineError::InsufficientSamples {
                got: window.len(),
                need: self.fft_size,
            });
        }

        let mut sum = BandPowers::default();
        for segment in window.chunks_exact(self.fft_size) {
            let psd = self.compute_psd(segment)?;
            sum = sum + self.all_band_powers(&psd);
        }

        Ok(sum.scale(1.0 / segments as f64))
    }
}

/// EEG band powers container
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BandPowers {
    /// Delta band power (0.5-4 Hz)
    pub delta: f64,
    /// Theta band power (4-8 Hz)
    pub theta: f64,
    /// Alpha band power (8-13 Hz)
    pub alpha: f64,
    /// Beta band power (13-30 Hz)
    pub beta: f64,
    /// Gamma band power (30-100 Hz)
    pub gamma: f64,
}

impl BandPowers {
    /// Total power across all bands
    #[must_use]
    pub fn total(&self) -> f64 {
        self.delta + self.theta + self.alpha + self.beta + self.gamma
    }

    fn scale(self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            theta: self.theta * factor,
            alpha: self.alpha * factor,
            beta: self.beta * factor,
            gamma: self.gamma * factor,
        }
    }
}

impl std::ops::Add for BandPowers {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            delta: self.delta + rhs.delta,
            theta: self.theta + rhs.theta,
            alpha: self.alpha + rhs.alpha,
            beta: self.beta + rhs.beta,
            gamma: self.gamma + rhs.gamma,
        }
    }
}

/// Generate Hann window coefficients
fn hann_window(size: usize) -> Vec<f64> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (size - 1) as f64).cos())
        })
        .collect()
}
