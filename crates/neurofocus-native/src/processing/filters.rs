//! Digital filters for EEG pre-processing
//!
//! Provides floating-point Butterworth IIR sections for host processing.

use neurofocus_core::types::EegBand;

/// Butterworth IIR filter coefficients (second-order section)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiquadCoeffs {
    /// Numerator coefficients [b0, b1, b2]
    pub b: [f64; 3],
    /// Denominator coefficients [a0=1, a1, a2]
    pub a: [f64; 3],
}

/// Second-order biquad filter section (transposed direct form II)
#[derive(Clone, Debug)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    /// State: [z1, z2]
    state: [f64; 2],
}

impl Biquad {
    /// Create a new biquad section with given coefficients
    #[must_use]
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self { coeffs, state: [0.0, 0.0] }
    }

    /// Create a second-order Butterworth lowpass filter
    #[must_use]
    pub fn lowpass(sample_rate: f64, cutoff: f64) -> Self {
        let k = (std::f64::consts::PI * cutoff / sample_rate).tan();
        let k2 = k * k;
        let sqrt2 = std::f64::consts::SQRT_2;

        let norm = 1.0 / (1.0 + sqrt2 * k + k2);

        Self::new(BiquadCoeffs {
            b: [k2 * norm, 2.0 * k2 * norm, k2 * norm],
            a: [1.0, 2.0 * (k2 - 1.0) * norm, (1.0 - sqrt2 * k + k2) * norm],
        })
    }

    /// Create a second-order Butterworth highpass filter
    #[must_use]
    pub fn highpass(sample_rate: f64, cutoff: f64) -> Self {
        let k = (std::f64::consts::PI * cutoff / sample_rate).tan();
        let k2 = k * k;
        let sqrt2 = std::f64::consts::SQRT_2;

        let norm = 1.0 / (1.0 + sqrt2 * k + k2);

        Self::new(BiquadCoeffs {
            b: [norm, -2.0 * norm, norm],
            a: [1.0, 2.0 * (k2 - 1.0) * norm, (1.0 - sqrt2 * k + k2) * norm],
        })
    }

    /// Process a single sample
    pub fn filter(&mut self, input: f64) -> f64 {
        let BiquadCoeffs { b, a } = self.coeffs;
        let output = b[0] * input + self.state[0];

        self.state[0] = b[1] * input - a[1] * output + self.state[1];
        self.state[1] = b[2] * input - a[2] * output;

        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.state = [0.0, 0.0];
    }
}

/// Bandpass filter built from a highpass and a lowpass section
#[derive(Clone, Debug)]
pub struct BandpassFilter {
    highpass: Biquad,
    lowpass: Biquad,
    low_cutoff: f64,
    high_cutoff: f64,
}

impl BandpassFilter {
    /// Create a bandpass filter for a frequency range
    #[must_use]
    pub fn new(sample_rate: f64, low_cutoff: f64, high_cutoff: f64) -> Self {
        Self {
            highpass: Biquad::highpass(sample_rate, low_cutoff),
            lowpass: Biquad::lowpass(sample_rate, high_cutoff),
            low_cutoff,
            high_cutoff,
        }
    }

    /// Create a bandpass filter for a standard EEG band
    #[must_use]
    pub fn for_band(sample_rate: f64, band: EegBand) -> Self {
        let (low, high) = band.range_hz();
        Self::new(sample_rate, f64::from(low), f64::from(high))
    }

    /// Passband edges (low, high) in Hz
    #[must_use]
    pub fn cutoffs(&self) -> (f64, f64) {
        (self.low_cutoff, self.high_cutoff)
    }

    /// Process a single sample
    pub fn filter(&mut self, input: f64) -> f64 {
        let hp_out = self.highpass.filter(input);
        self.lowpass.filter(hp_out)
    }

    /// Filter a whole window, starting from rest
    pub fn filter_window(&mut self, window: &[f64]) -> Vec<f64> {
        self.reset();
        window.iter().map(|&s| self.filter(s)).collect()
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
    }
}
