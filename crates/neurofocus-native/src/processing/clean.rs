//! Signal cleaning stages
//!
//! A [`SignalCleaner`] takes a raw EEG window and returns a cleaned one.
//! The default stage is a 4-40 Hz IIR band-pass. Artifact rejection (ICA or
//! similar) is provided by the caller as another stage, usually a closure
//! wrapping an external service, and chained with [`SignalCleaner::then`]:
//!
//! ```
//! use neurofocus_native::processing::clean::{BandpassCleaner, SignalCleaner};
//! use neurofocus_native::PipelineError;
//!
//! let artifact_rejection = |w: &[f64]| -> Result<Vec<f64>, PipelineError> { Ok(w.to_vec()) };
//! let mut cleaner = BandpassCleaner::new(250.0, 4.0, 40.0).then(artifact_rejection);
//!
//! let cleaned = cleaner.clean(&[0.0; 64]).unwrap();
//! assert_eq!(cleaned.len(), 64);
//! ```

use crate::error::PipelineError;
use crate::processing::filters::BandpassFilter;

/// Default pre-processing passband (Hz)
pub const DEFAULT_PASSBAND_HZ: (f64, f64) = (4.0, 40.0);

/// A stage that turns a raw window into a cleaned window.
pub trait SignalCleaner {
    /// Clean one window. Windows are independent; no state carries over.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`PipelineError`]; external
    /// stages typically use [`PipelineError::Cleaner`].
    fn clean(&mut self, window: &[f64]) -> Result<Vec<f64>, PipelineError>;

    /// Run `next` on the output of this stage
    fn then<B: SignalCleaner>(self, next: B) -> Chain<Self, B>
    where
        Self: Sized,
    {
        Chain { first: self, second: next }
    }
}

impl<F> SignalCleaner for F
where
    F: FnMut(&[f64]) -> Result<Vec<f64>, PipelineError>,
{
    fn clean(&mut self, window: &[f64]) -> Result<Vec<f64>, PipelineError> {
        self(window)
    }
}

/// Two cleaning stages run back to back.
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: SignalCleaner, B: SignalCleaner> SignalCleaner for Chain<A, B> {
    fn clean(&mut self, window: &[f64]) -> Result<Vec<f64>, PipelineError> {
        let intermediate = self.first.clean(window)?;
        self.second.clean(&intermediate)
    }
}

/// Leaves the window untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl SignalCleaner for PassThrough {
    fn clean(&mut self, window: &[f64]) -> Result<Vec<f64>, PipelineError> {
        Ok(window.to_vec())
    }
}

/// IIR band-pass stage.
///
/// Runs one forward pass of second-order Butterworth high-pass and
/// low-pass sections, so it introduces phase delay; a close approximation
/// of a zero-phase 4th-order band-pass, not a reproduction of one.
#[derive(Clone, Debug)]
pub struct BandpassCleaner {
    filter: BandpassFilter,
}

impl BandpassCleaner {
    /// Band-pass between `low_hz` and `high_hz`
    #[must_use]
    pub fn new(sample_rate: f64, low_hz: f64, high_hz: f64) -> Self {
        Self { filter: BandpassFilter::new(sample_rate, low_hz, high_hz) }
    }

    /// Band-pass over [`DEFAULT_PASSBAND_HZ`]
    #[must_use]
    pub fn with_default_passband(sample_rate: f64) -> Self {
        let (low, high) = DEFAULT_PASSBAND_HZ;
        Self::new(sample_rate, low, high)
    }

    /// Passband edges (low, high) in Hz
    #[must_use]
    pub fn passband(&self) -> (f64, f64) {
        self.filter.cutoffs()
    }
}

impl SignalCleaner for BandpassCleaner {
    fn clean(&mut self, window: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if let Some(index) = window.iter().position(|s| !s.is_finite()) {
            return Err(PipelineError::NonFiniteSample { index });
        }
        Ok(self.filter.filter_window(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        let mut cleaner = PassThrough;
        assert_eq!(cleaner.clean(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_chain_runs_in_order() {
        let double = |w: &[f64]| -> Result<Vec<f64>, PipelineError> {
            Ok(w.iter().map(|x| x * 2.0).collect())
        };
        let add_one = |w: &[f64]| -> Result<Vec<f64>, PipelineError> {
            Ok(w.iter().map(|x| x + 1.0).collect())
        };

        let mut chain = double.then(add_one);
        assert_eq!(chain.clean(&[1.0, 3.0]).unwrap(), vec![3.0, 7.0]);
    }

    #[test]
    fn test_external_stage_error_propagates() {
        let failing = |_: &[f64]| -> Result<Vec<f64>, PipelineError> {
            Err(PipelineError::Cleaner { reason: "ica did not converge".to_string() })
        };
        let mut chain = BandpassCleaner::with_default_passband(250.0).then(failing);

        let err = chain.clean(&[0.0; 32]).unwrap_err();
        assert!(matches!(err, PipelineError::Cleaner { .. }));
    }

    #[test]
    fn test_bandpass_rejects_nan() {
        let mut cleaner = BandpassCleaner::with_default_passband(250.0);
        let err = cleaner.clean(&[0.0, f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::NonFiniteSample { index: 1 }));
    }

    #[test]
    fn test_default_passband() {
        let cleaner = BandpassCleaner::with_default_passband(250.0);
        assert_eq!(cleaner.passband(), (4.0, 40.0));
    }
}
