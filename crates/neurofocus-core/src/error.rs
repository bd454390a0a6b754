//! Error types for concentration classification
//!
//! These errors work in `no_std` environments. They carry the offending
//! values so callers can log or skip a window without extra context.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ConcentrationLevel;

// ============================================================================
// Classification Errors
// ============================================================================

/// Errors from ratio computation and threshold table construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassifyError {
    /// Mean alpha power is zero, so the beta/alpha ratio is undefined
    ZeroAlphaPower {
        /// Beta power that was supplied alongside the zero alpha power
        beta: f64,
    },
    /// A band power input was NaN or infinite
    NonFiniteInput {
        /// Mean alpha power as supplied
        alpha: f64,
        /// Mean beta power as supplied
        beta: f64,
    },
    /// The division produced a non-finite ratio (e.g. subnormal alpha)
    NonFiniteRatio {
        /// Mean alpha power as supplied
        alpha: f64,
        /// Mean beta power as supplied
        beta: f64,
    },
    /// A threshold value was NaN or infinite
    InvalidThreshold {
        /// Level the threshold belongs to
        level: ConcentrationLevel,
        /// The rejected value
        value: f64,
    },
    /// A more severe level has a lower threshold than a less severe one
    NonMonotonicThresholds {
        /// The less severe level
        lower: ConcentrationLevel,
        /// Its threshold
        lower_threshold: f64,
        /// The more severe level
        higher: ConcentrationLevel,
        /// Its (smaller) threshold
        higher_threshold: f64,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAlphaPower { beta } => {
                write!(f, "Mean alpha power is zero (beta {beta}), ratio undefined")
            }
            Self::NonFiniteInput { alpha, beta } => {
                write!(f, "Non-finite band power: alpha {alpha}, beta {beta}")
            }
            Self::NonFiniteRatio { alpha, beta } => {
                write!(f, "Beta/alpha ratio is not finite: {beta} / {alpha}")
            }
            Self::InvalidThreshold { level, value } => {
                write!(f, "Invalid threshold for {}: {value}", level.name())
            }
            Self::NonMonotonicThresholds { lower, lower_threshold, higher, higher_threshold } => {
                write!(
                    f,
                    "Thresholds must not decrease: {} = {lower_threshold} > {} = {higher_threshold}",
                    lower.name(),
                    higher.name()
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClassifyError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ClassifyError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ZeroAlphaPower { .. } => defmt::write!(f, "Zero alpha power"),
            Self::NonFiniteInput { .. } => defmt::write!(f, "Non-finite band power"),
            Self::NonFiniteRatio { .. } => defmt::write!(f, "Non-finite ratio"),
            Self::InvalidThreshold { level, .. } => {
                defmt::write!(f, "Invalid threshold: {}", level.name());
            }
            Self::NonMonotonicThresholds { lower, higher, .. } => {
                defmt::write!(f, "Non-monotonic: {} > {}", lower.name(), higher.name());
            }
        }
    }
}
