//! Concentration classifier
//!
//! Maps mean alpha and beta band power to a concentration result code by
//! looking the beta/alpha ratio up in a [`ThresholdTable`]. Each successful
//! classification emits one `info` event carrying the ratio.

use serde::Serialize;
use tracing::info;

use neurofocus_core::threshold::{beta_alpha_ratio, LevelThresholds, ThresholdTable};
use neurofocus_core::types::{ConcentrationLevel, RankScheme};
use neurofocus_core::ClassifyError;

/// Outcome of a single classification
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Classification {
    /// Matched level
    pub level: ConcentrationLevel,
    /// Result code of `level` under the table's rank scheme
    pub rank: u8,
    /// Beta/alpha ratio that was looked up
    pub ratio: f64,
}

/// Threshold-ladder classifier.
///
/// Immutable after construction, so one instance can be shared across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct ConcentrationClassifier {
    table: ThresholdTable,
}

impl ConcentrationClassifier {
    /// Create a classifier over an existing table
    #[must_use]
    pub fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    /// Build the table and the classifier in one step
    ///
    /// # Errors
    ///
    /// Propagates table validation errors from [`ThresholdTable::new`].
    pub fn with_thresholds(
        thresholds: LevelThresholds,
        scheme: RankScheme,
    ) -> Result<Self, ClassifyError> {
        Ok(Self::new(ThresholdTable::new(thresholds, scheme)?))
    }

    /// Threshold table in use
    #[must_use]
    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// Classify band power and return the result code.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::ZeroAlphaPower`] if `mean_alpha_power` is zero
    /// - [`ClassifyError::NonFiniteInput`] / [`ClassifyError::NonFiniteRatio`]
    ///   for NaN, infinite or overflowing inputs
    pub fn classify(&self, mean_alpha_power: f64, mean_beta_power: f64) -> Result<u8, ClassifyError> {
        self.classify_detailed(mean_alpha_power, mean_beta_power)
            .map(|c| c.rank)
    }

    /// Classify band power and return level, rank and ratio.
    ///
    /// # Errors
    ///
    /// Same as [`Self::classify`].
    pub fn classify_detailed(
        &self,
        mean_alpha_power: f64,
        mean_beta_power: f64,
    ) -> Result<Classification, ClassifyError> {
        let ratio = beta_alpha_ratio(mean_alpha_power, mean_beta_power)?;
        Ok(self.classify_ratio(ratio))
    }

    /// Classify a precomputed beta/alpha ratio.
    ///
    /// Ratios below every threshold, including NaN, resolve to NONE.
    pub fn classify_ratio(&self, ratio: f64) -> Classification {
        let tier = self.table.lookup(ratio);

        info!(ratio, level = tier.level.name(), rank = tier.rank, "Beta Alpha Ratio: {}", ratio);

        Classification { level: tier.level, rank: tier.rank, ratio }
    }
}
