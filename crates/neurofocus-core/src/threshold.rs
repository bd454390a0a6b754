//! Beta/alpha ratio and the concentration threshold ladder
//!
//! A [`ThresholdTable`] holds one `(level, rank, min_ratio)` entry per
//! [`ConcentrationLevel`], sorted from most to least severe when it is
//! built. Lookup walks the entries front to back and stops at the first
//! threshold the ratio reaches, so the most severe qualifying level wins.
//!
//! # Example
//!
//! ```
//! use neurofocus_core::threshold::{beta_alpha_ratio, ThresholdTable};
//!
//! let table = ThresholdTable::default();
//! let ratio = beta_alpha_ratio(2.0, 8.0).unwrap();
//! assert_eq!(table.lookup(ratio).rank, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::types::{ConcentrationLevel, RankScheme};

/// Compute `mean_beta_power / mean_alpha_power`.
///
/// # Errors
///
/// - [`ClassifyError::NonFiniteInput`] if either power is NaN or infinite
/// - [`ClassifyError::ZeroAlphaPower`] if alpha is zero
/// - [`ClassifyError::NonFiniteRatio`] if the quotient overflows
pub fn beta_alpha_ratio(mean_alpha_power: f64, mean_beta_power: f64) -> Result<f64, ClassifyError> {
    if !mean_alpha_power.is_finite() || !mean_beta_power.is_finite() {
        return Err(ClassifyError::NonFiniteInput {
            alpha: mean_alpha_power,
            beta: mean_beta_power,
        });
    }

    if mean_alpha_power == 0.0 {
        return Err(ClassifyError::ZeroAlphaPower { beta: mean_beta_power });
    }

    let ratio = mean_beta_power / mean_alpha_power;
    if !ratio.is_finite() {
        return Err(ClassifyError::NonFiniteRatio {
            alpha: mean_alpha_power,
            beta: mean_beta_power,
        });
    }

    Ok(ratio)
}

// ============================================================================
// Per-level thresholds
// ============================================================================

/// Minimum beta/alpha ratio for each level.
///
/// Defaults are NONE=0, LOW=0, MEDIUM=3, HIGH=4, REALLY_HIGH=4.5.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    /// NONE threshold
    pub none: f64,
    /// LOW threshold
    pub low: f64,
    /// MEDIUM threshold
    pub medium: f64,
    /// HIGH threshold
    pub high: f64,
    /// REALLY_HIGH threshold
    pub really_high: f64,
}

impl LevelThresholds {
    /// Thresholds currently used in the field.
    pub const OBSERVED: Self = Self {
        none: 0.0,
        low: 0.0,
        medium: 3.0,
        high: 4.0,
        really_high: 4.5,
    };

    /// Threshold configured for `level`
    #[must_use]
    pub const fn get(&self, level: ConcentrationLevel) -> f64 {
        match level {
            ConcentrationLevel::None => self.none,
            ConcentrationLevel::Low => self.low,
            ConcentrationLevel::Medium => self.medium,
            ConcentrationLevel::High => self.high,
            ConcentrationLevel::ReallyHigh => self.really_high,
        }
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self::OBSERVED
    }
}

// ============================================================================
// Threshold Table
// ============================================================================

/// One rung of the threshold ladder.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TierThreshold {
    /// Concentration level
    pub level: ConcentrationLevel,
    /// Result code reported for this level
    pub rank: u8,
    /// Minimum ratio (inclusive) required for this level
    pub min_ratio: f64,
}

/// Immutable threshold ladder, most severe level first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThresholdTable {
    scheme: RankScheme,
    tiers: [TierThreshold; 5],
}

impl ThresholdTable {
    /// Build a table from per-level thresholds.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::InvalidThreshold`] for a NaN or infinite threshold
    /// - [`ClassifyError::NonMonotonicThresholds`] if a more severe level
    ///   has a lower threshold than the level below it
    pub fn new(thresholds: LevelThresholds, scheme: RankScheme) -> Result<Self, ClassifyError> {
        for level in ConcentrationLevel::ALL {
            let value = thresholds.get(level);
            if !value.is_finite() {
                return Err(ClassifyError::InvalidThreshold { level, value });
            }
        }

        for pair in ConcentrationLevel::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            let (lower_threshold, higher_threshold) = (thresholds.get(lower), thresholds.get(higher));
            if higher_threshold < lower_threshold {
                return Err(ClassifyError::NonMonotonicThresholds {
                    lower,
                    lower_threshold,
                    higher,
                    higher_threshold,
                });
            }
        }

        Ok(Self::ladder(thresholds, scheme))
    }

    fn ladder(thresholds: LevelThresholds, scheme: RankScheme) -> Self {
        // ALL is ascending; reverse it so lookup walks highest first
        let tiers = core::array::from_fn(|i| {
            let level = ConcentrationLevel::ALL[ConcentrationLevel::ALL.len() - 1 - i];
            TierThreshold {
                level,
                rank: level.rank(scheme),
                min_ratio: thresholds.get(level),
            }
        });

        Self { scheme, tiers }
    }

    /// Rank scheme used for result codes
    #[must_use]
    pub const fn scheme(&self) -> RankScheme {
        self.scheme
    }

    /// Entries from most to least severe
    pub fn iter(&self) -> impl Iterator<Item = &TierThreshold> {
        self.tiers.iter()
    }

    /// Entry for a specific level
    #[must_use]
    pub fn tier(&self, level: ConcentrationLevel) -> &TierThreshold {
        &self.tiers[self.tiers.len() - 1 - usize::from(level.severity())]
    }

    /// The NONE entry, returned when no threshold is reached
    #[must_use]
    pub fn fallback(&self) -> &TierThreshold {
        self.tier(ConcentrationLevel::None)
    }

    /// Most severe entry whose threshold is `<= ratio`.
    ///
    /// A ratio below every threshold (or NaN) resolves to NONE.
    #[must_use]
    pub fn lookup(&self, ratio: f64) -> TierThreshold {
        self.tiers
            .iter()
            .find(|tier| tier.min_ratio <= ratio)
            .copied()
            .unwrap_or(*self.fallback())
    }

    /// Per-level thresholds this table was built from
    #[must_use]
    pub fn thresholds(&self) -> LevelThresholds {
        LevelThresholds {
            none: self.tier(ConcentrationLevel::None).min_ratio,
            low: self.tier(ConcentrationLevel::Low).min_ratio,
            medium: self.tier(ConcentrationLevel::Medium).min_ratio,
            high: self.tier(ConcentrationLevel::High).min_ratio,
            really_high: self.tier(ConcentrationLevel::ReallyHigh).min_ratio,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::ladder(LevelThresholds::OBSERVED, RankScheme::Observed)
    }
}

// ============================================================================
// Tests
// ============================================================================
