//! Core types for concentration classification
//!
//! This module provides:
//! - EEG frequency band definitions
//! - Concentration levels and the rank schemes that map them to result codes

use serde::{Deserialize, Serialize};

// ============================================================================
// EEG Frequency Bands
// ============================================================================

/// Standard EEG frequency band definitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EegBand {
    /// Delta: 0.5-4 Hz (deep sleep)
    Delta,
    /// Theta: 4-8 Hz (drowsiness, memory)
    Theta,
    /// Alpha: 8-13 Hz (relaxed, eyes closed)
    Alpha,
    /// Beta: 13-30 Hz (active thinking)
    Beta,
    /// Gamma: 30-100 Hz (cognitive processing)
    Gamma,
}

impl EegBand {
    /// Get the frequency range for this band (low, high) in Hz
    #[inline]
    #[must_use]
    pub const fn range_hz(self) -> (f32, f32) {
        match self {
            Self::Delta => (0.5, 4.0),
            Self::Theta => (4.0, 8.0),
            Self::Alpha => (8.0, 13.0),
            Self::Beta => (13.0, 30.0),
            Self::Gamma => (30.0, 100.0),
        }
    }

    /// Get the band name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delta => "Delta",
            Self::Theta => "Theta",
            Self::Alpha => "Alpha",
            Self::Beta => "Beta",
            Self::Gamma => "Gamma",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EegBand {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

// ============================================================================
// Concentration Levels
// ============================================================================

/// Concentration tiers, ordered from least to most severe.
///
/// The derived ordering is severity, not the result code. Result codes
/// come from a [`RankScheme`] so that the NONE/LOW collision is an explicit
/// choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConcentrationLevel {
    /// No measurable concentration
    None,
    /// Low concentration
    Low,
    /// Medium concentration
    Medium,
    /// High concentration
    High,
    /// Really high concentration
    ReallyHigh,
}

impl ConcentrationLevel {
    /// All levels in ascending severity.
    pub const ALL: [Self; 5] = [Self::None, Self::Low, Self::Medium, Self::High, Self::ReallyHigh];

    /// Position in the severity ladder (0 = NONE, 4 = REALLY_HIGH)
    #[inline]
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::ReallyHigh => 4,
        }
    }

    /// Result code of this level under `scheme`
    #[inline]
    #[must_use]
    pub const fn rank(self, scheme: RankScheme) -> u8 {
        scheme.rank_of(self)
    }

    /// Get the level name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::ReallyHigh => "REALLY_HIGH",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConcentrationLevel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Mapping from concentration level to externally visible result code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScheme {
    /// NONE=0, LOW=0, MEDIUM=1, HIGH=2, REALLY_HIGH=3.
    ///
    /// Matches the result codes downstream consumers already receive;
    /// NONE and LOW cannot be told apart.
    #[default]
    Observed,
    /// NONE=0, LOW=1, MEDIUM=2, HIGH=3, REALLY_HIGH=4
    Distinct,
}

impl RankScheme {
    /// Result code for `level`
    #[must_use]
    pub const fn rank_of(self, level: ConcentrationLevel) -> u8 {
        match (self, level) {
            (Self::Observed, ConcentrationLevel::None | ConcentrationLevel::Low) => 0,
            (Self::Observed, ConcentrationLevel::Medium) => 1,
            (Self::Observed, ConcentrationLevel::High) => 2,
            (Self::Observed, ConcentrationLevel::ReallyHigh) => 3,
            (Self::Distinct, level) => level.severity(),
        }
    }

    /// Highest result code this scheme can produce
    #[must_use]
    pub const fn max_rank(self) -> u8 {
        self.rank_of(ConcentrationLevel::ReallyHigh)
    }

    /// Scheme name as used in configuration files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Distinct => "distinct",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
