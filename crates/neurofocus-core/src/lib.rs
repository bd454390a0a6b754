//! Neurofocus Core - `no_std` compatible concentration classification types
//!
//! This crate provides the data model and pure decision logic for
//! classifying concentration from EEG band power. It is designed to work in
//! `no_std` environments (embedded devices) as well as `std` environments.
//!
//! # Modules
//!
//! - [`types`]: EEG bands, concentration levels and rank schemes
//! - [`error`]: Classification and table construction errors
//! - [`threshold`]: Beta/alpha ratio and the threshold ladder
//!
//! # Features
//!
//! - `std`: Enable standard library support (`std::error::Error` impls)
//! - `defmt`: Enable `defmt` formatting for embedded logging
//!
//! # Example
//!
//! ```rust
//! use neurofocus_core::{beta_alpha_ratio, ConcentrationLevel, ThresholdTable};
//!
//! let table = ThresholdTable::default();
//! let tier = table.lookup(beta_alpha_ratio(1.0, 4.5).unwrap());
//!
//! assert_eq!(tier.level, ConcentrationLevel::ReallyHigh);
//! assert_eq!(tier.rank, 3);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod error;
pub mod threshold;
pub mod types;

// Re-export commonly used types at crate root
pub use error::ClassifyError;
pub use threshold::{beta_alpha_ratio, LevelThresholds, ThresholdTable, TierThreshold};
pub use types::{ConcentrationLevel, EegBand, RankScheme};
