//! Debt distress tiering.
//!
//! A pure, total mapping from a country's rescue score to a [`RiskTier`],
//! plus a helper that applies it to a whole score table.

pub mod classifier;
pub mod error;

pub use classifier::{RiskClassifier, classify};
pub use core_types::RiskTier;
pub use error::RiskError;
