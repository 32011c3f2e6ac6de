//! Error types for Ganita.
//!
//! Arithmetic never fails; IEEE-754 special values carry numeric problems.
//! Errors here only cover buffers that are too short and configuration
//! that cannot be loaded.

use thiserror::Error;

use crate::config::ConfigLoadError;

/// Ganita error type
#[derive(Error, Debug)]
pub enum MathError {
    /// A load or store was given fewer floats than it needs.
    #[error("slice too short: need {needed} floats, got {got}")]
    SliceTooShort {
        /// Floats required
        needed: usize,
        /// Floats available
        got: usize,
    },

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Result alias for fallible Ganita operations.
pub type Result<T> = std::result::Result<T, MathError>;
