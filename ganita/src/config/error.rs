//! Configuration loading errors.

use thiserror::Error;

/// Config load error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Values parsed but describe an unusable camera
    #[error("Invalid config: {0}")]
    Invalid(String),
}
