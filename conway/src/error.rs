// error.rs - Error types for the sweep engine and its configuration

use thiserror::Error;

/// Malformed input rejected at the engine boundary. Buffer state is never
/// touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Cell index outside `0..total`.
    #[error("cell index {index} out of range (grid has {total} cells)")]
    CellOutOfRange { index: usize, total: usize },

    /// Speed that is NaN, infinite, zero or negative.
    #[error("invalid speed {0} cells/s")]
    InvalidSpeed(f64),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
