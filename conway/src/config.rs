// config.rs - Engine configuration; missing YAML keys fall back to defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{COLS, ROWS};
use crate::speed::{DEFAULT_SWEEP_SECS, MAX_RATE_FACTOR, MIN_RATE};

/// Probability that a cell starts alive when seeding.
pub const DEFAULT_DENSITY: f64 = 0.18;
pub const DEFAULT_TRAIL_TTL_MS: u64 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid width in cells
    pub cols: usize,
    /// Grid height in cells
    pub rows: usize,
    /// Bernoulli probability used by `seed()`
    pub density: f64,
    /// How long a trail mark stays visible
    pub trail_ttl_ms: u64,
    /// Upper bound on stored trail entries (default: 4 per cell)
    pub trail_capacity: Option<usize>,
    /// Slowest allowed rate in cells per second
    pub min_rate: f64,
    /// Fastest allowed rate as a multiple of the cell count
    pub max_rate_factor: f64,
    /// Seconds per sweep at the default speed
    pub default_sweep_secs: f64,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
            density: DEFAULT_DENSITY,
            trail_ttl_ms: DEFAULT_TRAIL_TTL_MS,
            trail_capacity: None,
            min_rate: MIN_RATE,
            max_rate_factor: MAX_RATE_FACTOR,
            default_sweep_secs: DEFAULT_SWEEP_SECS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Config for a `cols` x `rows` grid, everything else default.
    pub fn with_size(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn total(&self) -> usize {
        self.cols * self.rows
    }

    pub fn trail_ttl(&self) -> Duration {
        Duration::from_millis(self.trail_ttl_ms)
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity.unwrap_or(self.total() * 4)
    }

    pub fn default_rate(&self) -> f64 {
        self.total() as f64 / self.default_sweep_secs
    }

    pub fn max_rate(&self) -> f64 {
        self.total() as f64 * self.max_rate_factor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Invalid(format!(
                "density must be within 0..=1, got {}",
                self.density
            )));
        }
        if self.trail_ttl_ms == 0 {
            return Err(ConfigError::Invalid("trail_ttl_ms must be positive".into()));
        }
        if self.trail_capacity == Some(0) {
            return Err(ConfigError::Invalid("trail_capacity must be positive".into()));
        }
        if !(self.min_rate.is_finite() && self.min_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_rate must be positive, got {}",
                self.min_rate
            )));
        }
        if !(self.max_rate_factor.is_finite() && self.max_rate_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_rate_factor must be positive, got {}",
                self.max_rate_factor
            )));
        }
        if !(self.default_sweep_secs.is_finite() && self.default_sweep_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_sweep_secs must be positive, got {}",
                self.default_sweep_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total(), 7200);
        assert_eq!(config.default_rate(), 2400.0);
        assert_eq!(config.max_rate(), 72_000.0);
        assert_eq!(config.trail_capacity(), 28_800);
        assert_eq!(config.trail_ttl(), Duration::from_millis(1200));
    }

    #[test]
    fn test_partial_yaml() {
        let config = EngineConfig::from_yaml("cols: 40\nrows: 20\nseed: 7\n").unwrap();
        assert_eq!(config.total(), 800);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.density, DEFAULT_DENSITY);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_yaml("cols: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("density: 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("default_sweep_secs: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("cols: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
