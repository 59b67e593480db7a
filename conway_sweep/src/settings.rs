// settings.rs - Host configuration: engine settings plus window and clock options

use std::path::Path;
use std::time::Duration;

use conway::{ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Files tried, in order, when no `--config` is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["conway-sweep.yaml", "config.yaml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Side of one cell on screen, in points
    pub cell_px: f32,
    /// Driving clock cadence
    pub tick_ms: u64,
    /// Start with the clock stopped
    pub start_paused: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            cell_px: 8.0,
            tick_ms: 50,
            start_paused: false,
        }
    }
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load `explicit` if given (errors are fatal), otherwise the first
    /// default path that parses, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            log::info!("Loaded config from: {}", path.display());
            return Ok(config);
        }

        for path in DEFAULT_CONFIG_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    log::info!("Loaded config from: {}", path);
                    return Ok(config);
                }
                Err(e) => log::warn!("Ignoring {}: {}", path, e),
            }
        }

        log::info!("Using default configuration");
        Ok(Self::default())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if !(self.cell_px.is_finite() && self.cell_px >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_px must be at least 1, got {}",
                self.cell_px
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".into()));
        }
        Ok(())
    }
}
