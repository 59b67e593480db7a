// speed.rs - Sweep rate and the fractional cell accumulator

use crate::error::EngineError;

pub const MIN_RATE: f64 = 0.01;
pub const MAX_RATE_FACTOR: f64 = 10.0;
pub const DEFAULT_SWEEP_SECS: f64 = 3.0;

/// Speed presets bound to the number keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedPreset {
    /// One sweep every ten seconds
    Slow,
    /// One sweep every three seconds
    Medium,
    /// One sweep per second
    Fast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 3] = [SpeedPreset::Slow, SpeedPreset::Medium, SpeedPreset::Fast];

    /// Cells per second for a grid of `total` cells.
    pub fn rate(self, total: usize) -> f64 {
        let total = total as f64;
        match self {
            SpeedPreset::Slow => total / 10.0,
            SpeedPreset::Medium => total / 3.0,
            SpeedPreset::Fast => total,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Medium => "medium",
            SpeedPreset::Fast => "fast",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Configured rate in cells per second plus the carried fraction of a cell.
#[derive(Clone, Debug)]
pub struct Speed {
    rate: f64,
    accumulator: f64,
    min_rate: f64,
    max_rate: f64,
    default_rate: f64,
}

impl Speed {
    /// `default_rate` is clamped into `[min_rate, max_rate]`.
    pub fn new(default_rate: f64, min_rate: f64, max_rate: f64) -> Self {
        let max_rate = max_rate.max(min_rate);
        let default_rate = default_rate.clamp(min_rate, max_rate);
        Self {
            rate: default_rate,
            accumulator: 0.0,
            min_rate,
            max_rate,
            default_rate,
        }
    }

    /// Rates for a grid of `total` cells with the stock bounds.
    pub fn for_total(total: usize) -> Self {
        let total = total as f64;
        Self::new(total / DEFAULT_SWEEP_SECS, MIN_RATE, total * MAX_RATE_FACTOR)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn min_rate(&self) -> f64 {
        self.min_rate
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Fraction of a cell carried over to the next tick, always in `[0, 1)`.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Set the rate, clamped to the allowed range. Returns the applied rate.
    pub fn set(&mut self, rate: f64) -> Result<f64, EngineError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::InvalidSpeed(rate));
        }
        self.rate = rate.clamp(self.min_rate, self.max_rate);
        Ok(self.rate)
    }

    pub fn double(&mut self) -> f64 {
        self.rate = (self.rate * 2.0).clamp(self.min_rate, self.max_rate);
        self.rate
    }

    pub fn halve(&mut self) -> f64 {
        self.rate = (self.rate / 2.0).clamp(self.min_rate, self.max_rate);
        self.rate
    }

    pub fn reset(&mut self) -> f64 {
        self.rate = self.default_rate;
        self.rate
    }

    pub fn reset_accumulator(&mut self) {
        self.accumulator = 0.0;
    }

    /// Add `elapsed_ms` worth of cells and take out the whole part as a budget.
    /// Negative, zero or non-finite elapsed time adds nothing. One call never
    /// yields more than `max_rate` cells, one second at top speed.
    pub fn accumulate(&mut self, elapsed_ms: f64) -> usize {
        if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return 0;
        }
        let cells = elapsed_ms * self.rate / 1000.0;
        if !cells.is_finite() {
            return 0;
        }
        self.accumulator = (self.accumulator + cells).min(self.max_rate);
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        whole as usize
    }

    /// Seconds for one full sweep of `total` cells at the current rate.
    pub fn sweep_seconds(&self, total: usize) -> f64 {
        total as f64 / self.rate
    }
}
