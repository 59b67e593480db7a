// lib.rs - Conway's Game of Life on a torus, stepped one cell at a time

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod speed;
pub mod trail;

pub use config::EngineConfig;
pub use engine::{Snapshot, SweepEngine};
pub use error::{ConfigError, EngineError};
pub use grid::{Buffer, GridBuffers, COLS, ROWS, TOTAL};
pub use patterns::{Pattern, PATTERNS};
pub use speed::{Speed, SpeedPreset};
pub use trail::{Trail, TrailMark};
