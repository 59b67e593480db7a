// engine.rs - Incremental sweep engine: cursor, generations, live edits and trail

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::grid::GridBuffers;
use crate::patterns::{self, Pattern};
use crate::speed::{Speed, SpeedPreset};
use crate::trail::{Trail, TrailMark};

/// Everything a renderer needs for one paint cycle.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    /// Composite state: next-gen for processed cells, current-gen for the rest
    pub cells: Vec<bool>,
    pub cursor: usize,
    pub generation: u64,
    pub population: usize,
    pub trail: Vec<TrailMark>,
    pub trail_ttl: Duration,
    pub rate: f64,
}

impl Snapshot {
    /// Whether cell `i` already holds its value for the generation in progress.
    pub fn is_processed(&self, i: usize) -> bool {
        i < self.cursor
    }

    /// Fraction of the current sweep that is done.
    pub fn progress(&self) -> f64 {
        self.cursor as f64 / self.cells.len() as f64
    }

    pub fn sweep_seconds(&self) -> f64 {
        self.cells.len() as f64 / self.rate
    }
}

/// Owns the two buffers, the sweep cursor, the trail and the speed setting.
///
/// A cursor walks the grid one cell at a time, writing generation N+1 into
/// `next` from the untouched generation N in `current`. For cursor `c`, cells
/// `< c` read from `next` and cells `>= c` read from `current`. Live edits keep
/// both sides of that split in agreement.
pub struct SweepEngine {
    grid: GridBuffers,
    cursor: usize,
    generation: u64,
    trail: Trail,
    speed: Speed,
    density: f64,
    rng: ChaCha8Rng,
}

impl Default for SweepEngine {
    fn default() -> Self {
        Self::build(&EngineConfig::default())
    }
}

impl SweepEngine {
    /// Build an engine with an empty grid. Invalid configs, including zero
    /// dimensions, are rejected.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &EngineConfig) -> Self {
        let total = config.total();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let speed = Speed::new(config.default_rate(), config.min_rate, config.max_rate());
        log::debug!(
            "engine created: {}x{} ({} cells), default rate {:.2} cells/s",
            config.cols,
            config.rows,
            total,
            speed.rate()
        );

        Self {
            grid: GridBuffers::new(config.cols, config.rows),
            cursor: 0,
            generation: 0,
            trail: Trail::new(config.trail_ttl(), config.trail_capacity()),
            speed,
            density: config.density,
            rng,
        }
    }

    /// Engine for a `cols` x `rows` grid with a fixed RNG seed.
    pub fn with_size(cols: usize, rows: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::from_config(&EngineConfig {
            seed: Some(seed),
            ..EngineConfig::with_size(cols, rows)
        })
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn total(&self) -> usize {
        self.grid.total()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &GridBuffers {
        &self.grid
    }

    pub fn speed(&self) -> &Speed {
        &self.speed
    }

    pub fn trail_ttl(&self) -> Duration {
        self.trail.ttl()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Fraction of the current sweep that is done.
    pub fn progress(&self) -> f64 {
        self.cursor as f64 / self.total() as f64
    }

    /// Seconds for one full sweep at the configured rate.
    pub fn sweep_seconds(&self) -> f64 {
        self.speed.sweep_seconds(self.total())
    }

    // ---- lifecycle -------------------------------------------------------

    /// Fill the current generation with independent Bernoulli draws and start over.
    pub fn seed(&mut self) {
        let density = self.density;
        let rng = &mut self.rng;
        self.grid.fill_current(|_| rng.gen_bool(density));
        self.restart();
        log::info!(
            "seeded {} cells at density {:.2}: {} alive",
            self.total(),
            density,
            self.grid.population()
        );
    }

    /// Restart the RNG from `seed`, then `seed()`.
    pub fn reseed_with(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed();
    }

    /// Kill every cell and start over.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.restart();
        log::info!("grid cleared");
    }

    /// Clear the grid and stamp `pattern` in the middle of it.
    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.grid.clear();
        for i in patterns::placed_indices(pattern, self.cols(), self.rows()) {
            self.grid.set_current(i, true);
        }
        self.restart();
        log::info!("loaded pattern {}", pattern.name);
    }

    fn restart(&mut self) {
        self.grid.clear_next();
        self.cursor = 0;
        self.generation = 0;
        self.trail.clear();
        self.speed.reset_accumulator();
    }

    // ---- sweeping --------------------------------------------------------

    pub fn advance(&mut self, budget: usize) {
        self.advance_at(budget, Instant::now());
    }

    /// Process up to `budget` cells, swapping generations each time the
    /// cursor wraps. Budgets larger than the grid run several full sweeps.
    pub fn advance_at(&mut self, budget: usize, now: Instant) {
        let total = self.total();
        let mut remaining = budget;

        while remaining > 0 {
            let end = (self.cursor + remaining).min(total);
            for i in self.cursor..end {
                self.grid.compute_next_at(i);
                self.trail.record(i, now);
            }
            remaining -= end - self.cursor;
            self.cursor = end;

            if self.cursor == total {
                self.complete_sweep(now);
            }
        }
    }

    fn complete_sweep(&mut self, now: Instant) {
        self.grid.swap();
        self.cursor = 0;
        self.generation += 1;
        self.trail.purge(now);
        log::debug!(
            "generation {} complete, {} alive",
            self.generation,
            self.grid.population()
        );
    }

    pub fn tick(&mut self, elapsed_ms: f64) -> usize {
        self.tick_at(elapsed_ms, Instant::now())
    }

    /// Turn `elapsed_ms` into a cell budget at the configured rate and spend it.
    /// Returns the number of cells processed.
    pub fn tick_at(&mut self, elapsed_ms: f64, now: Instant) -> usize {
        let budget = self.speed.accumulate(elapsed_ms);
        if budget > 0 {
            self.advance_at(budget, now);
        }
        budget
    }

    // ---- live editing ----------------------------------------------------

    pub fn toggle_cell(&mut self, i: usize) -> Result<(), EngineError> {
        self.toggle_cell_at(i, Instant::now())
    }

    /// Flip cell `i`. A cell the cursor has already passed is flipped in both
    /// buffers so the composite view and the next generation agree.
    pub fn toggle_cell_at(&mut self, i: usize, now: Instant) -> Result<(), EngineError> {
        let total = self.total();
        if i >= total {
            log::warn!("rejected toggle of cell {} (grid has {} cells)", i, total);
            return Err(EngineError::CellOutOfRange { index: i, total });
        }

        self.grid.flip_current(i);
        if i < self.cursor {
            self.grid.flip_next(i);
        }
        self.trail.record(i, now);
        Ok(())
    }

    // ---- reading ---------------------------------------------------------

    /// Value of cell `i` as a renderer should show it.
    #[inline]
    pub fn composite_at(&self, i: usize) -> bool {
        if i < self.cursor {
            self.grid.next(i)
        } else {
            self.grid.current(i)
        }
    }

    pub fn snapshot_composite(&self) -> Vec<bool> {
        let (done, pending) = (
            &self.grid.next_cells()[..self.cursor],
            &self.grid.current_cells()[self.cursor..],
        );
        done.iter().chain(pending).copied().collect()
    }

    /// Live cells in the composite view.
    pub fn population(&self) -> usize {
        (0..self.total()).filter(|&i| self.composite_at(i)).count()
    }

    /// Purge expired trail entries and return the rest with their ages.
    pub fn active_trail(&mut self, now: Instant) -> Vec<TrailMark> {
        self.trail.active(now)
    }

    pub fn snapshot(&mut self, now: Instant) -> Snapshot {
        let cells = self.snapshot_composite();
        let population = cells.iter().filter(|&&c| c).count();
        Snapshot {
            cols: self.cols(),
            rows: self.rows(),
            cells,
            cursor: self.cursor,
            generation: self.generation,
            population,
            trail: self.trail.active(now),
            trail_ttl: self.trail.ttl(),
            rate: self.speed.rate(),
        }
    }

    // ---- speed -----------------------------------------------------------

    /// Returns the rate actually applied after clamping.
    pub fn set_speed(&mut self, cells_per_second: f64) -> Result<f64, EngineError> {
        match self.speed.set(cells_per_second) {
            Ok(rate) => {
                log::debug!("speed set to {:.2} cells/s", rate);
                Ok(rate)
            }
            Err(err) => {
                log::warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn double_speed(&mut self) -> f64 {
        let rate = self.speed.double();
        log::debug!("speed doubled to {:.2} cells/s", rate);
        rate
    }

    pub fn halve_speed(&mut self) -> f64 {
        let rate = self.speed.halve();
        log::debug!("speed halved to {:.2} cells/s", rate);
        rate
    }

    pub fn reset_speed(&mut self) -> f64 {
        let rate = self.speed.reset();
        log::debug!("speed reset to {:.2} cells/s", rate);
        rate
    }

    pub fn apply_preset(&mut self, preset: SpeedPreset) -> f64 {
        let rate = preset.rate(self.total());
        // Preset rates are positive for any non-empty grid
        self.set_speed(rate).unwrap_or_else(|_| self.speed.rate())
    }
}
