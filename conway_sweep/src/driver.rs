// driver.rs - Tokio clock that feeds real elapsed time to the sweep engine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use conway::SweepEngine;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// The one lock around all engine state. Sweeping, editing and snapshotting
/// each take it for the duration of the call.
pub type SharedEngine = Arc<Mutex<SweepEngine>>;

pub fn share(engine: SweepEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Lock the engine. A panic while holding the lock cannot leave the buffers
/// half-swapped, so a poisoned lock is taken over rather than propagated.
pub fn lock(engine: &SharedEngine) -> MutexGuard<'_, SweepEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the clock task. Dropping it stops the clock.
///
/// Pausing stops the clock, not the engine, which keeps its mid-sweep state.
/// Time spent paused is thrown away so resuming never bursts.
pub struct Driver {
    running: Arc<AtomicBool>,
    cadence: Duration,
    task: JoinHandle<()>,
}

impl Driver {
    pub fn spawn(handle: &Handle, engine: SharedEngine, cadence: Duration, running: bool) -> Self {
        let flag = Arc::new(AtomicBool::new(running));
        let task = handle.spawn(run_clock(engine, Arc::clone(&flag), cadence));
        log::info!(
            "Clock started: cadence {} ms, {}",
            cadence.as_millis(),
            if running { "running" } else { "paused" }
        );

        Self {
            running: flag,
            cadence,
            task,
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn pause(&self) {
        self.running.store(false, Ordering::Release);
        log::debug!("clock paused");
    }

    pub fn resume(&self) {
        self.running.store(true, Ordering::Release);
        log::debug!("clock resumed");
    }

    /// Flip between running and paused. Returns whether the clock now runs.
    pub fn toggle(&self) -> bool {
        let running = !self.running.fetch_xor(true, Ordering::AcqRel);
        log::debug!("clock {}", if running { "resumed" } else { "paused" });
        running
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_clock(engine: SharedEngine, running: Arc<AtomicBool>, cadence: Duration) {
    let mut interval = time::interval(cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        interval.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        if !running.load(Ordering::Acquire) {
            continue;
        }

        let processed = lock(&engine).tick(elapsed.as_secs_f64() * 1000.0);
        log::trace!("tick: {:?} elapsed, {} cells", elapsed, processed);
    }
}
