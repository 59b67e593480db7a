// trail.rs - Time-decayed afterglow of processed and edited cells
//
// The trail is purely visual. Nothing in here feeds back into the buffers.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_millis(1200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailEntry {
    pub index: usize,
    pub at: Instant,
}

/// A live trail entry as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailMark {
    pub index: usize,
    pub age: Duration,
}

impl TrailMark {
    /// Linear fade from 1.0 when fresh to 0.0 at `ttl`.
    pub fn intensity(&self, ttl: Duration) -> f32 {
        if ttl.is_zero() {
            return 0.0;
        }
        (1.0 - self.age.as_secs_f32() / ttl.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Bounded log of trail entries.
///
/// Several entries may point at the same cell; they fade independently.
/// Once `capacity` is exceeded the oldest recorded entries are dropped.
#[derive(Clone, Debug)]
pub struct Trail {
    entries: VecDeque<TrailEntry>,
    ttl: Duration,
    capacity: usize,
}

impl Trail {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, index: usize, at: Instant) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(TrailEntry { index, at });
    }

    /// Drop every entry whose age has reached the ttl.
    pub fn purge(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|e| now.saturating_duration_since(e.at) < ttl);
    }

    /// Purge, then report what is left with its age at `now`.
    pub fn active(&mut self, now: Instant) -> Vec<TrailMark> {
        self.purge(now);
        self.entries
            .iter()
            .map(|e| TrailMark {
                index: e.index,
                age: now.saturating_duration_since(e.at),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
