// SPDX-License-Identifier: MPL-2.0
//! Sparkle particles falling over the closed curtain.
//!
//! Particles are purely decorative. Each one is placed at a random horizontal
//! position with randomized animation timing, and removes itself after a fixed
//! lifetime whatever happens to the controller in the meantime.

use std::time::Duration;

/// Unique identifier for a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(u64);

/// A single sparkle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    /// Horizontal position, in percent of the overlay width (0.0..100.0).
    left_percent: f32,
    /// Delay before the fall animation starts (0..2 s).
    delay: Duration,
    /// Duration of the fall animation (2..5 s).
    duration: Duration,
    /// Timeline position at which the particle was created.
    spawned_at: Duration,
}

impl Particle {
    #[must_use]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    #[must_use]
    pub fn left_percent(&self) -> f32 {
        self.left_percent
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn spawned_at(&self) -> Duration {
        self.spawned_at
    }

    /// Fall progress at `now` (0.0 before the delay elapsed, 1.0 once landed).
    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        let started = self.spawned_at + self.delay;
        if now <= started || self.duration.is_zero() {
            return 0.0;
        }
        ((now - started).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Produces particles with randomized placement and timing.
#[derive(Debug)]
pub struct Spawner {
    rng: fastrand::Rng,
    next_id: u64,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            next_id: 0,
        }
    }

    /// Deterministic spawner for reproducible layouts.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            next_id: 0,
        }
    }

    pub fn spawn(&mut self, now: Duration) -> Particle {
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        Particle {
            id,
            left_percent: self.rng.f32() * 100.0,
            delay: Duration::from_secs_f32(self.rng.f32() * 2.0),
            duration: Duration::from_secs_f32(self.rng.f32() * 3.0 + 2.0),
            spawned_at: now,
        }
    }
}
