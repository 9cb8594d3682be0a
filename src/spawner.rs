//! Timed creation of enemies and fuel tanks.
//!
//! Both kinds run on their own accumulator.  When an accumulator reaches its
//! interval it fires once and goes back to zero; the overshoot is dropped
//! rather than carried, so long frames stretch the period slightly instead
//! of bunching spawns together.

use rand::Rng;

use crate::config::{EnemyConfig, FuelConfig, SpawnerConfig};
use crate::entities::{Enemy, EnemyKind, FuelPickup};

#[derive(Clone, Debug, PartialEq)]
pub struct IntervalTimer {
    pub elapsed: f32,
    pub interval: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Add `dt`; returns `true` (and resets to zero) when the interval is hit.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// What one spawner tick produced.
#[derive(Debug, Default)]
pub struct Spawned {
    pub enemy: Option<Enemy>,
    pub fuel_pickup: Option<FuelPickup>,
}

#[derive(Clone, Debug)]
pub struct Spawner {
    pub enemy_timer: IntervalTimer,
    pub fuel_timer: IntervalTimer,
    pub spawn_y: f32,
    pub enemy: EnemyConfig,
    pub fuel: FuelConfig,
}

impl Spawner {
    pub fn new(config: &SpawnerConfig, enemy: EnemyConfig, fuel: FuelConfig) -> Self {
        Self {
            enemy_timer: IntervalTimer::new(config.enemy_interval),
            fuel_timer: IntervalTimer::new(config.fuel_interval),
            spawn_y: config.spawn_y,
            enemy,
            fuel,
        }
    }

    /// Advance both timers.  All randomness comes through `rng` so tests can
    /// seed it.
    pub fn tick(&mut self, dt: f32, canvas_width: f32, rng: &mut impl Rng) -> Spawned {
        let mut spawned = Spawned::default();

        if self.enemy_timer.tick(dt) {
            let x = random_x(rng, canvas_width, self.enemy.width);
            spawned.enemy = Some(Enemy::new(EnemyKind::Plane, x, self.spawn_y, &self.enemy));
        }
        if self.fuel_timer.tick(dt) {
            let x = random_x(rng, canvas_width, self.fuel.width);
            spawned.fuel_pickup = Some(FuelPickup::new(x, self.spawn_y, &self.fuel));
        }

        spawned
    }
}

/// Uniform left edge in `[0, canvas_width - entity_width]`; 0 when the
/// entity does not fit.
fn random_x(rng: &mut impl Rng, canvas_width: f32, entity_width: f32) -> f32 {
    let max_x = canvas_width - entity_width;
    if max_x > 0.0 {
        rng.gen_range(0.0..=max_x)
    } else {
        0.0
    }
}
