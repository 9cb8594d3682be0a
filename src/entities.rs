//! Game entity types and their own per-frame behaviour.
//!
//! Each entity only ever touches its own fields.  Interactions between
//! entities (collisions, pickups, scoring) are resolved by `compute::step`,
//! which reads the others through the [`Bounded`] rectangle alone.

use crate::config::{BulletConfig, CanvasConfig, EnemyConfig, FuelConfig, PlayerConfig};
use crate::geometry::{Bounded, Movable, Rect};
use crate::spawner::Spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Plane,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Collision,
    OutOfFuel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(GameOverReason),
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fuel: f32,
    pub max_fuel: f32,
    pub fuel_drain_rate: f32,
    /// Keyboard movement speed (px/s).
    pub speed: f32,
    pub velocity_x: f32,
    /// Where a drag wants the player's left edge to end up.
    pub target_x: f32,
    pub is_dragging: bool,
    pub drag_smoothing: f32,
    pub snap_epsilon: f32,
    pub bullet_cooldown_remaining: f32,
    pub bullet_cooldown: f32,
    /// Shape of the bullets this player fires.
    pub weapon: BulletConfig,
    pub canvas_width: f32,
}

impl Player {
    /// A fresh craft, horizontally centred, `bottom_offset` above the floor,
    /// with a full tank and a loaded gun.
    pub fn new(config: &PlayerConfig, weapon: BulletConfig, canvas: CanvasConfig) -> Self {
        let x = canvas.width / 2.0 - config.width / 2.0;
        Self {
            x,
            y: canvas.height - config.bottom_offset,
            width: config.width,
            height: config.height,
            fuel: config.max_fuel,
            max_fuel: config.max_fuel,
            fuel_drain_rate: config.fuel_drain_rate,
            speed: config.speed,
            velocity_x: 0.0,
            target_x: x,
            is_dragging: false,
            drag_smoothing: config.drag_smoothing,
            snap_epsilon: config.snap_epsilon,
            bullet_cooldown_remaining: 0.0,
            bullet_cooldown: config.bullet_cooldown,
            weapon,
            canvas_width: canvas.width,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_dragging {
            // Per-frame easing: the craft closes a fixed share of the gap each
            // frame and lands exactly on the target once close enough.
            let dx = self.target_x - self.x;
            if dx.abs() > self.snap_epsilon {
                self.x += dx * self.drag_smoothing;
            } else {
                self.x = self.target_x;
            }
        } else {
            self.x += self.velocity_x * dt;
        }
        self.x = self.x.clamp(0.0, (self.canvas_width - self.width).max(0.0));

        self.fuel = (self.fuel - self.fuel_drain_rate * dt).max(0.0);
        self.bullet_cooldown_remaining = (self.bullet_cooldown_remaining - dt).max(0.0);
    }

    /// Fire a bullet from the nose of the craft, if the gun has cooled down.
    pub fn shoot(&mut self) -> Option<Bullet> {
        if self.bullet_cooldown_remaining > 0.0 {
            return None;
        }
        self.bullet_cooldown_remaining = self.bullet_cooldown;
        let x = self.x + self.width / 2.0 - self.weapon.width / 2.0;
        let y = self.y - self.weapon.height;
        Some(Bullet::new(x, y, &self.weapon))
    }

    pub fn collect_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).min(self.max_fuel);
    }

    /// Whole fuel units left, as shown on the HUD.
    pub fn fuel_display(&self) -> u32 {
        self.fuel.max(0.0).floor() as u32
    }

    pub fn is_moving(&self) -> bool {
        self.is_dragging || self.velocity_x != 0.0
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Descent speed (px/s).
    pub speed: f32,
    pub health: i32,
    pub kind: EnemyKind,
    /// Points awarded when destroyed.
    pub score_value: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, config: &EnemyConfig) -> Self {
        match kind {
            EnemyKind::Plane => Self {
                x,
                y,
                width: config.width,
                height: config.height,
                speed: config.speed,
                health: config.health,
                kind,
                score_value: config.kill_score,
            },
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.y += self.speed * dt;
    }

    /// Returns `true` when this hit destroyed the enemy.  Removal is left to
    /// the caller.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Movable for Enemy {
    fn advance(&mut self, dt: f32) {
        self.update(dt);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Climb speed (px/s).
    pub speed: f32,
    pub damage: i32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, config: &BulletConfig) -> Self {
        Self {
            x,
            y,
            width: config.width,
            height: config.height,
            speed: config.speed,
            damage: config.damage,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Movable for Bullet {
    fn advance(&mut self, dt: f32) {
        self.y -= self.speed * dt;
    }
}

// ── Fuel tanks ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FuelPickup {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Fuel restored on collection.
    pub amount: f32,
}

impl FuelPickup {
    pub fn new(x: f32, y: f32, config: &FuelConfig) -> Self {
        Self {
            x,
            y,
            width: config.width,
            height: config.height,
            speed: config.speed,
            amount: config.amount,
        }
    }
}

impl Bounded for FuelPickup {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Movable for FuelPickup {
    fn advance(&mut self, dt: f32) {
        self.y += self.speed * dt;
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything belonging to one play-through.  Restarting replaces the whole
/// value rather than clearing fields one by one.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub fuel_pickups: Vec<FuelPickup>,
    pub score: u32,
    pub status: GameStatus,
    pub spawner: Spawner,
    /// Play-field size in world pixels.
    pub width: f32,
    pub height: f32,
    /// Longest step `compute::step` will simulate in one go.
    pub max_dt: f32,
    /// Simulated frames since the session started.
    pub frame: u64,
}

impl SessionState {
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }
}
