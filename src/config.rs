//! Tunable constants.
//!
//! Every number the simulation uses lives here so a TOML file can override
//! it.  Each section falls back to its `Default` when omitted, and the
//! defaults reproduce the feel of the browser build: a 360×640 portrait
//! field, a plane every 2 s and a fuel tank every 5 s.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub fuel: FuelConfig,
    pub spawner: SpawnerConfig,
    pub frame: FrameConfig,
}

/// Size of the play field in world pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Keyboard movement speed (px/s).
    pub speed: f32,
    pub max_fuel: f32,
    /// Fuel burned per second of flight.
    pub fuel_drain_rate: f32,
    /// Minimum time between two shots (s).
    pub bullet_cooldown: f32,
    /// Fraction of the remaining distance covered per frame while dragging.
    pub drag_smoothing: f32,
    /// Distance under which a drag snaps straight onto its target.
    pub snap_epsilon: f32,
    /// Distance from the bottom of the field to the player's top edge.
    pub bottom_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            speed: 200.0,
            max_fuel: 100.0,
            fuel_drain_rate: 5.0,
            bullet_cooldown: 0.25,
            drag_smoothing: 0.1,
            snap_epsilon: 1.0,
            bottom_offset: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub damage: i32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 12.0,
            speed: 400.0,
            damage: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub kill_score: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 70.0,
            height: 50.0,
            speed: 150.0,
            health: 1,
            kill_score: 100,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FuelConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub amount: f32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 100.0,
            amount: 25.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between enemy spawns.
    pub enemy_interval: f32,
    /// Seconds between fuel tank spawns.
    pub fuel_interval: f32,
    /// Vertical offset new entities appear at, above the visible field.
    pub spawn_y: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            enemy_interval: 2.0,
            fuel_interval: 5.0,
            spawn_y: -50.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    /// Longest step the simulation accepts; larger gaps (a stalled
    /// terminal, a suspended process) are cut down to this.
    pub max_dt: f32,
    pub fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_dt: 0.1, fps: 60 }
    }
}

impl GameConfig {
    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.speed", self.player.speed),
            ("player.max_fuel", self.player.max_fuel),
            ("player.bullet_cooldown", self.player.bullet_cooldown),
            ("bullet.width", self.bullet.width),
            ("bullet.height", self.bullet.height),
            ("bullet.speed", self.bullet.speed),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("enemy.speed", self.enemy.speed),
            ("fuel.width", self.fuel.width),
            ("fuel.height", self.fuel.height),
            ("fuel.speed", self.fuel.speed),
            ("spawner.enemy_interval", self.spawner.enemy_interval),
            ("spawner.fuel_interval", self.spawner.fuel_interval),
            ("frame.max_dt", self.frame.max_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.player.fuel_drain_rate < 0.0 || self.fuel.amount < 0.0 {
            return Err(ConfigError::Invalid(
                "fuel rates and amounts cannot be negative".to_string(),
            ));
        }
        if self.bullet.damage <= 0 || self.enemy.health <= 0 {
            return Err(ConfigError::Invalid(
                "bullet.damage and enemy.health must be at least 1".to_string(),
            ));
        }
        if !(self.player.drag_smoothing > 0.0 && self.player.drag_smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "player.drag_smoothing must be in (0, 1], got {}",
                self.player.drag_smoothing
            )));
        }
        if self.spawner.spawn_y >= 0.0 {
            return Err(ConfigError::Invalid(
                "spawner.spawn_y must place entities above the field".to_string(),
            ));
        }

        let widest = [
            ("player", self.player.width),
            ("enemy", self.enemy.width),
            ("fuel", self.fuel.width),
        ];
        for (name, width) in widest {
            if width > self.canvas.width {
                return Err(ConfigError::Invalid(format!(
                    "{} is wider than the canvas ({} > {})",
                    name, width, self.canvas.width
                )));
            }
        }
        if self.player.bottom_offset < self.player.height
            || self.player.bottom_offset > self.canvas.height
        {
            return Err(ConfigError::Invalid(
                "player.bottom_offset must keep the player inside the field".to_string(),
            ));
        }
        if self.frame.fps == 0 {
            return Err(ConfigError::Invalid("frame.fps must be at least 1".to_string()));
        }

        Ok(())
    }
}
