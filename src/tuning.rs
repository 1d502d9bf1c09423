//! Game balance values
//!
//! Every gameplay constant lives here so a session can be driven from a
//! JSON file. Missing fields fall back to the defaults below.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Reasons a tuning file is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// File could not be read
    Io { path: String, message: String },
    /// JSON did not parse into a `Tuning`
    Parse { message: String },
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read tuning file {path}: {message}"),
            Self::Parse { message } => write!(f, "malformed tuning JSON: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Data-driven balance for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance of the spawn point above the bottom edge
    pub player_spawn_offset: f32,
    pub player_acceleration: f32,
    /// Multiplicative velocity retention per tick
    pub player_friction: f32,
    pub player_max_speed: f32,

    // === Auto-fire ===
    /// Ticks between shots
    pub fire_interval: u32,
    /// Gun offset from the ship center as a fraction of ship width
    pub wing_offset_ratio: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,

    // === Torpedo ===
    pub torpedo_cooldown: u32,
    pub torpedo_width: f32,
    pub torpedo_height: f32,
    pub torpedo_launch_speed: f32,
    pub torpedo_acceleration: f32,
    pub torpedo_max_speed: f32,
    /// Ticks alive before the time fuse fires
    pub torpedo_fuse_ticks: u32,
    /// Detonate once y drops below this altitude
    pub torpedo_fuse_altitude: f32,
    /// Extra ticks an exploded torpedo stays in the pool
    pub torpedo_grace_ticks: u32,
    pub torpedo_trail_length: usize,
    pub explosion_radius: f32,
    pub explosion_damage: i32,
    pub explosion_duration: u32,

    // === Enemies ===
    /// Independent spawn probability per tick
    pub enemy_spawn_chance: f64,
    pub enemy_size: f32,
    pub enemy_min_health: i32,
    pub enemy_max_health: i32,
    pub enemy_min_descent: f32,
    pub enemy_max_descent: f32,
    pub enemy_max_drift: f32,
    pub damage_flash_ticks: u32,
    pub score_per_kill: u64,

    // === Session ===
    pub starting_lives: u8,

    // === Background ===
    pub star_count: usize,
    pub nebula_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_width: 40.0,
            player_height: 50.0,
            player_spawn_offset: 80.0,
            player_acceleration: 0.8,
            player_friction: 0.92,
            player_max_speed: 5.0,

            fire_interval: 3,
            wing_offset_ratio: 0.35,
            bullet_width: 5.0,
            bullet_height: 25.0,
            bullet_speed: 8.0,
            bullet_damage: 1,

            torpedo_cooldown: 60,
            torpedo_width: 12.0,
            torpedo_height: 20.0,
            torpedo_launch_speed: 6.0,
            torpedo_acceleration: 0.3,
            torpedo_max_speed: 8.0,
            torpedo_fuse_ticks: 60,
            torpedo_fuse_altitude: 100.0,
            torpedo_grace_ticks: 5,
            torpedo_trail_length: 8,
            explosion_radius: 100.0,
            explosion_damage: 8,
            explosion_duration: 20,

            enemy_spawn_chance: 0.02,
            enemy_size: 40.0,
            enemy_min_health: 5,
            enemy_max_health: 10,
            enemy_min_descent: 2.0,
            enemy_max_descent: 4.0,
            enemy_max_drift: 1.5,
            damage_flash_ticks: 8,
            score_per_kill: 10,

            starting_lives: 3,

            star_count: 150,
            nebula_count: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json).map_err(|e| TuningError::Parse {
            message: e.to_string(),
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn from_path(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|e| TuningError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };

        if self.field_width <= self.player_width || self.field_height <= self.player_height {
            return invalid("field_width/field_height", "playfield must be larger than the ship");
        }
        if self.field_width <= self.enemy_size {
            return invalid("field_width", "playfield must be wider than an enemy");
        }
        if !(self.player_friction > 0.0 && self.player_friction <= 1.0) {
            return invalid("player_friction", "must be in (0, 1]");
        }
        if self.player_max_speed <= 0.0 || self.torpedo_max_speed <= 0.0 {
            return invalid("max_speed", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.enemy_spawn_chance) {
            return invalid("enemy_spawn_chance", "must be a probability in [0, 1]");
        }
        if self.enemy_min_health <= 0 || self.enemy_min_health > self.enemy_max_health {
            return invalid("enemy_min_health", "health range must be positive and non-empty");
        }
        if self.enemy_min_descent >= self.enemy_max_descent {
            return invalid("enemy_min_descent", "descent range must be non-empty");
        }
        if self.enemy_max_drift < 0.0 {
            return invalid("enemy_max_drift", "must not be negative");
        }
        if self.explosion_duration == 0 {
            return invalid("explosion_duration", "must be at least one tick");
        }
        if self.torpedo_trail_length == 0 {
            return invalid("torpedo_trail_length", "must keep at least one point");
        }
        Ok(())
    }

    /// Player spawn point (horizontally centered, near the bottom)
    pub fn player_spawn(&self) -> glam::Vec2 {
        glam::Vec2::new(self.field_width / 2.0, self.field_height - self.player_spawn_offset)
    }
}
