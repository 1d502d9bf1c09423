//! Nova Strike - A vertical arcade shooter with homing torpedoes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, weapons, collisions, game state)
//! - `platform`: Input mapping and frame-to-tick clock for the host
//! - `tuning`: Data-driven game balance
//! - `game`: Host-facing session wrapper tying the above together
//!
//! Rendering and HUD wiring live outside this crate. A presentation layer
//! reads `sim::GameState` after every frame and never mutates it except
//! through input events and the `start`/`reset` controls.

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (all velocities are per tick)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default seed for the headless demo
    pub const DEFAULT_SEED: u64 = 0x5EED_2024;
}

/// Rescale `vel` so its length does not exceed `max_speed`, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}
