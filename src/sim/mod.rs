//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed logical step per tick
//! - Seeded RNG only
//! - Stable iteration order (pool insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod player;
pub mod pools;
pub mod state;
pub mod tick;
pub mod weapons;

pub use collision::{Aabb, DamageOutcome, damage_enemy, resolve_collisions};
pub use player::update_player;
pub use state::{
    Bullet, BurstKind, Enemy, EngineTrail, Explosion, GamePhase, GameState, GunSide, Hud,
    NebulaCloud, Particle, Player, Star, StarTint, Torpedo,
};
pub use tick::{TickInput, reset, start, tick};
pub use weapons::{launch_torpedo, nearest_enemy, steer_torpedo};
