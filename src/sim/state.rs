//! Game state and core simulation types
//!
//! Everything a presentation layer needs to draw a frame lives here as plain
//! data. Positions are playfield units, velocities are units per tick and
//! timers count ticks.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Idle, waiting for the start control
    Start,
    /// Active simulation
    Playing,
    /// Lives exhausted, waiting for reset
    GameOver,
}

/// Which wing gun fires next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GunSide {
    Left,
    Right,
}

impl GunSide {
    pub fn flipped(self) -> Self {
        match self {
            GunSide::Left => GunSide::Right,
            GunSide::Right => GunSide::Left,
        }
    }

    /// Horizontal sign of the gun relative to the ship center
    pub fn sign(self) -> f32 {
        match self {
            GunSide::Left => -1.0,
            GunSide::Right => 1.0,
        }
    }
}

/// The player's ship (position is the box center)
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Cosmetic phase for engine/gun pulsing
    pub anim_time: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_spawn(),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            anim_time: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Launch point for torpedoes (top edge, centered)
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.size.y / 2.0)
    }
}

/// An auto-fire round (position is the box center)
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed per tick
    pub speed: f32,
    pub damage: i32,
    /// Cosmetic pulse phase
    pub phase: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A homing torpedo (position is the box center)
#[derive(Debug, Clone, Serialize)]
pub struct Torpedo {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub time_alive: u32,
    pub exploded: bool,
    /// Ticks spent in the pool since detonation
    pub grace_ticks: u32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Torpedo {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Append the current position, dropping the oldest beyond `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }
}

/// A descending enemy (position is the box top-left corner)
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Cosmetic hit flash countdown
    pub damage_flash: u32,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// A torpedo blast ring growing linearly to its max radius
#[derive(Debug, Clone, Serialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub elapsed: u32,
    pub duration: u32,
}

impl Explosion {
    pub fn new(origin: Vec2, max_radius: f32, duration: u32) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            elapsed: 0,
            duration,
        }
    }

    /// Advance one tick; returns false once the blast has finished
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        self.radius = self.elapsed as f32 / self.duration as f32 * self.max_radius;
        self.elapsed < self.duration
    }
}

/// Particle burst flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Enemy destroyed
    Destroyed,
    /// Enemy damaged but alive
    Hit,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// One exhaust puff behind the ship
#[derive(Debug, Clone, Serialize)]
pub struct EngineTrail {
    pub pos: Vec2,
    /// Downward drift per tick
    pub vy: f32,
    pub life: u32,
}

/// Star color classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StarTint {
    White,
    Blue,
    Yellow,
    Orange,
}

impl StarTint {
    pub const ALL: [StarTint; 4] = [StarTint::White, StarTint::Blue, StarTint::Yellow, StarTint::Orange];
}

/// A background star
#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Scroll speed per tick (parallax layer)
    pub speed: f32,
    pub tint: StarTint,
    pub twinkle: f32,
    pub twinkle_speed: f32,
}

/// A soft background cloud
#[derive(Debug, Clone, Serialize)]
pub struct NebulaCloud {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Downward drift per tick
    pub drift: f32,
}

/// Numbers shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub player: Player,
    /// Ticks until the next auto-fire shot
    pub fire_cooldown: u32,
    pub next_gun: GunSide,
    /// Ticks until another torpedo may launch
    pub torpedo_cooldown: u32,
    pub bullets: Vec<Bullet>,
    pub torpedoes: Vec<Torpedo>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    pub engine_trails: VecDeque<EngineTrail>,
    pub stars: Vec<Star>,
    pub nebulae: Vec<NebulaCloud>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the `Start` phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session with custom tuning; invalid tuning is replaced by the
    /// defaults
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Tuning::default()
            }
        };

        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: tuning.starting_lives,
            time_ticks: 0,
            player: Player::new(&tuning),
            fire_cooldown: 0,
            next_gun: GunSide::Left,
            torpedo_cooldown: 0,
            bullets: Vec::new(),
            torpedoes: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            particles: Vec::new(),
            engine_trails: VecDeque::new(),
            stars: Vec::new(),
            nebulae: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };

        super::pools::init_background(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            phase: self.phase,
        }
    }

    /// Empty every transient pool (background is kept)
    pub fn clear_pools(&mut self) {
        self.bullets.clear();
        self.torpedoes.clear();
        self.enemies.clear();
        self.explosions.clear();
        self.particles.clear();
        self.engine_trails.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 520.0));
        assert_eq!(state.stars.len(), 150);
        assert_eq!(state.nebulae.len(), 3);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_explosion_grows_to_max_then_ends() {
        let mut explosion = Explosion::new(Vec2::ZERO, 100.0, 20);
        let mut last = explosion.radius;
        for _ in 0..19 {
            assert!(explosion.advance());
            assert!(explosion.radius >= last);
            last = explosion.radius;
        }
        assert!(!explosion.advance());
        assert_eq!(explosion.elapsed, 20);
        assert_eq!(explosion.radius, 100.0);
    }

    #[test]
    fn test_torpedo_trail_is_bounded_fifo() {
        let mut torpedo = Torpedo {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::new(12.0, 20.0),
            time_alive: 0,
            exploded: false,
            grace_ticks: 0,
            trail: VecDeque::new(),
        };
        for i in 0..12 {
            torpedo.pos = Vec2::new(i as f32, 0.0);
            torpedo.record_trail(8);
        }
        assert_eq!(torpedo.trail.len(), 8);
        assert_eq!(torpedo.trail.front(), Some(&Vec2::new(4.0, 0.0)));
        assert_eq!(torpedo.trail.back(), Some(&Vec2::new(11.0, 0.0)));
    }

    #[test]
    fn test_enemy_center_uses_top_left_origin() {
        let enemy = Enemy {
            id: 1,
            pos: Vec2::new(100.0, -40.0),
            vel: Vec2::ZERO,
            size: Vec2::splat(40.0),
            health: 5,
            max_health: 5,
            damage_flash: 0,
        };
        assert_eq!(enemy.center(), Vec2::new(120.0, -20.0));
    }

    #[test]
    fn test_invalid_tuning_replaced_by_defaults() {
        let tuning = Tuning {
            enemy_spawn_chance: 1.5,
            starting_lives: 7,
            ..Default::default()
        };
        let state = GameState::with_tuning(3, tuning);
        assert_eq!(state.tuning, Tuning::default());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_gun_side_alternates() {
        assert_eq!(GunSide::Left.flipped(), GunSide::Right);
        assert_eq!(GunSide::Right.flipped().flipped(), GunSide::Right);
    }
}
