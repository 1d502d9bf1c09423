//! Collision detection and damage resolution
//!
//! Entities store their boxes in two conventions: the player, bullets and
//! torpedoes keep the box center, enemies keep the top-left corner. Both are
//! converted to an `Aabb` before any comparison so the conventions never meet.

use glam::Vec2;

use super::pools::spawn_burst;
use super::state::{BurstKind, GamePhase, GameState};

/// Axis-aligned bounding box in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box of `size` whose top-left corner is `top_left`
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// What a hit did to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Enemy survived; a hit burst was emitted
    Damaged,
    /// Enemy was removed; a full burst was emitted and score awarded
    Destroyed,
}

/// Apply `damage` to the enemy at `index`, removing it if health runs out
pub fn damage_enemy(state: &mut GameState, index: usize, damage: i32) -> DamageOutcome {
    let flash = state.tuning.damage_flash_ticks;
    let enemy = &mut state.enemies[index];
    enemy.health -= damage;
    enemy.damage_flash = flash;
    let center = enemy.center();

    if enemy.health <= 0 {
        let enemy = state.enemies.remove(index);
        log::debug!("Enemy {} destroyed at ({:.0}, {:.0})", enemy.id, center.x, center.y);
        spawn_burst(&mut state.particles, &mut state.rng, center, BurstKind::Destroyed);
        state.score += state.tuning.score_per_kill;
        DamageOutcome::Destroyed
    } else {
        spawn_burst(&mut state.particles, &mut state.rng, center, BurstKind::Hit);
        DamageOutcome::Damaged
    }
}

/// Resolve all contacts for this tick: bullets first, then the player
pub fn resolve_collisions(state: &mut GameState) {
    resolve_bullet_hits(state);
    resolve_player_hits(state);
}

/// Each bullet damages at most the first enemy it overlaps and is consumed
pub fn resolve_bullet_hits(state: &mut GameState) {
    let mut bullets = std::mem::take(&mut state.bullets);
    bullets.retain(|bullet| {
        let bounds = bullet.bounds();
        match state.enemies.iter().position(|e| bounds.overlaps(&e.bounds())) {
            Some(index) => {
                damage_enemy(state, index, bullet.damage);
                false
            }
            None => true,
        }
    });
    state.bullets = bullets;
}

/// Every enemy touching the ship is destroyed outright and costs one life
pub fn resolve_player_hits(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let mut index = 0;
    while index < state.enemies.len() {
        if !player_bounds.overlaps(&state.enemies[index].bounds()) {
            index += 1;
            continue;
        }

        let enemy = state.enemies.remove(index);
        spawn_burst(&mut state.particles, &mut state.rng, enemy.center(), BurstKind::Destroyed);
        state.lives = state.lives.saturating_sub(1);
        log::info!("Ship hit by enemy {}, {} lives left", enemy.id, state.lives);

        if state.lives == 0 && state.phase != GamePhase::GameOver {
            state.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", state.score);
        }
    }
}
