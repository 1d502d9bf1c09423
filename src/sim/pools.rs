//! Entity pools: spawning and per-tick lifecycle
//!
//! Enemies, particles, engine trails and the background are all pure
//! kinematic integrators. The only cross-entity coupling is creation, which
//! the weapons and collision code trigger through `spawn_burst`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BurstKind, Enemy, EngineTrail, GameState, NebulaCloud, Particle, Star, StarTint};

/// Fiery palette for explosion particles
pub const EXPLOSION_COLORS: [u32; 5] = [0xff4444, 0xff8844, 0xffaa44, 0xffff44, 0xffaa88];
/// Nebula tints
pub const NEBULA_COLORS: [u32; 3] = [0x1a1a3e, 0x2a1a4e, 0x1a2a4e];

/// Particles emitted when an enemy is destroyed
pub const FULL_BURST_COUNT: usize = 25;
/// Particles emitted when an enemy is hit but survives
pub const HIT_BURST_COUNT: usize = 8;

/// Downward pull on particles per tick
pub const PARTICLE_GRAVITY: f32 = 0.1;
/// Velocity retention per tick
pub const PARTICLE_DAMPING: f32 = 0.98;

/// Engine exhaust parameters
pub const TRAIL_LIFE: u32 = 20;
pub const TRAIL_DRIFT: f32 = 2.0;
pub const MAX_TRAIL_SEGMENTS: usize = 10;
/// How far exhaust leans with horizontal velocity
pub const TRAIL_LEAN: f32 = 2.0;

/// Emit a burst of particles centered on `center`
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, center: Vec2, kind: BurstKind) {
    let (count, min_speed, speed_spread, min_life, life_spread, min_size, size_spread) = match kind {
        BurstKind::Destroyed => (FULL_BURST_COUNT, 2.0, 6.0, 40.0, 20.0, 2.0, 4.0),
        BurstKind::Hit => (HIT_BURST_COUNT, 1.0, 3.0, 15.0, 10.0, 1.0, 2.0),
    };

    for i in 0..count {
        // Evenly spaced spokes with a little jitter
        let angle = TAU * i as f32 / count as f32 + rng.random::<f32>() * 0.5;
        let speed = rng.random::<f32>() * speed_spread + min_speed;
        let life = min_life + rng.random::<f32>() * life_spread;
        let size = rng.random::<f32>() * size_spread + min_size;
        let color = EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())];
        particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            max_life: life,
            size,
            color,
        });
    }
}

/// Add one enemy along the top edge with randomized drift and health
pub fn spawn_enemy(state: &mut GameState) {
    let id = state.next_entity_id();
    let t = &state.tuning;
    let rng = &mut state.rng;

    let x = rng.random::<f32>() * (t.field_width - t.enemy_size);
    let vy = rng.random_range(t.enemy_min_descent..t.enemy_max_descent);
    let vx = rng.random_range(-t.enemy_max_drift..=t.enemy_max_drift);
    let health = rng.random_range(t.enemy_min_health..=t.enemy_max_health);

    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -t.enemy_size),
        vel: Vec2::new(vx, vy),
        size: Vec2::splat(t.enemy_size),
        health,
        max_health: health,
        damage_flash: 0,
    });
}

/// Roll the per-tick spawn chance, then move, bounce and cull enemies
pub fn update_enemies(state: &mut GameState) {
    if state.rng.random_bool(state.tuning.enemy_spawn_chance) {
        spawn_enemy(state);
    }

    let width = state.tuning.field_width;
    let height = state.tuning.field_height;

    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel;
        enemy.damage_flash = enemy.damage_flash.saturating_sub(1);

        // Elastic bounce off the side walls
        if enemy.pos.x <= 0.0 || enemy.pos.x + enemy.size.x >= width {
            enemy.vel.x = -enemy.vel.x;
            enemy.pos.x = enemy.pos.x.clamp(0.0, width - enemy.size.x);
        }
    }

    state.enemies.retain(|e| {
        e.pos.y <= height && e.pos.x + e.size.x >= 0.0 && e.pos.x <= width
    });
}

/// Integrate particles with gravity and damping; drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.vel *= PARTICLE_DAMPING;
        p.life -= 1.0;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Emit a new exhaust puff behind the ship and age the existing ones
pub fn update_engine_trails(state: &mut GameState) {
    let player = &state.player;
    state.engine_trails.push_back(EngineTrail {
        pos: Vec2::new(player.pos.x + player.vel.x * TRAIL_LEAN, player.pos.y + player.size.y / 2.0),
        vy: TRAIL_DRIFT,
        life: TRAIL_LIFE,
    });

    let height = state.tuning.field_height;
    for trail in state.engine_trails.iter_mut() {
        trail.pos.y += trail.vy;
        trail.life = trail.life.saturating_sub(1);
    }
    state.engine_trails.retain(|t| t.life > 0 && t.pos.y <= height);

    while state.engine_trails.len() > MAX_TRAIL_SEGMENTS {
        state.engine_trails.pop_front();
    }
}

/// Scatter stars and nebula clouds across the playfield
pub fn init_background(state: &mut GameState) {
    let width = state.tuning.field_width;
    let height = state.tuning.field_height;
    let rng = &mut state.rng;

    state.stars = (0..state.tuning.star_count)
        .map(|_| Star {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            size: rng.random::<f32>() * 2.5 + 0.5,
            speed: rng.random::<f32>() * 2.0 + 1.0,
            tint: StarTint::ALL[rng.random_range(0..StarTint::ALL.len())],
            twinkle: rng.random::<f32>() * TAU,
            twinkle_speed: rng.random::<f32>() * 0.1 + 0.05,
        })
        .collect();

    state.nebulae = (0..state.tuning.nebula_count)
        .map(|_| NebulaCloud {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            radius: rng.random::<f32>() * 200.0 + 150.0,
            opacity: rng.random::<f32>() * 0.1 + 0.05,
            color: NEBULA_COLORS[rng.random_range(0..NEBULA_COLORS.len())],
            drift: rng.random::<f32>() * 0.2 + 0.1,
        })
        .collect();
}

/// Scroll the starfield and nebulae, wrapping them back to the top
pub fn update_background(state: &mut GameState) {
    let width = state.tuning.field_width;
    let height = state.tuning.field_height;
    let rng = &mut state.rng;

    for star in &mut state.stars {
        star.pos.y += star.speed;
        star.twinkle += star.twinkle_speed;
        if star.pos.y > height {
            star.pos.y = 0.0;
            star.pos.x = rng.random::<f32>() * width;
        }
    }

    for cloud in &mut state.nebulae {
        cloud.pos.y += cloud.drift;
        if cloud.pos.y - cloud.radius > height {
            cloud.pos.y = -cloud.radius;
            cloud.pos.x = rng.random::<f32>() * width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        let tuning = Tuning {
            enemy_spawn_chance: 0.0,
            ..Default::default()
        };
        GameState::with_tuning(1, tuning)
    }

    fn push_enemy(state: &mut GameState, pos: Vec2, vel: Vec2) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            vel,
            size: Vec2::splat(40.0),
            health: 5,
            max_health: 5,
            damage_flash: 0,
        });
    }

    #[test]
    fn test_enemy_descends_at_constant_speed() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(100.0, -40.0), Vec2::new(0.0, 2.0));

        for _ in 0..70 {
            update_enemies(&mut state);
        }

        assert_eq!(state.enemies.len(), 1);
        assert!((state.enemies[0].pos.y - 100.0).abs() < 1e-3);
        assert!((state.enemies[0].pos.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawned_enemies_respect_ranges() {
        let mut state = quiet_state();
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for e in &state.enemies {
            assert!((5..=10).contains(&e.health));
            assert_eq!(e.health, e.max_health);
            assert!(e.pos.x >= 0.0 && e.pos.x < 760.0);
            assert_eq!(e.pos.y, -40.0);
            assert!(e.vel.y >= 2.0 && e.vel.y < 4.0);
            assert!(e.vel.x.abs() <= 1.5);
        }
        // Ids are unique and increasing
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_enemy_bounces_off_right_wall() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(759.0, 100.0), Vec2::new(1.5, 2.0));

        update_enemies(&mut state);

        let e = &state.enemies[0];
        assert_eq!(e.vel.x, -1.5);
        assert_eq!(e.pos.x, 760.0);
    }

    #[test]
    fn test_enemy_bounces_off_left_wall() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(1.0, 100.0), Vec2::new(-1.5, 2.0));

        update_enemies(&mut state);

        let e = &state.enemies[0];
        assert_eq!(e.vel.x, 1.5);
        assert_eq!(e.pos.x, 0.0);
    }

    #[test]
    fn test_enemy_removed_below_bottom_same_tick() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(100.0, 599.0), Vec2::new(0.0, 2.0));

        update_enemies(&mut state);

        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_damage_flash_counts_down() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.enemies[0].damage_flash = 2;

        update_enemies(&mut state);
        assert_eq!(state.enemies[0].damage_flash, 1);
        update_enemies(&mut state);
        update_enemies(&mut state);
        assert_eq!(state.enemies[0].damage_flash, 0);
    }

    #[test]
    fn test_particles_fall_and_expire() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 3.0,
            max_life: 3.0,
            size: 2.0,
            color: EXPLOSION_COLORS[0],
        }];

        update_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        assert!(particles[0].vel.y > 0.0);

        update_particles(&mut particles);
        update_particles(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_bursts_have_expected_sizes() {
        let mut state = quiet_state();
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut state.rng, Vec2::ZERO, BurstKind::Destroyed);
        assert_eq!(particles.len(), FULL_BURST_COUNT);
        spawn_burst(&mut particles, &mut state.rng, Vec2::ZERO, BurstKind::Hit);
        assert_eq!(particles.len(), FULL_BURST_COUNT + HIT_BURST_COUNT);
        assert!(particles.iter().all(|p| p.life <= p.max_life && p.life > 0.0));
    }

    #[test]
    fn test_engine_trail_is_capped() {
        let mut state = quiet_state();
        for _ in 0..30 {
            update_engine_trails(&mut state);
        }
        assert_eq!(state.engine_trails.len(), MAX_TRAIL_SEGMENTS);
        // Newest segment sits just behind the ship
        let newest = state.engine_trails.back().map(|t| t.pos.y);
        assert_eq!(newest, Some(520.0 + 25.0 + TRAIL_DRIFT));
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let mut state = quiet_state();
        state.stars.truncate(1);
        state.stars[0].pos.y = 599.5;
        state.stars[0].speed = 1.0;

        update_background(&mut state);

        assert_eq!(state.stars[0].pos.y, 0.0);
        assert!(state.stars[0].pos.x >= 0.0 && state.stars[0].pos.x < 800.0);
    }
}
