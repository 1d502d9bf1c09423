//! Weapons: wing guns, homing torpedoes and their explosions

use glam::Vec2;

use super::collision::{DamageOutcome, damage_enemy};
use super::state::{Bullet, Enemy, Explosion, GamePhase, GameState, Torpedo};
use crate::clamp_speed;
use crate::tuning::Tuning;

/// Torpedoes above this line are culled even if they never detonated
pub const TORPEDO_CULL_Y: f32 = -50.0;
/// Bullet pulse phase advance per tick
const BULLET_PHASE_STEP: f32 = 0.2;

/// Fire one bullet from the current wing when the countdown reaches zero
pub fn update_auto_fire(state: &mut GameState) {
    if state.fire_cooldown > 0 {
        state.fire_cooldown -= 1;
        return;
    }

    let t = &state.tuning;
    let player = &state.player;
    let wing_offset = player.size.x * t.wing_offset_ratio * state.next_gun.sign();
    let gun_y = player.pos.y - player.size.y * 0.2;

    state.bullets.push(Bullet {
        pos: Vec2::new(player.pos.x + wing_offset, gun_y),
        size: Vec2::new(t.bullet_width, t.bullet_height),
        speed: t.bullet_speed,
        damage: t.bullet_damage,
        phase: 0.0,
    });

    state.next_gun = state.next_gun.flipped();
    state.fire_cooldown = t.fire_interval;
}

/// Move bullets up and drop the ones that left the top edge
pub fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
        bullet.phase += BULLET_PHASE_STEP;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

/// Launch a torpedo from the ship's nose if the launcher is ready
///
/// Returns whether a torpedo was launched.
pub fn launch_torpedo(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.torpedo_cooldown > 0 {
        return false;
    }

    let t = &state.tuning;
    let nose = state.player.nose();
    state.torpedoes.push(Torpedo {
        pos: nose,
        vel: Vec2::new(0.0, -t.torpedo_launch_speed),
        size: Vec2::new(t.torpedo_width, t.torpedo_height),
        time_alive: 0,
        exploded: false,
        grace_ticks: 0,
        trail: Default::default(),
    });
    state.torpedo_cooldown = t.torpedo_cooldown;
    log::debug!("Torpedo launched from ({:.0}, {:.0})", nose.x, nose.y);
    true
}

/// Nearest enemy to `from` by center distance; the first one wins ties
pub fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<&Enemy> {
    let mut best: Option<(&Enemy, f32)> = None;
    for enemy in enemies {
        let dist = from.distance(enemy.center());
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((enemy, dist));
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Accelerate toward `target` (if any) and clamp to max speed
pub fn steer_torpedo(torpedo: &mut Torpedo, target: Option<Vec2>, tuning: &Tuning) {
    if let Some(target) = target {
        let to_target = target - torpedo.pos;
        let dist = to_target.length();
        // Coincident target has no direction; skip the push
        if dist > 0.0 {
            torpedo.vel += to_target / dist * tuning.torpedo_acceleration;
        }
    }
    torpedo.vel = clamp_speed(torpedo.vel, tuning.torpedo_max_speed);
}

/// Tick the launcher cooldown, fly and detonate torpedoes, grow explosions
pub fn update_torpedoes(state: &mut GameState) {
    state.torpedo_cooldown = state.torpedo_cooldown.saturating_sub(1);

    for i in 0..state.torpedoes.len() {
        if state.torpedoes[i].exploded {
            state.torpedoes[i].grace_ticks += 1;
            continue;
        }

        let target = nearest_enemy(&state.enemies, state.torpedoes[i].pos).map(Enemy::center);

        let t = &state.tuning;
        let torpedo = &mut state.torpedoes[i];
        steer_torpedo(torpedo, target, t);
        torpedo.pos += torpedo.vel;
        torpedo.time_alive += 1;
        torpedo.record_trail(t.torpedo_trail_length);

        if torpedo.time_alive >= t.torpedo_fuse_ticks || torpedo.pos.y < t.torpedo_fuse_altitude {
            torpedo.exploded = true;
            let at = torpedo.pos;
            detonate(state, at);
        }
    }

    let grace = state.tuning.torpedo_grace_ticks;
    state
        .torpedoes
        .retain(|t| t.pos.y >= TORPEDO_CULL_Y && !(t.exploded && t.grace_ticks > grace));

    update_explosions(state);
}

/// Spawn a blast at `at` and splash every enemy whose center is in range
pub fn detonate(state: &mut GameState, at: Vec2) {
    let radius = state.tuning.explosion_radius;
    let damage = state.tuning.explosion_damage;
    state
        .explosions
        .push(Explosion::new(at, radius, state.tuning.explosion_duration));

    // Reverse order keeps indices valid as destroyed enemies are removed
    let (mut hits, mut kills) = (0, 0);
    for index in (0..state.enemies.len()).rev() {
        if at.distance(state.enemies[index].center()) < radius {
            hits += 1;
            if damage_enemy(state, index, damage) == DamageOutcome::Destroyed {
                kills += 1;
            }
        }
    }
    log::debug!(
        "Torpedo detonated at ({:.0}, {:.0}), {} enemies caught, {} destroyed",
        at.x,
        at.y,
        hits,
        kills
    );
}

/// Grow explosions and drop the finished ones
pub fn update_explosions(state: &mut GameState) {
    state.explosions.retain_mut(Explosion::advance);
}
