//! Player ship physics
//!
//! Held directions accelerate each axis independently, so diagonal input is
//! faster than straight input until the speed clamp kicks in.

use glam::Vec2;

use super::state::Player;
use super::tick::TickInput;
use crate::clamp_speed;
use crate::tuning::Tuning;

/// Cosmetic animation advance per tick
const ANIM_STEP: f32 = 0.15;

/// Advance the ship one tick from the held direction keys
pub fn update_player(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let accel = tuning.player_acceleration;
    let mut thrust = Vec2::ZERO;
    if input.left {
        thrust.x -= accel;
    }
    if input.right {
        thrust.x += accel;
    }
    if input.up {
        thrust.y -= accel;
    }
    if input.down {
        thrust.y += accel;
    }

    player.vel += thrust;
    player.vel *= tuning.player_friction;
    player.vel = clamp_speed(player.vel, tuning.player_max_speed);
    player.pos += player.vel;

    // Inelastic wall stop
    let half = player.size / 2.0;
    let max = Vec2::new(tuning.field_width, tuning.field_height) - half;
    if player.pos.x < half.x {
        player.pos.x = half.x;
        player.vel.x = 0.0;
    }
    if player.pos.x > max.x {
        player.pos.x = max.x;
        player.vel.x = 0.0;
    }
    if player.pos.y < half.y {
        player.pos.y = half.y;
        player.vel.y = 0.0;
    }
    if player.pos.y > max.y {
        player.pos.y = max.y;
        player.vel.y = 0.0;
    }

    player.anim_time += ANIM_STEP;
}
