//! Fixed-order simulation tick and session control
//!
//! One call to `tick` is one logical frame. Nothing advances unless the
//! session is `Playing`; `start` and `reset` are the only ways in.

use super::state::{GamePhase, GameState, GunSide, Player};
use super::{collision, player, pools, weapons};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction controls
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Edge-triggered torpedo launch request
    pub fire_torpedo: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    pools::update_background(state);
    player::update_player(&mut state.player, input, &state.tuning);
    pools::update_engine_trails(state);

    weapons::update_auto_fire(state);
    if input.fire_torpedo {
        weapons::launch_torpedo(state);
    }
    weapons::update_bullets(state);
    weapons::update_torpedoes(state);

    pools::update_enemies(state);
    pools::update_particles(&mut state.particles);

    collision::resolve_collisions(state);
}

/// Begin a session from the title screen
///
/// Ignored unless the session is idle in `Start`.
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::Start {
        log::debug!("Start ignored in phase {:?}", state.phase);
        return;
    }
    begin_session(state);
}

/// Re-center the ship and begin a fresh session from any phase
pub fn reset(state: &mut GameState) {
    state.player = Player::new(&state.tuning);
    begin_session(state);
}

fn begin_session(state: &mut GameState) {
    state.score = 0;
    state.lives = state.tuning.starting_lives;
    state.time_ticks = 0;
    state.clear_pools();
    state.fire_cooldown = 0;
    state.next_gun = GunSide::Left;
    state.torpedo_cooldown = 0;
    state.player.vel = glam::Vec2::ZERO;
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {}, {} lives)", state.seed, state.lives);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_state(seed: u64) -> GameState {
        let tuning = Tuning {
            enemy_spawn_chance: 0.0,
            ..Default::default()
        };
        GameState::with_tuning(seed, tuning)
    }

    #[test]
    fn test_tick_is_noop_until_started() {
        let mut state = GameState::new(12345);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 520.0));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_start_begins_playing() {
        let mut state = GameState::new(12345);
        start(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        // First auto-fire shot goes out on the first tick
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.engine_trails.len(), 1);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = quiet_state(5);
        start(&mut state);
        state.score = 40;
        start(&mut state);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_torpedo_input_launches_once() {
        let mut state = quiet_state(5);
        start(&mut state);
        let fire = TickInput {
            fire_torpedo: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        tick(&mut state, &fire);
        assert_eq!(state.torpedoes.len(), 1);
        assert_eq!(state.torpedo_cooldown, 58);
    }

    #[test]
    fn test_game_over_halts_ticking() {
        let mut state = quiet_state(5);
        start(&mut state);
        state.lives = 1;
        let id = state.next_entity_id();
        let top_left = state.player.pos - Vec2::splat(20.0);
        state.enemies.push(Enemy {
            id,
            pos: top_left,
            vel: Vec2::ZERO,
            size: Vec2::splat(40.0),
            health: 5,
            max_health: 5,
            damage_flash: 0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);

        let frozen = state.time_ticks;
        let bullets = state.bullets.len();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, frozen);
        assert_eq!(state.bullets.len(), bullets);

        // Start does nothing from game over; reset does
        start(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        reset(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_reset_recenters_player() {
        let mut state = quiet_state(5);
        start(&mut state);
        let left = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &left);
        }
        assert!(state.player.pos.x < 400.0);

        reset(&mut state);
        assert_eq!(state.player.pos, Vec2::new(400.0, 520.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.torpedo_cooldown, 0);
    }

    #[test]
    fn test_zero_enemy_torpedo_scenario() {
        let mut state = quiet_state(77);
        start(&mut state);
        let fire = TickInput {
            fire_torpedo: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        for _ in 1..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.torpedoes.len(), 1);
        assert!(state.torpedoes[0].exploded);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start(&mut state1);
        start(&mut state2);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire_torpedo: true,
                up: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..150 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.particles.len(), state2.particles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        let ids1: Vec<u32> = state1.enemies.iter().map(|e| e.id).collect();
        let ids2: Vec<u32> = state2.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids1, ids2);
    }
}
