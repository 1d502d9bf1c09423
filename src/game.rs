//! Host-facing session
//!
//! Owns the simulation state, keyboard state and frame clock. A host calls
//! `key_down`/`key_up` from its event handlers, `advance` once per displayed
//! frame, then reads `state()` to draw.

use crate::platform::{FixedStep, InputState};
use crate::sim::{self, GamePhase, GameState, Hud};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    input: InputState,
    clock: FixedStep,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: InputState::new(),
            clock: FixedStep::default(),
        }
    }

    /// Read-only view for the presentation layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    /// Fraction of a tick banked since the last step
    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    /// Start button on the title screen
    pub fn start(&mut self) {
        sim::start(&mut self.state);
        self.input.clear_trigger();
        self.clock.clear();
    }

    /// Restart button on the game-over screen
    pub fn reset(&mut self) {
        sim::reset(&mut self.state);
        self.input.clear_trigger();
        self.clock.clear();
    }

    /// Run however many ticks `frame_dt` seconds are worth
    ///
    /// Returns the number of ticks executed. Stops at once if the session
    /// leaves `Playing` mid-frame.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.state.phase != GamePhase::Playing {
            // Presses on the title or game-over screen never reach a tick
            self.input.clear_trigger();
            self.clock.clear();
            return 0;
        }

        let steps = self.clock.accumulate(frame_dt);
        let mut ran = 0;
        for _ in 0..steps {
            let input = self.input.take_tick_input();
            sim::tick(&mut self.state, &input);
            ran += 1;

            if self.state.phase != GamePhase::Playing {
                self.clock.clear();
                break;
            }
        }
        ran
    }
}
