//! Per-tick simulation step
//!
//! A tick is split in two so the frame driver can draw in between:
//! [`apply_input`] folds the input that arrived since the last tick into the
//! state, and [`step`] runs the update phases in their fixed order.

use serde::{Deserialize, Serialize};

use super::collision::{check_collisions, check_overtakes};
use super::projection::Viewport;
use super::state::{GameEvent, GameState};

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Accelerate key held
    pub accelerating: bool,
    /// Brake key held
    pub braking: bool,
    /// An accelerate key-down arrived since the last tick (starts the race)
    pub accelerate_pressed: bool,
    /// Net steering presses since the last tick (negative = left)
    pub steer: i32,
}

/// Apply an input snapshot to the player and race
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    state.player.accelerating = input.accelerating;
    state.player.braking = input.braking;
    if input.accelerate_pressed && !state.race.started {
        state.race.started = true;
        log::info!("Race started");
    }
    if input.steer != 0 {
        state.player.steer(input.steer);
    }
}

/// Run the update phases for one tick
///
/// Order: move competitors, check collisions, check overtakes, integrate the
/// player. A game over resets the state mid-step; the remaining phases still
/// run against the fresh state.
pub fn step(state: &mut GameState, viewport: &Viewport, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    state.pool.update(state.race.started);
    check_collisions(state, viewport, now_ms, &mut events);
    check_overtakes(state, &mut events);
    state.player.integrate();

    events
}

/// Apply input and step, for headless runs and tests
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    viewport: &Viewport,
    now_ms: f64,
) -> Vec<GameEvent> {
    apply_input(state, input);
    step(state, viewport, now_ms)
}
