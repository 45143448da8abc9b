//! Collision and overtake detection
//!
//! Collisions are tested in screen space: the player and each competitor are
//! projected and compared with an axis-aligned proximity test. Overtakes are
//! tested in track space by comparing the player's traveled depth with each
//! competitor's depth.

use glam::Vec2;

use super::projection::{Viewport, player_screen_pos, project};
use super::state::{GameEvent, GameState};
use crate::consts::{COLLISION_DX, COLLISION_DY, OVERTAKE_MARGIN};

/// Proximity test between two projected points
///
/// Both thresholds must hold independently; this is not a true overlap test.
#[inline]
pub fn within_collision_range(player: Vec2, competitor: Vec2) -> bool {
    let d = (player - competitor).abs();
    d.x < COLLISION_DX && d.y < COLLISION_DY
}

/// Check the player against every competitor
///
/// Each hit costs a life, sends the competitor back to the draw distance and
/// jolts the screen. Running out of lives ends the run: a
/// [`GameEvent::GameOver`] is pushed, the whole game is reset, and no further
/// competitors are checked this tick.
pub fn check_collisions(
    state: &mut GameState,
    viewport: &Viewport,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    let player_pos = player_screen_pos(viewport, state.player.x);

    for i in 0..state.pool.len() {
        let car = &state.pool.competitors()[i];
        let car_pos = project(viewport, car.x(), car.depth).pos;
        if !within_collision_range(player_pos, car_pos) {
            continue;
        }

        state.player.lives = state.player.lives.saturating_sub(1);
        state.pool.relocate(i);
        state.jolt.trigger(now_ms);
        log::debug!(
            "Collision with competitor {} ({} lives left)",
            i,
            state.player.lives
        );
        events.push(GameEvent::Collision {
            competitor: i,
            lives_left: state.player.lives,
        });

        if state.player.lives == 0 {
            let overtakes = state.race.overtakes;
            log::info!("Game over: {} cars overtaken", overtakes);
            state.best_overtakes = state.best_overtakes.max(overtakes);
            state.runs += 1;
            events.push(GameEvent::GameOver { overtakes });
            state.reset();
            return;
        }
    }
}

/// Count competitors the player has pulled clear of
///
/// A competitor is counted once, then ignored until it wraps.
pub fn check_overtakes(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_z = state.player.z;

    for (i, car) in state.pool.competitors_mut().iter_mut().enumerate() {
        if car.passed || player_z <= car.depth + OVERTAKE_MARGIN {
            continue;
        }
        car.passed = true;
        state.race.overtakes += 1;
        log::debug!(
            "Overtook competitor {} (total {})",
            i,
            state.race.overtakes
        );
        events.push(GameEvent::Overtake {
            competitor: i,
            total: state.race.overtakes,
        });
    }
}
