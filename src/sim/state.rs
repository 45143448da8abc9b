//! Game state and core simulation types
//!
//! Everything the frame driver owns lives in [`GameState`], so a run can be
//! stepped, inspected and compared without a rendering surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::CompetitorPool;
use crate::consts::*;

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Lateral offset (not clamped to the road)
    pub x: f32,
    /// Distance traveled this run
    pub z: f32,
    /// Always within [MIN_SPEED, MAX_SPEED]
    pub speed: f32,
    pub lives: u8,
    pub accelerating: bool,
    pub braking: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            speed: MIN_SPEED,
            lives: STARTING_LIVES,
            accelerating: false,
            braking: false,
        }
    }
}

impl PlayerState {
    /// Shift sideways by a number of steering presses (negative = left)
    pub fn steer(&mut self, presses: i32) {
        self.x += presses as f32 * STEER_STEP;
    }

    /// Update speed from the held flags, then advance depth by the new speed
    pub fn integrate(&mut self) {
        if self.accelerating && self.speed < MAX_SPEED {
            self.speed += ACCELERATION;
        } else if self.braking && self.speed > MIN_SPEED {
            self.speed -= DECELERATION;
        }
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);

        self.z += self.speed;
    }
}

/// Race-wide counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceState {
    /// Competitors overtaken this run
    pub overtakes: u32,
    /// Competitors stay on the grid until the first accelerate press
    pub started: bool,
}

/// Cosmetic screen offset after a collision
///
/// Stored as an expiry timestamp and checked at draw time; it never feeds
/// back into the simulation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenJolt {
    expires_at_ms: Option<f64>,
}

impl ScreenJolt {
    pub fn trigger(&mut self, now_ms: f64) {
        self.expires_at_ms = Some(now_ms + JOLT_DURATION_MS);
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        self.expires_at_ms.is_some_and(|t| now_ms < t)
    }

    /// Offset to apply to everything drawn at `now_ms`
    pub fn offset(&self, now_ms: f64) -> Vec2 {
        if self.is_active(now_ms) {
            Vec2::splat(JOLT_OFFSET)
        } else {
            Vec2::ZERO
        }
    }
}

/// Things that happened during a tick, for the host and for logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player hit a competitor
    Collision { competitor: usize, lives_left: u8 },
    /// The player overtook a competitor
    Overtake { competitor: usize, total: u32 },
    /// Lives ran out; carries the final overtake count. State is already reset.
    GameOver { overtakes: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: PlayerState,
    pub race: RaceState,
    pub pool: CompetitorPool,
    /// Simulation tick counter (not reset between runs)
    pub time_ticks: u64,
    /// Completed runs this session
    pub runs: u32,
    /// Highest overtake count reached this session
    pub best_overtakes: u32,
    /// Render-only effect
    pub jolt: ScreenJolt,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            player: PlayerState::default(),
            race: RaceState::default(),
            pool: CompetitorPool::new(COMPETITOR_COUNT, seed),
            time_ticks: 0,
            runs: 0,
            best_overtakes: 0,
            jolt: ScreenJolt::default(),
        }
    }

    /// Return player, race and competitors to their starting conditions
    ///
    /// Competitor lanes and speed caps are kept, as is the jolt effect. The
    /// held accelerate/brake flags follow the keyboard, not the run, so they
    /// carry over.
    pub fn reset(&mut self) {
        self.player = PlayerState {
            accelerating: self.player.accelerating,
            braking: self.player.braking,
            ..Default::default()
        };
        self.race = RaceState::default();
        self.pool.reset_all();
        log::info!("Race reset (run {})", self.runs + 1);
    }
}
