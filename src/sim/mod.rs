//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per tick, no wall-clock reads (time is passed in)
//! - Seeded RNG only
//! - Stable iteration order (by competitor index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pool;
pub mod projection;
pub mod state;
pub mod tick;

pub use collision::{check_collisions, check_overtakes, within_collision_range};
pub use pool::{Competitor, CompetitorPool, Lane};
pub use projection::{Projected, Viewport, player_screen_pos, project, scale, screen_x, screen_y};
pub use state::{GameEvent, GameState, PlayerState, RaceState, ScreenJolt};
pub use tick::{TickInput, apply_input, step, tick};
