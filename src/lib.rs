//! Road Rush - A pseudo-3D arcade road racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, competitors, collisions, overtakes)
//! - `frame`: Per-tick frame driver (render, simulate, HUD)
//! - `renderer`: Draw list construction and WebGPU presentation
//! - `settings`: Cosmetic runtime preferences

pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use frame::{Frame, FrameDriver};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Road geometry
    pub const ROAD_WIDTH: f32 = 400.0;
    pub const SEGMENT_LENGTH: f32 = 200.0;
    /// Depth at which the perspective scale reaches 1/2
    pub const DRAW_DISTANCE: f32 = 600.0;

    /// Player speed range (units per tick)
    pub const MIN_SPEED: f32 = 0.0;
    pub const MAX_SPEED: f32 = 10.0;
    /// Speed change per tick while accelerating / braking
    pub const ACCELERATION: f32 = 0.1;
    pub const DECELERATION: f32 = 0.1;
    /// Lateral offset applied per steering key press (not clamped to the road)
    pub const STEER_STEP: f32 = 10.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Player sprite row, measured up from the bottom of the viewport
    pub const PLAYER_SCREEN_OFFSET: f32 = 80.0;

    /// Competitor pool
    pub const COMPETITOR_COUNT: usize = 10;
    /// Depth gap between competitors on the starting grid
    pub const COMPETITOR_GRID_SPACING: f32 = 100.0;
    /// Speed cap range, [min, max)
    pub const COMPETITOR_MIN_SPEED: f32 = 2.0;
    pub const COMPETITOR_MAX_SPEED: f32 = 5.0;
    pub const COMPETITOR_ACCELERATION: f32 = 0.05;

    /// Collision proximity thresholds (screen pixels)
    pub const COLLISION_DX: f32 = 30.0;
    pub const COLLISION_DY: f32 = 60.0;
    /// Player must lead a competitor by this much depth to count an overtake
    pub const OVERTAKE_MARGIN: f32 = 50.0;

    /// Screen jolt after a collision
    pub const JOLT_DURATION_MS: f64 = 100.0;
    pub const JOLT_OFFSET: f32 = 5.0;
}
