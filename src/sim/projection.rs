//! Perspective projection for the pseudo-3D road
//!
//! A point on the track is described by its depth `d` (distance ahead of the
//! camera) and its lateral offset `x`. Projection shrinks the lateral offset by
//! `scale(d) = 1 / (1 + d / DRAW_DISTANCE)` around the screen's vertical
//! centerline and places the point `d` pixels above the bottom edge.
//!
//! The same formula is used for road segments, the player and competitors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DRAW_DISTANCE, PLAYER_SCREEN_OFFSET};

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// A projected point with the scale it was projected at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub pos: Vec2,
    pub scale: f32,
}

/// Perspective scale factor at a given depth, in (0, 1] for d >= 0
#[inline]
pub fn scale(depth: f32) -> f32 {
    1.0 / (1.0 + depth / DRAW_DISTANCE)
}

/// Horizontal screen coordinate of a lateral offset seen at `depth`
#[inline]
pub fn screen_x(viewport: &Viewport, x: f32, depth: f32) -> f32 {
    viewport.center_x() + x * scale(depth)
}

/// Vertical screen coordinate of a point at `depth` (grows upward from the bottom edge)
#[inline]
pub fn screen_y(viewport: &Viewport, depth: f32) -> f32 {
    viewport.height - depth
}

/// Project a track point into screen space
pub fn project(viewport: &Viewport, x: f32, depth: f32) -> Projected {
    Projected {
        pos: Vec2::new(screen_x(viewport, x, depth), screen_y(viewport, depth)),
        scale: scale(depth),
    }
}

/// Screen position of the player sprite
///
/// The player sits at depth 0 (scale 1) on a fixed row near the bottom edge,
/// regardless of how far they have traveled.
pub fn player_screen_pos(viewport: &Viewport, x: f32) -> Vec2 {
    Vec2::new(
        screen_x(viewport, x, 0.0),
        viewport.height - PLAYER_SCREEN_OFFSET,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scale_at_camera_is_one() {
        assert_eq!(scale(0.0), 1.0);
    }

    #[test]
    fn test_scale_at_draw_distance_is_half() {
        assert!((scale(DRAW_DISTANCE) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_project_competitor() {
        let viewport = Viewport::new(800.0, 600.0);
        let p = project(&viewport, 100.0, 600.0);
        assert!((p.pos.x - 450.0).abs() < 1e-4);
        assert!((p.pos.y - 0.0).abs() < 1e-4);
        assert!((p.scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_player_row_is_fixed() {
        let viewport = Viewport::new(800.0, 600.0);
        let p = player_screen_pos(&viewport, -30.0);
        assert_eq!(p, Vec2::new(370.0, 520.0));
    }

    proptest! {
        #[test]
        fn prop_scale_in_unit_interval(d in 0.0f32..100_000.0) {
            let s = scale(d);
            prop_assert!(s > 0.0 && s <= 1.0);
        }

        #[test]
        fn prop_scale_strictly_decreasing(d in 0.0f32..10_000.0, delta in 1.0f32..1_000.0) {
            prop_assert!(scale(d + delta) < scale(d));
        }

        #[test]
        fn prop_projection_shrinks_toward_center(x in -500.0f32..500.0, d in 0.0f32..5_000.0) {
            let viewport = Viewport::default();
            let offset = screen_x(&viewport, x, d) - viewport.center_x();
            prop_assert!(offset.abs() <= x.abs() + 1e-3);
        }
    }
}
