//! Scene construction
//!
//! Turns game state into a flat list of draw commands in screen pixels
//! (origin top-left, y down). The list is consumed by [`super::shapes`] for
//! the GPU path; text commands are left to the host's HUD.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::{DRAW_DISTANCE, ROAD_WIDTH, SEGMENT_LENGTH};
use crate::sim::{CompetitorPool, PlayerState, Viewport, player_screen_pos, project, scale};

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned filled rectangle
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    /// Text anchored at its baseline-left corner
    Text {
        pos: Vec2,
        size_px: f32,
        text: String,
        color: [f32; 4],
    },
}

impl DrawCommand {
    fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        DrawCommand::Rect {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        }
    }

    /// Shift the command by a screen offset
    pub fn translated(self, offset: Vec2) -> Self {
        match self {
            DrawCommand::Rect { min, size, color } => DrawCommand::Rect {
                min: min + offset,
                size,
                color,
            },
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => DrawCommand::Line {
                from: from + offset,
                to: to + offset,
                width,
                color,
            },
            DrawCommand::Text {
                pos,
                size_px,
                text,
                color,
            } => DrawCommand::Text {
                pos: pos + offset,
                size_px,
                text,
                color,
            },
        }
    }
}

/// Pixel layout of a car sprite relative to its center point
struct CarSprite {
    body_half: Vec2,
    window_min: Vec2,
    window_size: Vec2,
    left_wheel: Vec2,
    right_wheel: Vec2,
    body_color: [f32; 4],
}

const WHEEL_SIZE: Vec2 = Vec2::new(10.0, 20.0);

const PLAYER_SPRITE: CarSprite = CarSprite {
    body_half: Vec2::new(20.0, 40.0),
    window_min: Vec2::new(-15.0, -35.0),
    window_size: Vec2::new(30.0, 60.0),
    left_wheel: Vec2::new(-25.0, -20.0),
    right_wheel: Vec2::new(15.0, -20.0),
    body_color: colors::PLAYER_BODY,
};

const COMPETITOR_SPRITE: CarSprite = CarSprite {
    body_half: Vec2::new(15.0, 30.0),
    window_min: Vec2::new(-10.0, -25.0),
    window_size: Vec2::new(20.0, 50.0),
    left_wheel: Vec2::new(-20.0, -15.0),
    right_wheel: Vec2::new(10.0, -15.0),
    body_color: colors::COMPETITOR_BODY,
};

impl CarSprite {
    fn draw(&self, center: Vec2, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Rect {
            min: center - self.body_half,
            size: self.body_half * 2.0,
            color: self.body_color,
        });
        out.push(DrawCommand::Rect {
            min: center + self.window_min,
            size: self.window_size,
            color: colors::WINDOW,
        });
        for wheel in [self.left_wheel, self.right_wheel] {
            out.push(DrawCommand::Rect {
                min: center + wheel,
                size: WHEEL_SIZE,
                color: colors::WHEEL,
            });
        }
    }
}

/// Road surface and lane divider, one quad per segment out to the draw distance
pub fn road(viewport: &Viewport, out: &mut Vec<DrawCommand>) {
    let mut depth = 0.0;
    while depth < DRAW_DISTANCE {
        let s = scale(depth);
        let x1 = viewport.center_x() - (ROAD_WIDTH / 2.0) * s;
        let x2 = viewport.center_x() + (ROAD_WIDTH / 2.0) * s;
        let y_near = viewport.height - depth;
        let y_far = viewport.height - (depth + SEGMENT_LENGTH);

        out.push(DrawCommand::rect(
            x1,
            y_far,
            x2 - x1,
            y_near - y_far,
            colors::ROAD,
        ));

        let divider_x = x1 + (x2 - x1) / 2.0;
        out.push(DrawCommand::Line {
            from: Vec2::new(divider_x, y_near),
            to: Vec2::new(divider_x, y_far),
            width: 2.0,
            color: colors::LANE_DIVIDER,
        });

        depth += SEGMENT_LENGTH;
    }
}

/// Player sprite at its fixed screen row
pub fn player(viewport: &Viewport, player: &PlayerState, out: &mut Vec<DrawCommand>) {
    PLAYER_SPRITE.draw(player_screen_pos(viewport, player.x), out);
}

/// Every competitor at its projected position
pub fn competitors(viewport: &Viewport, pool: &CompetitorPool, out: &mut Vec<DrawCommand>) {
    for car in pool.competitors() {
        let p = project(viewport, car.x(), car.depth);
        COMPETITOR_SPRITE.draw(p.pos, out);
    }
}

/// HUD label for the overtake counter
pub fn overtakes_label(overtakes: u32) -> String {
    format!("Overtakes: {}", overtakes)
}

/// HUD label for remaining lives
pub fn lives_label(lives: u8) -> String {
    format!("Lives: {}", lives)
}

/// HUD text commands (overtakes, then lives below it)
pub fn hud(overtakes: u32, lives: u8, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Text {
        pos: Vec2::new(20.0, 30.0),
        size_px: 20.0,
        text: overtakes_label(overtakes),
        color: colors::HUD_TEXT,
    });
    out.push(DrawCommand::Text {
        pos: Vec2::new(20.0, 56.0),
        size_px: 20.0,
        text: lives_label(lives),
        color: colors::HUD_TEXT,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_road_segments() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut out = Vec::new();
        road(&viewport, &mut out);

        // 600 / 200 = 3 segments, each a quad and a divider
        assert_eq!(out.len(), 6);
        match &out[0] {
            DrawCommand::Rect { min, size, .. } => {
                assert_eq!(*min, Vec2::new(200.0, 400.0));
                assert_eq!(*size, Vec2::new(400.0, 200.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
        match &out[1] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(from.x, 400.0);
                assert_eq!(from.y, 600.0);
                assert_eq!(to.y, 400.0);
            }
            other => panic!("expected line, got {:?}", other),
        }
        // Farther segments are narrower
        if let (DrawCommand::Rect { size: near, .. }, DrawCommand::Rect { size: far, .. }) =
            (&out[0], &out[4])
        {
            assert!(far.x < near.x);
        }
    }

    #[test]
    fn test_player_sprite_layout() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut out = Vec::new();
        player(&viewport, &PlayerState::default(), &mut out);

        assert_eq!(out.len(), 4);
        assert_eq!(
            out[0],
            DrawCommand::rect(380.0, 480.0, 40.0, 80.0, colors::PLAYER_BODY)
        );
        assert_eq!(
            out[3],
            DrawCommand::rect(415.0, 500.0, 10.0, 20.0, colors::WHEEL)
        );
    }

    #[test]
    fn test_competitor_sprites() {
        let viewport = Viewport::default();
        let state = GameState::new(4);
        let mut out = Vec::new();
        competitors(&viewport, &state.pool, &mut out);
        assert_eq!(out.len(), state.pool.len() * 4);
    }

    #[test]
    fn test_translated() {
        let cmd = DrawCommand::rect(1.0, 2.0, 3.0, 4.0, colors::ROAD);
        assert_eq!(
            cmd.translated(Vec2::splat(5.0)),
            DrawCommand::rect(6.0, 7.0, 3.0, 4.0, colors::ROAD)
        );
    }

    #[test]
    fn test_hud_labels() {
        assert_eq!(overtakes_label(12), "Overtakes: 12");
        let mut out = Vec::new();
        hud(3, 2, &mut out);
        assert!(matches!(&out[1], DrawCommand::Text { text, .. } if text == "Lives: 2"));
    }
}
