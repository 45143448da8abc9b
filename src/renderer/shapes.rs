//! Shape generation for 2D primitives

use glam::Vec2;

use super::scene::DrawCommand;
use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    quad(min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y), color)
}

/// Generate vertices for a line segment with the given stroke width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(from + perp, to + perp, to - perp, from - perp, color)
}

/// Two triangles covering the quad a-b-c-d
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Tessellate a draw list into a triangle list
///
/// Text is skipped; the host draws the HUD itself.
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);

    for command in commands {
        match command {
            DrawCommand::Rect { min, size, color } => {
                vertices.extend(rect(*min, *size, *color));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                vertices.extend(line(*from, *to, *width, *color));
            }
            DrawCommand::Text { .. } => {}
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), WHITE);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[2].position, [40.0, 60.0]);
    }

    #[test]
    fn test_vertical_line_width() {
        let v = line(Vec2::new(5.0, 0.0), Vec2::new(5.0, 100.0), 2.0, WHITE);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((max - min - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, WHITE).is_empty());
    }

    #[test]
    fn test_tessellate_skips_text() {
        let commands = vec![
            DrawCommand::Rect {
                min: Vec2::ZERO,
                size: Vec2::ONE,
                color: WHITE,
            },
            DrawCommand::Text {
                pos: Vec2::ZERO,
                size_px: 20.0,
                text: "Overtakes: 0".to_string(),
                color: WHITE,
            },
        ];
        assert_eq!(tessellate(&commands).len(), 6);
    }
}
