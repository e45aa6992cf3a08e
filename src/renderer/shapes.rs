//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in canvas pixels; the pipeline
//! maps pixels to clip space.

use glam::Vec2;

use super::scene::{DrawCmd, Scene};
use super::vertex::Vertex;

/// Points per Bezier segment when flattening hearts
pub const HEART_CURVE_STEPS: u32 = 8;

/// Generate vertices for a filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Point on a cubic Bezier
fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Outline of a heart: two cubic curves from the notch at `tip` down to the
/// point at `tip + (0, 2 * size)` and back up
pub fn heart_outline(tip: Vec2, size: f32, steps: u32) -> Vec<Vec2> {
    let s = size;
    let bottom = tip + Vec2::new(0.0, 2.0 * s);
    let left = [
        tip,
        tip + Vec2::new(-s, -s),
        tip + Vec2::new(-2.0 * s, s / 2.0),
        bottom,
    ];
    let right = [
        bottom,
        tip + Vec2::new(2.0 * s, s / 2.0),
        tip + Vec2::new(s, -s),
        tip,
    ];

    let steps = steps.max(1);
    let mut points = Vec::with_capacity(2 * steps as usize);
    for curve in [left, right] {
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            points.push(cubic(curve[0], curve[1], curve[2], curve[3], t));
        }
    }
    points
}

/// Generate vertices for a filled heart (fan from an interior point)
pub fn heart(tip: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    if size <= 0.0 {
        return Vec::new();
    }
    let outline = heart_outline(tip, size, HEART_CURVE_STEPS);
    let center = tip + Vec2::new(0.0, 0.8 * size);

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Triangles for every GPU-drawn command in the scene; text is skipped
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in &scene.commands {
        match cmd {
            DrawCmd::Rect { pos, size, color } => vertices.extend(rect(*pos, *size, *color)),
            DrawCmd::Heart { tip, size, color } => vertices.extend(heart(*tip, *size, *color)),
            DrawCmd::Text { .. } => {}
        }
    }
    vertices
}
