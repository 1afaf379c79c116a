//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let min = center - half;
    let max = center + half;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
