//! Shape generation for 2D primitives
//!
//! Everything is built in playfield coordinates (origin top-left, y down)
//! and converted to normalized device coordinates at the end.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::config::GameConfig;
use crate::sim::{GamePhase, GameState};

/// Segments used for the bird's circle
pub const BIRD_SEGMENTS: u32 = 24;

/// Map a playfield point to NDC (x right, y up, both in -1..1)
pub fn playfield_to_ndc(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(pos.x / size.x * 2.0 - 1.0, 1.0 - pos.y / size.y * 2.0)
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

/// Generate vertices for an axis-aligned rectangle; empty if it has no area
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if max.x <= min.x || max.y <= min.y {
        return Vec::new();
    }
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

fn tinted(color: [f32; 4], phase: GamePhase) -> [f32; 4] {
    if phase != GamePhase::Ended {
        return color;
    }
    let t = colors::ENDED_TINT;
    [color[0] * t[0], color[1] * t[1], color[2] * t[2], color[3] * t[3]]
}

/// Build the frame for a state in playfield coordinates: pipes, then the bird
pub fn scene(state: &GameState, config: &GameConfig) -> Vec<Vertex> {
    let pipe_color = tinted(colors::PIPE, state.phase);
    let bird_color = tinted(colors::BIRD, state.phase);

    let mut vertices = Vec::with_capacity(state.pipes.len() * 12 + (BIRD_SEGMENTS * 3) as usize);
    for pipe in &state.pipes {
        // Top bar from the ceiling to the gap, bottom bar from the gap to the floor
        vertices.extend(rect(
            Vec2::new(pipe.x, 0.0),
            Vec2::new(pipe.right(), pipe.gap_top),
            pipe_color,
        ));
        vertices.extend(rect(
            Vec2::new(pipe.x, pipe.gap_bottom()),
            Vec2::new(pipe.right(), config.height),
            pipe_color,
        ));
    }
    vertices.extend(circle(
        state.bird.pos,
        state.bird.radius,
        bird_color,
        BIRD_SEGMENTS,
    ));
    vertices
}

/// Convert a vertex list from playfield coordinates to NDC
pub fn to_ndc(vertices: &[Vertex], size: Vec2) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let p = playfield_to_ndc(Vec2::from(v.position), size);
            Vertex::new(p.x, p.y, v.color)
        })
        .collect()
}
