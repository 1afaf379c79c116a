//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (linear; the surface is sRGB)
pub mod colors {
    /// #071022
    pub const BACKGROUND: [f32; 4] = [0.0021, 0.0052, 0.016, 1.0];
    /// #6cf
    pub const PLAYER: [f32; 4] = [0.1329, 0.6038, 1.0, 1.0];
    /// #e6f
    pub const PLAYER_GUN: [f32; 4] = [0.855, 0.1329, 1.0, 1.0];
    /// #ffd
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.7231, 1.0];
    /// #f66
    pub const ENEMY: [f32; 4] = [1.0, 0.1329, 0.1329, 1.0];
    /// Game over dimming panel
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
}
