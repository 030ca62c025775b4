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

/// Colors for table elements
pub mod colors {
    /// Felt (#175f17)
    pub const FELT: [f32; 4] = [0.090, 0.373, 0.090, 1.0];
    pub const RAIL: [f32; 4] = [0.36, 0.20, 0.09, 1.0];
    pub const RAIL_FLASH: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const AIM_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
}
