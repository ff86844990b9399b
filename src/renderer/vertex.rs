//! GPU-side data layouts

use bytemuck::{Pod, Zeroable};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Color;

/// Flat-colored vertex in play-field coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Play-field to clip-space transform: `clip = position * scale + offset`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FieldUniform {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

impl FieldUniform {
    /// Letterbox the play field into a `size` pixel viewport, centred
    pub fn for_viewport(size: (u32, u32)) -> Self {
        let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
        let px = (w / SCREEN_WIDTH).min(h / SCREEN_HEIGHT);
        let sx = 2.0 * px / w;
        let sy = -2.0 * px / h;
        Self {
            scale: [sx, sy],
            offset: [-SCREEN_WIDTH / 2.0 * sx, -SCREEN_HEIGHT / 2.0 * sy],
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale[0] + self.offset[0],
            y * self.scale[1] + self.offset[1],
        )
    }
}

/// Paint colors for sprites
pub mod colors {
    use crate::platform::Color;

    pub const PLAYER: Color = [0.85, 0.1, 0.1, 1.0];
    pub const PICKUP: Color = [0.35, 0.45, 0.6, 1.0];
    pub const BUS: Color = [0.95, 0.7, 0.1, 1.0];
    pub const POLICE: Color = [0.1, 0.1, 0.15, 1.0];
    pub const POLICE_LIGHT: Color = [0.2, 0.4, 1.0, 1.0];
    pub const TAXI: Color = [1.0, 0.85, 0.0, 1.0];
    pub const GLASS: Color = [0.55, 0.8, 0.95, 1.0];
    pub const TIRE: Color = [0.05, 0.05, 0.05, 1.0];
    pub const ASPHALT: Color = [0.22, 0.22, 0.24, 1.0];
    pub const LANE_MARK: Color = [0.95, 0.95, 0.95, 1.0];
    pub const KERB: Color = [0.8, 0.8, 0.8, 1.0];
    pub const GRASS: Color = [0.12, 0.45, 0.15, 1.0];
    pub const GRASS_DARK: Color = [0.08, 0.36, 0.11, 1.0];
    pub const BACKDROP_SKY: Color = [0.1, 0.12, 0.25, 1.0];
    pub const BACKDROP_GROUND: Color = [0.16, 0.16, 0.18, 1.0];
    pub const WRECK: Color = [0.35, 0.05, 0.05, 1.0];
}
