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

    /// Byte stride for a host vertex buffer layout
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Scale a color's alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use crate::rgb_hex;

    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const YELLOW: [f32; 4] = rgb_hex(0xFFFF00);
    pub const MAGENTA: [f32; 4] = rgb_hex(0xFF00FF);

    /// Player and trail
    pub const TRAIL: [f32; 4] = rgb_hex(0x00D4FF);
    pub const COW_BODY: [f32; 4] = WHITE;
    pub const COW_SPOTS: [f32; 4] = BLACK;

    /// Power-up tint
    pub const POWERUP: [f32; 4] = rgb_hex(0xFF6B6B);
    pub const COW_BODY_POWERED: [f32; 4] = rgb_hex(0xFF9999);
    pub const COW_SPOTS_POWERED: [f32; 4] = rgb_hex(0xCC0000);

    /// Token logo
    pub const TOKEN_CORE: [f32; 4] = rgb_hex(0x00D4FF);
    pub const TOKEN_BAR: [f32; 4] = rgb_hex(0x4ECDC4);
    pub const TOKEN_DOTS: [f32; 4] = rgb_hex(0xFF6B6B);
}
