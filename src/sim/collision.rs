//! Axis-aligned collision for the side-scroller
//!
//! Every entity is an axis-aligned box anchored at its top-left corner.
//! Hitboxes are shrunk by a padding on all sides before testing so grazing
//! contact is forgiven.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True once the box has scrolled fully past the left edge
    #[inline]
    pub fn is_off_left(&self) -> bool {
        self.right() <= 0.0
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_padded(other, 0.0)
    }

    /// Overlap test with both boxes shrunk by `padding` on every side
    pub fn overlaps_padded(&self, other: &Rect, padding: f32) -> bool {
        self.left() + padding < other.right() - padding
            && self.right() - padding > other.left() + padding
            && self.top() + padding < other.bottom() - padding
            && self.bottom() - padding > other.top() + padding
    }
}
