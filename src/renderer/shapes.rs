//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a plain triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, with_alpha};
use crate::sim::TrailPoint;

/// Local-to-world placement: scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    pub origin: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl Transform2 {
    pub const fn at(origin: Vec2) -> Self {
        Self {
            origin,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub const fn new(origin: Vec2, rotation: f32, scale: f32) -> Self {
        Self {
            origin,
            rotation,
            scale,
        }
    }

    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.origin + Vec2::from_angle(self.rotation).rotate(local * self.scale)
    }
}

/// Two triangles for a quad given in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> [Vertex; 6] {
    let [a, b, c, d] = corners;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rect_local(&Transform2::at(Vec2::ZERO), min, size, color)
}

/// Filled rectangle given in local coordinates of `xf`
pub fn rect_local(xf: &Transform2, min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let corners = [
        xf.apply(min),
        xf.apply(Vec2::new(min.x + size.x, min.y)),
        xf.apply(min + size),
        xf.apply(Vec2::new(min.x, min.y + size.y)),
    ];
    quad(corners, color).to_vec()
}

/// Rectangle outline drawn as four bars centred on the edges
pub fn rect_outline(
    xf: &Transform2,
    min: Vec2,
    size: Vec2,
    thickness: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let h = thickness * 0.5;
    let mut vertices = Vec::with_capacity(24);
    // Top and bottom span the full width including corners
    vertices.extend(rect_local(
        xf,
        Vec2::new(min.x - h, min.y - h),
        Vec2::new(size.x + thickness, thickness),
        color,
    ));
    vertices.extend(rect_local(
        xf,
        Vec2::new(min.x - h, min.y + size.y - h),
        Vec2::new(size.x + thickness, thickness),
        color,
    ));
    vertices.extend(rect_local(
        xf,
        Vec2::new(min.x - h, min.y + h),
        Vec2::new(thickness, size.y - thickness),
        color,
    ));
    vertices.extend(rect_local(
        xf,
        Vec2::new(min.x + size.x - h, min.y + h),
        Vec2::new(thickness, size.y - thickness),
        color,
    ));
    vertices
}

/// Thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width * 0.5);
    quad([a + perp, b + perp, b - perp, a - perp], color).to_vec()
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    if radius <= 0.0 {
        return Vec::new();
    }
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (sin1, cos1) = theta1.sin_cos();
        let (sin2, cos2) = theta2.sin_cos();

        let inner1 = center + Vec2::new(cos1, sin1) * inner_radius;
        let outer1 = center + Vec2::new(cos1, sin1) * outer_radius;
        let inner2 = center + Vec2::new(cos2, sin2) * inner_radius;
        let outer2 = center + Vec2::new(cos2, sin2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Jump trail as fading dots, newest (first) largest
pub fn trail_dots(trail: &[TrailPoint], color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(trail.len() * segments as usize * 3);
    for (index, point) in trail.iter().enumerate() {
        let radius = 8.0 - index as f32;
        vertices.extend(circle(
            point.pos,
            radius,
            with_alpha(color, point.alpha * 0.6),
            segments,
        ));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 5.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        assert!(circle(Vec2::ZERO, 0.0, [1.0; 4], 16).is_empty());
    }

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[2].position, [40.0, 60.0]);
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 5.0), [1.0; 4]).is_empty());
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        let xf = Transform2::new(Vec2::new(100.0, 100.0), std::f32::consts::FRAC_PI_2, 2.0);
        let p = xf.apply(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(100.0, 102.0)).length() < 1e-4);
    }

    #[test]
    fn test_trail_dots_shrink_and_fade() {
        let trail = [
            TrailPoint {
                pos: Vec2::ZERO,
                alpha: 1.0,
            },
            TrailPoint {
                pos: Vec2::new(10.0, 0.0),
                alpha: 0.5,
            },
        ];
        let v = trail_dots(&trail, [1.0; 4], 8);
        assert_eq!(v.len(), 48);
        assert!((v[0].color[3] - 0.6).abs() < 1e-6);
        assert!((v[24].color[3] - 0.3).abs() < 1e-6);
        // Second dot has radius 7
        let edge = Vec2::from(v[25].position) - Vec2::new(10.0, 0.0);
        assert!((edge.length() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
        assert_eq!(line(Vec2::ZERO, Vec2::X, 2.0, [1.0; 4]).len(), 6);
    }
}
