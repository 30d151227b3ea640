//! Frame building
//!
//! Turns a read-only view of the game into draw data for the host:
//! a triangle list plus textured sprite quads, interleaved in layer order.
//! Image-backed entities fall back to procedural shapes when no texture was
//! supplied, so a frame is always complete.

use glam::Vec2;
use serde::Serialize;
use std::f32::consts::TAU;

use super::shapes::{self, Transform2};
use super::vertex::{Vertex, colors, with_alpha};
use crate::Settings;
use crate::sim::{Collectible, DecorationKind, GameState, Hazard, HazardKind};

/// Host-side handle for a loaded image
pub type TextureId = u32;

/// Images the host managed to load; `None` means draw procedurally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Assets {
    pub player: Option<TextureId>,
    pub collectible: Option<TextureId>,
}

/// A textured quad centred on `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub center: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

/// One step of the draw list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    /// `count` vertices of `Frame::vertices` starting at `start`
    Triangles { start: u32, count: u32 },
    Sprite(SpriteDraw),
}

/// Everything the host needs to present one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub clear_color: [f32; 4],
    #[serde(skip)]
    pub vertices: Vec<Vertex>,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    fn push_vertices(&mut self, vertices: Vec<Vertex>) {
        if vertices.is_empty() {
            return;
        }
        let added = vertices.len() as u32;
        let start = self.vertices.len() as u32;
        self.vertices.extend(vertices);
        // Merge with the previous batch when nothing was drawn in between
        if let Some(DrawCommand::Triangles { count, .. }) = self.commands.last_mut() {
            *count += added;
        } else {
            self.commands.push(DrawCommand::Triangles {
                start,
                count: added,
            });
        }
    }

    fn push_sprite(&mut self, sprite: SpriteDraw) {
        self.commands.push(DrawCommand::Sprite(sprite));
    }

    /// Sprite draws in submission order
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            DrawCommand::Triangles { .. } => None,
        })
    }

    /// Vertex data ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Build the draw list for the current state.
///
/// Layers, back to front: starfield, decorations, hazards, collectibles,
/// trail, player, particles, power-up border glow.
pub fn build_frame(state: &GameState, settings: &Settings, assets: &Assets, time_secs: f32) -> Frame {
    let mut frame = Frame {
        clear_color: colors::BACKGROUND,
        ..Default::default()
    };
    let segments = settings.quality.circle_segments();
    let small_segments = (segments / 2).max(6);
    let powered = state.powerup.is_active();

    if settings.quality.starfield_enabled() {
        let mut vertices = Vec::new();
        for star in &state.starfield {
            let alpha = 0.3 + star.twinkle.sin() * 0.2;
            vertices.extend(shapes::circle(
                star.pos,
                star.size,
                with_alpha(colors::WHITE, alpha),
                small_segments,
            ));
        }
        frame.push_vertices(vertices);
    }

    for decoration in &state.decorations {
        let center = decoration.bounds.center();
        let radii = decoration.bounds.size * 0.5;
        match decoration.kind {
            DecorationKind::Star { twinkle_phase } => {
                let alpha = 0.4 + twinkle_phase.sin() * 0.2;
                frame.push_vertices(shapes::circle(
                    center,
                    radii.x,
                    with_alpha(decoration.color, alpha),
                    small_segments,
                ));
            }
            DecorationKind::Nebula { drift_phase } => {
                if !settings.quality.nebula_enabled() {
                    continue;
                }
                // Faint falloff: wide dim shell, brighter core
                let center = center + Vec2::new(0.0, drift_phase.sin() * 4.0);
                frame.push_vertices(shapes::ellipse(
                    center,
                    radii,
                    with_alpha(decoration.color, 0.08),
                    segments,
                ));
                frame.push_vertices(shapes::ellipse(
                    center,
                    radii * 0.5,
                    with_alpha(decoration.color, 0.15),
                    segments,
                ));
            }
        }
    }

    for hazard in &state.hazards {
        frame.push_vertices(hazard_shapes(hazard, segments, time_secs));
    }

    for collectible in &state.collectibles {
        collectible_shapes(&mut frame, collectible, assets, segments);
    }

    if settings.trails {
        let color = if powered { colors::POWERUP } else { colors::TRAIL };
        frame.push_vertices(shapes::trail_dots(&state.player.trail, color, small_segments));
    }

    player_shapes(&mut frame, state, settings, assets, segments);

    if settings.particles {
        let mut vertices = Vec::new();
        for p in &state.particles {
            vertices.extend(shapes::circle(
                p.pos,
                p.size,
                with_alpha(p.color, p.alpha),
                small_segments,
            ));
        }
        frame.push_vertices(vertices);
    }

    if powered && settings.powerup_effects {
        let alpha = if settings.effective_border_pulse() {
            0.3 + (time_secs * 10.0).sin() * 0.2
        } else {
            0.3
        };
        frame.push_vertices(shapes::rect_outline(
            &Transform2::at(Vec2::ZERO),
            Vec2::ZERO,
            Vec2::new(state.tuning.game_width, state.tuning.game_height),
            8.0,
            with_alpha(colors::POWERUP, alpha),
        ));
    }

    frame
}

/// Cheap stable hash for per-frame cosmetic jitter
fn jitter(id: u32, frame: u64, salt: u32) -> f32 {
    let mut x = ((u64::from(id) << 32) | u64::from(salt)) ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    x ^= x >> 33;
    (x >> 40) as f32 / (1u64 << 24) as f32
}

fn hazard_shapes(hazard: &Hazard, segments: u32, time_secs: f32) -> Vec<Vertex> {
    let b = &hazard.bounds;
    let color = hazard.kind.color();
    let mut vertices = Vec::new();

    match hazard.kind {
        HazardKind::Beam { intensity, .. } => {
            // Glow, body, white core, edge
            vertices.extend(shapes::rect(
                b.pos - Vec2::splat(6.0),
                b.size + Vec2::splat(12.0),
                with_alpha(color, 0.25 * intensity),
            ));
            vertices.extend(shapes::rect(b.pos, b.size, with_alpha(color, intensity)));
            vertices.extend(shapes::rect(
                b.pos + Vec2::new(3.0, 10.0),
                b.size - Vec2::new(6.0, 20.0),
                with_alpha(colors::WHITE, intensity),
            ));
            vertices.extend(shapes::rect_outline(
                &Transform2::at(Vec2::ZERO),
                b.pos - Vec2::splat(2.0),
                b.size + Vec2::splat(4.0),
                4.0,
                with_alpha(color, 0.8),
            ));
        }
        HazardKind::Orb {
            rotation, scale, ..
        } => {
            let xf = Transform2::new(b.center(), rotation, scale);
            let r = b.size.x * 0.5;
            vertices.extend(shapes::ring(
                xf.origin,
                (r - 4.0) * scale,
                (r + 4.0) * scale,
                color,
                segments,
            ));
            vertices.extend(shapes::circle(
                xf.origin,
                r / 1.5 * scale,
                with_alpha(color, 0.3),
                segments,
            ));
            vertices.extend(shapes::circle(xf.origin, r / 1.5 * 0.75 * scale, color, segments));
            vertices.extend(shapes::circle(xf.origin, r / 3.0 * scale, colors::WHITE, segments));
            // Crackling spokes
            for i in 0..6 {
                let dir = Vec2::from_angle(i as f32 / 6.0 * TAU);
                vertices.extend(shapes::line(
                    xf.apply(dir * (r * 0.5)),
                    xf.apply(dir * (r * 0.8)),
                    2.0,
                    colors::YELLOW,
                ));
            }
        }
        HazardKind::Wall { wave_phase } => {
            vertices.extend(shapes::rect(b.pos, b.size, color));
            vertices.extend(shapes::rect(
                b.pos + Vec2::new(5.0, 15.0),
                b.size - Vec2::new(10.0, 30.0),
                colors::WHITE,
            ));
            // Travelling wave down the middle
            let cx = b.center().x;
            let wave_point = |y: f32| Vec2::new(cx + (y * 0.1 + wave_phase).sin() * 8.0, y);
            let mut y = b.top();
            while y + 10.0 < b.bottom() {
                vertices.extend(shapes::line(
                    wave_point(y),
                    wave_point(y + 10.0),
                    3.0,
                    colors::MAGENTA,
                ));
                y += 10.0;
            }
            // Sparks flicker once per 60 Hz frame
            let frame_index = (time_secs.max(0.0) * 60.0) as u64;
            for i in 0..3 {
                let spark = Vec2::new(
                    b.right() + jitter(hazard.id, frame_index, i * 2) * 15.0,
                    b.top() + jitter(hazard.id, frame_index, i * 2 + 1) * b.size.y,
                );
                vertices.extend(shapes::circle(spark, 3.0, colors::YELLOW, 6));
            }
        }
    }

    vertices
}

fn collectible_shapes(frame: &mut Frame, c: &Collectible, assets: &Assets, segments: u32) {
    let xf = Transform2::new(c.bounds.center(), c.rotation, c.scale);
    let size = c.bounds.size;

    if let Some(texture) = assets.collectible {
        frame.push_sprite(SpriteDraw {
            texture,
            center: xf.origin,
            size,
            rotation: c.rotation,
            scale: c.scale,
        });
    } else {
        let mut vertices = shapes::circle(
            xf.origin,
            size.x / 6.0 * c.scale,
            colors::TOKEN_CORE,
            segments,
        );
        vertices.extend(shapes::rect_local(
            &xf,
            Vec2::new(-size.x / 4.0, -size.y / 8.0),
            Vec2::new(size.x / 2.0, size.y / 4.0),
            colors::TOKEN_BAR,
        ));
        for corner in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, 1.0),
        ] {
            vertices.extend(shapes::circle(
                xf.apply(corner * size / 3.0),
                3.0 * c.scale,
                colors::TOKEN_DOTS,
                8,
            ));
        }
        frame.push_vertices(vertices);
    }

    let ring_alpha = 0.5 + c.pulse_phase.sin() * 0.3;
    let ring_radius = (size.x / 2.0 + 10.0) * c.scale;
    frame.push_vertices(shapes::ring(
        xf.origin,
        ring_radius - 1.5,
        ring_radius + 1.5,
        with_alpha(colors::TRAIL, ring_alpha),
        segments,
    ));
}

fn player_shapes(
    frame: &mut Frame,
    state: &GameState,
    settings: &Settings,
    assets: &Assets,
    segments: u32,
) {
    let player = &state.player;
    let powered = state.powerup.is_active();
    let xf = Transform2::new(player.bounds.center(), player.rotation, 1.0);

    if let Some(texture) = assets.player {
        frame.push_sprite(SpriteDraw {
            texture,
            center: xf.origin,
            size: player.bounds.size,
            rotation: player.rotation,
            scale: 1.0,
        });
    } else {
        let (body, spots) = if powered {
            (colors::COW_BODY_POWERED, colors::COW_SPOTS_POWERED)
        } else {
            (colors::COW_BODY, colors::COW_SPOTS)
        };
        let mut vertices = Vec::new();
        let mut part = |min: (f32, f32), size: (f32, f32), color| {
            vertices.extend(shapes::rect_local(&xf, min.into(), size.into(), color));
        };
        // Body, head, legs, eyes
        part((-25.0, -20.0), (40.0, 25.0), body);
        part((-30.0, -25.0), (20.0, 15.0), body);
        for leg_x in [-20.0, -10.0, 0.0, 10.0] {
            part((leg_x, 5.0), (4.0, 8.0), body);
        }
        part((-28.0, -22.0), (2.0, 2.0), colors::BLACK);
        part((-24.0, -22.0), (2.0, 2.0), colors::BLACK);
        for (x, y, r) in [(-15.0, -10.0, 4.0), (-5.0, -5.0, 3.0), (10.0, -15.0, 5.0)] {
            vertices.extend(shapes::circle(xf.apply(Vec2::new(x, y)), r, spots, segments));
        }
        frame.push_vertices(vertices);
    }

    if powered && settings.powerup_effects {
        let half = player.bounds.size * 0.5;
        frame.push_vertices(shapes::rect_outline(
            &xf,
            -half - Vec2::splat(5.0),
            player.bounds.size + Vec2::splat(10.0),
            3.0,
            colors::POWERUP,
        ));
    }
}
