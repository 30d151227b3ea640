//! Motion integration
//!
//! Fixed step, one call per tick. The player falls under gravity; everything
//! else scrolls left at a multiple of the current scroll speed. Entities that
//! die are culled in the same call that kills them.

use rand::Rng;

use super::state::{Collectible, Decoration, DecorationKind, Hazard, HazardKind, Particle, Player, Star};
use crate::consts::*;

/// Result of the player boundary check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Inside,
    /// Hit the ceiling and was clamped
    Ceiling,
    /// Fell through the floor (lethal)
    Floor,
}

/// Advance player velocity, position, tilt and trail by one tick
pub fn integrate_player(player: &mut Player) {
    player.vel_y += player.gravity;
    player.bounds.pos.y += player.vel_y;

    player.rotation = (player.vel_y * ROTATION_FACTOR).clamp(-MAX_ROTATION, MAX_ROTATION);

    for point in &mut player.trail {
        point.alpha -= TRAIL_FADE;
    }
    player.trail.retain(|p| p.alpha > 0.0);
}

/// Ceiling is solid, floor is lethal
pub fn resolve_bounds(player: &mut Player, arena_height: f32) -> Boundary {
    if player.bounds.top() < 0.0 {
        player.bounds.pos.y = 0.0;
        player.vel_y = 0.0;
        return Boundary::Ceiling;
    }
    if player.bounds.bottom() > arena_height {
        return Boundary::Floor;
    }
    Boundary::Inside
}

/// Per-kind hazard animation
fn animate_hazard(kind: &mut HazardKind) {
    match kind {
        HazardKind::Beam {
            pulse_phase,
            intensity,
        } => {
            *pulse_phase += 0.2;
            *intensity = 0.8 + pulse_phase.sin() * 0.2;
        }
        HazardKind::Orb {
            rotation,
            pulse_phase,
            scale,
        } => {
            *rotation += 0.15;
            *pulse_phase += 0.12;
            *scale = 1.0 + pulse_phase.sin() * 0.15;
        }
        HazardKind::Wall { wave_phase } => {
            *wave_phase += 0.1;
        }
    }
}

/// Scroll and animate hazards, dropping those fully off the left edge
pub fn advance_hazards(hazards: &mut Vec<Hazard>, scroll_speed: f32) {
    let dx = scroll_speed * FOREGROUND_SPEED_MULT;
    for hazard in hazards.iter_mut() {
        hazard.bounds.pos.x -= dx;
        animate_hazard(&mut hazard.kind);
    }
    hazards.retain(|h| !h.bounds.is_off_left());
}

/// Scroll and spin collectibles, dropping those fully off the left edge
pub fn advance_collectibles(collectibles: &mut Vec<Collectible>, scroll_speed: f32) {
    let dx = scroll_speed * FOREGROUND_SPEED_MULT;
    for c in collectibles.iter_mut() {
        c.bounds.pos.x -= dx;
        c.rotation += 0.1;
        c.pulse_phase += 0.15;
        c.scale = 1.0 + c.pulse_phase.sin() * 0.2;
    }
    collectibles.retain(|c| !c.bounds.is_off_left());
}

/// Move, fade and shrink particles
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.alpha -= p.decay;
        p.size *= 0.98;
    }
    particles.retain(Particle::is_alive);
}

/// Drift decorations at their own fraction of the scroll speed
pub fn advance_decorations(decorations: &mut Vec<Decoration>, scroll_speed: f32) {
    for d in decorations.iter_mut() {
        d.bounds.pos.x -= scroll_speed * d.speed;
        match &mut d.kind {
            DecorationKind::Star { twinkle_phase } => *twinkle_phase += 0.05,
            DecorationKind::Nebula { drift_phase } => *drift_phase += 0.02,
        }
    }
    decorations.retain(|d| !d.bounds.is_off_left());
}

/// Parallax starfield; stars leaving on the left re-enter on the right
pub fn advance_starfield<R: Rng + ?Sized>(
    stars: &mut [Star],
    scroll_speed: f32,
    arena_width: f32,
    arena_height: f32,
    rng: &mut R,
) {
    for star in stars.iter_mut() {
        star.twinkle += 0.05;
        star.pos.x -= star.speed * scroll_speed * 0.1;
        if star.pos.x < 0.0 {
            star.pos.x = arena_width;
            star.pos.y = rng.random::<f32>() * arena_height;
        }
    }
}
