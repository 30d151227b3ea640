//! Procedural spawning
//!
//! Three independent generators run once per playing tick:
//! - hazards: spacing-gated only (always spawn once the last one has moved far enough)
//! - collectibles: random chance AND the same spacing gate
//! - decorations: random chance, no spacing
//!
//! Everything spawns at the right edge and is walked across by `physics`.
//! Particle emitters for jump, pickup and ambient drift live here too.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::state::{
    COLLECTIBLE_SIZE, Collectible, Decoration, DecorationKind, GameState, Hazard, HazardKind,
    MAX_PARTICLES, Particle, Star,
};
use crate::consts::*;
use crate::hsl_to_rgba;

/// Vertical range in which an entity's top edge may be placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeBand {
    pub min: f32,
    pub max: f32,
}

impl SafeBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample; a degenerate band (min > max) collapses to `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let max = self.max.max(self.min);
        self.min + rng.random::<f32>() * (max - self.min)
    }

    /// Sample, then keep an entity of `height` fully inside the arena
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R, height: f32, arena_height: f32) -> f32 {
        self.sample(rng).clamp(0.0, (arena_height - height).max(0.0))
    }
}

/// Safe band for each hazard kind (keeps every hazard passable)
pub fn hazard_band(kind: &HazardKind, arena_height: f32) -> SafeBand {
    match kind {
        HazardKind::Beam { .. } => SafeBand::new(50.0, arena_height - 170.0),
        HazardKind::Orb { .. } => SafeBand::new(50.0, arena_height - 120.0),
        HazardKind::Wall { .. } => SafeBand::new(30.0, arena_height - 200.0),
    }
}

/// Safe band for collectibles
pub fn collectible_band(arena_height: f32) -> SafeBand {
    SafeBand::new(70.0, arena_height - 120.0)
}

/// Spacing gate: nothing spawned yet, or the last spawn has moved `gap` in from the right edge
#[inline]
pub fn spacing_clear(last: Option<&Rect>, arena_width: f32, gap: f32) -> bool {
    last.is_none_or(|r| r.left() < arena_width - gap)
}

/// Spawn a hazard if the spacing gate allows. Returns true if one was added.
pub fn spawn_hazard(state: &mut GameState) -> bool {
    let width = state.tuning.game_width;
    let height = state.tuning.game_height;
    if !spacing_clear(
        state.hazards.last().map(|h| &h.bounds),
        width,
        state.tuning.spawn_gap,
    ) {
        return false;
    }

    let kind = match state.rng.random_range(0..3u32) {
        0 => HazardKind::beam(),
        1 => HazardKind::orb(),
        _ => HazardKind::wall(),
    };
    let size = kind.size();
    let y = hazard_band(&kind, height).place(&mut state.rng, size.y, height);

    let id = state.next_entity_id();
    state.hazards.push(Hazard {
        id,
        bounds: Rect::new(width, y, size.x, size.y),
        kind,
    });
    log::trace!("Spawned hazard {id} {kind:?} at y={y:.1}");
    true
}

/// Roll for a collectible. Returns true if one was added.
pub fn spawn_collectible(state: &mut GameState) -> bool {
    let roll = state.rng.random::<f32>();
    if roll >= state.tuning.collectible_chance {
        return false;
    }
    let width = state.tuning.game_width;
    let height = state.tuning.game_height;
    if !spacing_clear(
        state.collectibles.last().map(|c| &c.bounds),
        width,
        state.tuning.spawn_gap,
    ) {
        return false;
    }

    let y = collectible_band(height).place(&mut state.rng, COLLECTIBLE_SIZE, height);
    let id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id,
        bounds: Rect::new(width, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
        rotation: 0.0,
        scale: 1.0,
        pulse_phase: 0.0,
    });
    log::debug!("Spawned collectible {id} at y={y:.1}");
    true
}

/// Roll for a background decoration
pub fn maybe_spawn_decoration(state: &mut GameState) -> bool {
    if state.rng.random::<f32>() < state.tuning.decoration_chance {
        spawn_decoration(state);
        return true;
    }
    false
}

/// Spawn one decoration of a random kind at the right edge
pub fn spawn_decoration(state: &mut GameState) {
    let width = state.tuning.game_width;
    let height = state.tuning.game_height;
    let rng = &mut state.rng;

    let decoration = if rng.random_bool(0.5) {
        let w = 4.0 + rng.random::<f32>() * 8.0;
        let h = 4.0 + rng.random::<f32>() * 8.0;
        let y = SafeBand::new(0.0, height).place(rng, h, height);
        Decoration {
            bounds: Rect::new(width, y, w, h),
            speed: 0.1 + rng.random::<f32>() * 0.2,
            kind: DecorationKind::Star {
                twinkle_phase: rng.random::<f32>() * std::f32::consts::TAU,
            },
            color: hsl_to_rgba(200.0 + rng.random::<f32>() * 60.0, 0.7, 0.8, 1.0),
        }
    } else {
        let w = 100.0 + rng.random::<f32>() * 100.0;
        let h = 80.0 + rng.random::<f32>() * 60.0;
        let y = SafeBand::new(75.0, height - 75.0).place(rng, h, height);
        Decoration {
            bounds: Rect::new(width, y, w, h),
            speed: 0.05 + rng.random::<f32>() * 0.1,
            kind: DecorationKind::Nebula {
                drift_phase: rng.random::<f32>() * std::f32::consts::TAU,
            },
            color: hsl_to_rgba(180.0 + rng.random::<f32>() * 80.0, 0.4, 0.25, 1.0),
        }
    };
    state.decorations.push(decoration);
}

/// Initial decorations so the first frame is not empty
pub fn seed_decorations(state: &mut GameState) {
    for _ in 0..INITIAL_DECORATIONS {
        spawn_decoration(state);
    }
}

/// Fill the parallax starfield across the whole arena
pub fn seed_starfield(state: &mut GameState) {
    let width = state.tuning.game_width;
    let height = state.tuning.game_height;
    let rng = &mut state.rng;

    state.starfield.clear();
    for _ in 0..STARFIELD_COUNT {
        state.starfield.push(Star {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            size: 1.0 + rng.random::<f32>() * 2.0,
            twinkle: rng.random::<f32>() * std::f32::consts::TAU,
            speed: 0.5 + rng.random::<f32>() * 1.5,
        });
    }
}

fn push_particle(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Burst of exhaust below the player on jump
pub fn emit_jump_particles(state: &mut GameState) {
    let origin = Vec2::new(
        state.player.bounds.center().x,
        state.player.bounds.bottom(),
    );
    let rng = &mut state.rng;
    for _ in 0..8 {
        let particle = Particle {
            pos: origin,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                rng.random::<f32>() * 3.0 + 1.0,
            ),
            size: rng.random::<f32>() * 6.0 + 2.0,
            alpha: 1.0,
            decay: 0.02,
            color: hsl_to_rgba(200.0 + rng.random::<f32>() * 60.0, 0.8, 0.7, 1.0),
        };
        push_particle(&mut state.particles, particle);
    }
}

/// Sparkle burst where a collectible was picked up
pub fn emit_collection_particles(state: &mut GameState, pos: Vec2) {
    let rng = &mut state.rng;
    for _ in 0..20 {
        let particle = Particle {
            pos,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 8.0,
                (rng.random::<f32>() - 0.5) * 8.0,
            ),
            size: rng.random::<f32>() * 8.0 + 3.0,
            alpha: 1.0,
            decay: 0.03,
            color: hsl_to_rgba(300.0 + rng.random::<f32>() * 60.0, 0.8, 0.7, 1.0),
        };
        push_particle(&mut state.particles, particle);
    }
}

/// One faint dust mote drifting in from the right edge
pub fn emit_ambient_particle(state: &mut GameState) {
    let width = state.tuning.game_width;
    let height = state.tuning.game_height;
    let particle = Particle {
        pos: Vec2::new(width, state.rng.random::<f32>() * height),
        vel: Vec2::new(-state.scroll_speed * 0.5, 0.0),
        size: state.rng.random::<f32>() * 3.0 + 1.0,
        alpha: 0.6,
        decay: 0.005,
        color: [1.0, 1.0, 1.0, 1.0],
    };
    push_particle(&mut state.particles, particle);
}
