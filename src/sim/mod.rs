//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use powerup::PowerupTimer;
pub use spawn::SafeBand;
pub use state::{
    COLLECTIBLE_SIZE, Collectible, DeathCause, Decoration, DecorationKind, GameEvent, GamePhase,
    GameState, Hazard, HazardKind, MAX_PARTICLES, Particle, Player, Star, TrailPoint,
};
pub use tick::{TickInput, jump, restart, return_to_menu, start, tick};
