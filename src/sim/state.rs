//! Game state and core simulation types
//!
//! Entity models are plain data; the systems in `physics`, `spawn` and `tick`
//! mutate them. `GameState` owns everything a session needs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::powerup::PowerupTimer;
use crate::consts::*;
use crate::rgb_hex;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, simulation frozen
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

/// Fading snapshot of the player centre, pushed on every jump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// The player (a cow, in space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position and size; x never changes
    pub bounds: Rect,
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Cosmetic tilt derived from velocity (radians)
    pub rotation: f32,
    /// Jump trail (newest first, at most TRAIL_LENGTH)
    pub trail: Vec<TrailPoint>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bounds: Rect::new(
                PLAYER_X,
                tuning.game_height / 2.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            vel_y: 0.0,
            gravity: tuning.gravity,
            jump_force: tuning.jump_force,
            rotation: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Apply the jump impulse and record a trail point
    pub fn jump(&mut self) {
        self.vel_y = self.jump_force;
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.bounds.center(),
                alpha: 1.0,
            },
        );
        self.trail.truncate(TRAIL_LENGTH);
    }
}

/// Hazard variants with their animation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Thin pulsing laser
    Beam { pulse_phase: f32, intensity: f32 },
    /// Spinning, breathing energy ball
    Orb {
        rotation: f32,
        pulse_phase: f32,
        scale: f32,
    },
    /// Tall plasma wall with a travelling wave
    Wall { wave_phase: f32 },
}

impl HazardKind {
    pub const fn beam() -> Self {
        HazardKind::Beam {
            pulse_phase: 0.0,
            intensity: 1.0,
        }
    }

    pub const fn orb() -> Self {
        HazardKind::Orb {
            rotation: 0.0,
            pulse_phase: 0.0,
            scale: 1.0,
        }
    }

    pub const fn wall() -> Self {
        HazardKind::Wall { wave_phase: 0.0 }
    }

    /// Width and height of this kind
    pub fn size(&self) -> Vec2 {
        match self {
            HazardKind::Beam { .. } => Vec2::new(15.0, 120.0),
            HazardKind::Orb { .. } => Vec2::new(70.0, 70.0),
            HazardKind::Wall { .. } => Vec2::new(25.0, 160.0),
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            HazardKind::Beam { .. } => rgb_hex(0xFF0040),
            HazardKind::Orb { .. } => rgb_hex(0xFF4000),
            HazardKind::Wall { .. } => rgb_hex(0x8000FF),
        }
    }
}

/// A lethal obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub bounds: Rect,
    pub kind: HazardKind,
}

/// Collectible token size
pub const COLLECTIBLE_SIZE: f32 = 50.0;

/// A power-up token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub bounds: Rect,
    pub rotation: f32,
    pub scale: f32,
    pub pulse_phase: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    /// Alpha lost per tick
    pub decay: f32,
    pub color: [f32; 4],
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.size > 0.5
    }
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 512;

/// Background decoration variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecorationKind {
    Star { twinkle_phase: f32 },
    Nebula { drift_phase: f32 },
}

/// Slow-moving scenery behind the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub bounds: Rect,
    /// Fraction of scroll speed
    pub speed: f32,
    pub color: [f32; 4],
    pub kind: DecorationKind,
}

/// A point of the wrapping parallax starfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle: f32,
    pub speed: f32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Floor,
}

/// Notifications for the host (audio cues, screen switches)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Collected { pos: Vec2 },
    PowerupExpired,
    GameOver { cause: DeathCause },
    ReturnedToMenu,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "fresh_rng")]
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks survived this run
    pub score: u64,
    /// Currency from collectibles
    pub tokens: u32,
    /// Current scroll speed (ramps every tick)
    pub scroll_speed: f32,
    pub player: Player,
    /// Hazards in spawn order (last = most recent)
    pub hazards: Vec<Hazard>,
    /// Collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub decorations: Vec<Decoration>,
    pub starfield: Vec<Star>,
    pub powerup: PowerupTimer,
    /// Pending events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            scroll_speed: tuning.base_scroll_speed,
            tuning,
            phase: GamePhase::Start,
            score: 0,
            tokens: 0,
            hazards: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            decorations: Vec::new(),
            starfield: Vec::with_capacity(STARFIELD_COUNT),
            powerup: PowerupTimer::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::spawn::seed_starfield(&mut state);
        super::spawn::seed_decorations(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Back to a fresh run: counters, player, containers and power-up.
    /// The starfield is kept; decorations are re-seeded.
    pub fn reset(&mut self) {
        self.score = 0;
        self.tokens = 0;
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.player = Player::new(&self.tuning);
        self.hazards.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.decorations.clear();
        self.powerup.deactivate();

        super::spawn::seed_decorations(self);
    }

    /// Distance shown to the player
    pub fn distance(&self) -> u64 {
        self.score / SCORE_PER_DISTANCE
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
