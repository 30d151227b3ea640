//! Cosmic Cow - A side-scrolling space arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Frame building with procedural fallbacks
//! - `driver`: Fixed-step scheduling driven by the host's refresh callback
//! - `input`: Activate-press debouncing
//! - `hud`: Read-only UI projections and achievements
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical arena size
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -12.0;
    /// Rotation = velocity * factor, clamped to ±MAX_ROTATION (radians)
    pub const ROTATION_FACTOR: f32 = 0.05;
    pub const MAX_ROTATION: f32 = 0.5;

    /// Jump trail
    pub const TRAIL_LENGTH: usize = 8;
    pub const TRAIL_FADE: f32 = 0.15;

    /// Scrolling
    pub const BASE_SCROLL_SPEED: f32 = 2.0;
    pub const SCROLL_ACCEL: f32 = 0.002;
    /// Hazards and collectibles move at this multiple of the scroll speed
    pub const FOREGROUND_SPEED_MULT: f32 = 2.0;

    /// Minimum horizontal gap between consecutive spawns of one category
    pub const SPAWN_GAP: f32 = 200.0;
    pub const COLLECTIBLE_CHANCE: f32 = 0.004;
    pub const DECORATION_CHANCE: f32 = 0.002;
    pub const INITIAL_DECORATIONS: usize = 5;
    pub const STARFIELD_COUNT: usize = 150;

    /// Hitboxes shrink by this much on every side
    pub const COLLISION_PADDING: f32 = 5.0;

    /// Power-up
    pub const POWERUP_DURATION_TICKS: u32 = 300;
    pub const TOKENS_PER_PICKUP: u32 = 10;

    /// Score ticks per displayed distance unit
    pub const SCORE_PER_DISTANCE: u64 = 10;

    /// Ambient drift particle every N ticks (~200 ms at 60 Hz)
    pub const AMBIENT_PARTICLE_INTERVAL: u64 = 12;
}

/// Convert HSL (hue in degrees, saturation/lightness in 0..=1) to linear RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;

    [r + m, g + m, b + m, alpha]
}

/// Convert a 0xRRGGBB literal to RGBA
#[inline]
pub const fn rgb_hex(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}
