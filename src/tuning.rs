//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a run can be
//! retuned from a JSON file without recompiling. Missing fields fall back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay numbers for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub game_width: f32,
    pub game_height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub base_scroll_speed: f32,
    pub scroll_accel: f32,
    pub spawn_gap: f32,
    pub collectible_chance: f32,
    pub decoration_chance: f32,
    pub collision_padding: f32,
    pub powerup_duration_ticks: u32,
    pub tokens_per_pickup: u32,
    pub ambient_particle_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            base_scroll_speed: BASE_SCROLL_SPEED,
            scroll_accel: SCROLL_ACCEL,
            spawn_gap: SPAWN_GAP,
            collectible_chance: COLLECTIBLE_CHANCE,
            decoration_chance: DECORATION_CHANCE,
            collision_padding: COLLISION_PADDING,
            powerup_duration_ticks: POWERUP_DURATION_TICKS,
            tokens_per_pickup: TOKENS_PER_PICKUP,
            ambient_particle_interval: AMBIENT_PARTICLE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the arena cannot work with, clamp the rest into range
    pub fn validate(&mut self) -> Result<(), TuningError> {
        if !(self.game_width > PLAYER_X + PLAYER_WIDTH) {
            return Err(TuningError::Invalid(format!(
                "game_width {} leaves no room for the player",
                self.game_width
            )));
        }
        if !(self.game_height > PLAYER_HEIGHT) {
            return Err(TuningError::Invalid(format!(
                "game_height {} is shorter than the player",
                self.game_height
            )));
        }

        let clamp_chance = |name: &str, value: &mut f32| {
            let clamped = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
            if clamped != *value {
                log::warn!("{name} {value} out of range, clamped to {clamped}");
                *value = clamped;
            }
        };
        clamp_chance("collectible_chance", &mut self.collectible_chance);
        clamp_chance("decoration_chance", &mut self.decoration_chance);

        // Wrong-signed motion would stop the scroll or push entities rightward
        let fallback = |name: &str, value: &mut f32, sane: fn(f32) -> bool, default: f32| {
            if !value.is_finite() || !sane(*value) {
                log::warn!("{name} {value} out of range, using {default}");
                *value = default;
            }
        };
        fallback("gravity", &mut self.gravity, |v| v >= 0.0, GRAVITY);
        fallback("jump_force", &mut self.jump_force, |v| v <= 0.0, JUMP_FORCE);
        fallback(
            "base_scroll_speed",
            &mut self.base_scroll_speed,
            |v| v > 0.0,
            BASE_SCROLL_SPEED,
        );
        fallback("scroll_accel", &mut self.scroll_accel, |v| v >= 0.0, SCROLL_ACCEL);

        if !(self.spawn_gap >= 0.0) {
            log::warn!("spawn_gap {} negative, using 0", self.spawn_gap);
            self.spawn_gap = 0.0;
        }
        if !(self.collision_padding >= 0.0) {
            log::warn!("collision_padding {} negative, using 0", self.collision_padding);
            self.collision_padding = 0.0;
        }
        if self.powerup_duration_ticks == 0 {
            log::warn!("powerup_duration_ticks 0, using 1");
            self.powerup_duration_ticks = 1;
        }
        if self.ambient_particle_interval == 0 {
            log::warn!("ambient_particle_interval 0, using 1");
            self.ambient_particle_interval = 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
        assert_eq!(tuning.powerup_duration_ticks, POWERUP_DURATION_TICKS);
    }

    #[test]
    fn test_chances_clamped() {
        let tuning = Tuning::from_json(r#"{ "collectible_chance": 4.0, "decoration_chance": -1 }"#)
            .unwrap();
        assert_eq!(tuning.collectible_chance, 1.0);
        assert_eq!(tuning.decoration_chance, 0.0);
    }

    #[test]
    fn test_wrong_signed_motion_falls_back() {
        let tuning = Tuning::from_json(
            r#"{ "gravity": -1, "jump_force": 5, "base_scroll_speed": -2, "scroll_accel": -0.1 }"#,
        )
        .unwrap();
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
        assert_eq!(tuning.base_scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(tuning.scroll_accel, SCROLL_ACCEL);

        let mut tuning = Tuning {
            base_scroll_speed: f32::NAN,
            gravity: f32::INFINITY,
            ..Tuning::default()
        };
        tuning.validate().unwrap();
        assert_eq!(tuning.base_scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(tuning.gravity, GRAVITY);

        // Zero gravity and zero ramp are allowed
        let tuning = Tuning::from_json(r#"{ "gravity": 0, "scroll_accel": 0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.0);
        assert_eq!(tuning.scroll_accel, 0.0);
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let err = Tuning::from_json(r#"{ "game_height": 10 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_scroll_speed": 3.5 }}"#).unwrap();

        let tuning = Tuning::load(file.path()).unwrap();
        assert_eq!(tuning.base_scroll_speed, 3.5);

        let missing = Tuning::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(TuningError::Io(_))));
    }
}
