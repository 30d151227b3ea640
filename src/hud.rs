//! Read-only UI projections
//!
//! Recomputed from `GameState` every frame; never written back.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Values the HUD and game-over screen display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    /// Score ticks / 10
    pub distance: u64,
    pub tokens: u32,
    /// Power-up bar fill, 0.0 - 1.0
    pub powerup_fraction: f32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            distance: state.distance(),
            tokens: state.tokens,
            powerup_fraction: state
                .powerup
                .fraction(state.tuning.powerup_duration_ticks),
        }
    }
}

/// Badges awarded on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    SpaceExplorer,
    StellarNavigator,
    CosmicChampion,
    GalaxyMaster,
    TokenCollector,
    TreasureHunter,
    WealthMaster,
    PowerUser,
    PerfectBalance,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Achievement::SpaceExplorer => "🚀 Space Explorer",
            Achievement::StellarNavigator => "🌟 Stellar Navigator",
            Achievement::CosmicChampion => "🌌 Cosmic Champion",
            Achievement::GalaxyMaster => "👑 Galaxy Master",
            Achievement::TokenCollector => "💎 Token Collector",
            Achievement::TreasureHunter => "💰 Treasure Hunter",
            Achievement::WealthMaster => "🏆 Wealth Master",
            Achievement::PowerUser => "⚡ Power User",
            Achievement::PerfectBalance => "🎯 Perfect Balance",
        }
    }
}

/// Achievements earned by a finished run
pub fn achievements(distance: u64, tokens: u32, powerup_active: bool) -> Vec<Achievement> {
    let mut earned = Vec::new();

    let distance_tiers = [
        (50, Achievement::SpaceExplorer),
        (200, Achievement::StellarNavigator),
        (500, Achievement::CosmicChampion),
        (1000, Achievement::GalaxyMaster),
    ];
    earned.extend(
        distance_tiers
            .iter()
            .filter(|(min, _)| distance > *min)
            .map(|(_, a)| *a),
    );

    let token_tiers = [
        (30, Achievement::TokenCollector),
        (80, Achievement::TreasureHunter),
        (150, Achievement::WealthMaster),
    ];
    earned.extend(
        token_tiers
            .iter()
            .filter(|(min, _)| tokens > *min)
            .map(|(_, a)| *a),
    );

    if powerup_active {
        earned.push(Achievement::PowerUser);
    }
    if distance > 100 && tokens > 50 {
        earned.push(Achievement::PerfectBalance);
    }

    earned
}

/// Achievements for the state's current run
pub fn run_achievements(state: &GameState) -> Vec<Achievement> {
    achievements(state.distance(), state.tokens, state.powerup.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_projection() {
        let mut state = GameState::new(1);
        state.score = 1239;
        state.tokens = 40;
        state.powerup.activate(300);
        for _ in 0..75 {
            state.powerup.tick();
        }
        let hud = Hud::from_state(&state);
        assert_eq!(hud.distance, 123);
        assert_eq!(hud.tokens, 40);
        assert!((hud.powerup_fraction - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_no_achievements_for_short_run() {
        assert!(achievements(50, 30, false).is_empty());
    }

    #[test]
    fn test_achievement_tiers() {
        let earned = achievements(201, 81, false);
        assert_eq!(
            earned,
            vec![
                Achievement::SpaceExplorer,
                Achievement::StellarNavigator,
                Achievement::TokenCollector,
                Achievement::TreasureHunter,
                Achievement::PerfectBalance,
            ]
        );
        assert!(achievements(1, 0, true).contains(&Achievement::PowerUser));
        assert_eq!(achievements(2000, 0, false).len(), 4);
    }
}
