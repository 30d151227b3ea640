//! Idle/demo mode pilot
//!
//! Picks a target altitude from the next hazard (or a nearby token when the
//! way is clear) and flaps whenever the predicted fall would overshoot it.

use super::state::GameState;

/// How far ahead of the player hazards are considered
const LOOKAHEAD: f32 = 260.0;
/// Ticks of free fall used for the prediction
const PREDICT_TICKS: f32 = 6.0;
/// Slack below the target before flapping
const TARGET_SLACK: f32 = 12.0;

/// Target y for the player centre
fn target_altitude(state: &GameState) -> f32 {
    let arena_h = state.tuning.game_height;
    let player = &state.player.bounds;

    let threat = state
        .hazards
        .iter()
        .filter(|h| h.bounds.right() > player.left() && h.bounds.left() < player.right() + LOOKAHEAD)
        .min_by(|a, b| {
            a.bounds
                .left()
                .partial_cmp(&b.bounds.left())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(hazard) = threat {
        // Aim for the middle of the larger gap
        let above = hazard.bounds.top();
        let below = arena_h - hazard.bounds.bottom();
        return if above > below {
            above / 2.0
        } else {
            hazard.bounds.bottom() + below / 2.0
        };
    }

    // Way is clear: drift toward the nearest token ahead
    state
        .collectibles
        .iter()
        .filter(|c| c.bounds.right() > player.left())
        .min_by(|a, b| {
            a.bounds
                .left()
                .partial_cmp(&b.bounds.left())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.bounds.center().y)
        .unwrap_or(arena_h / 2.0)
}

/// Should the pilot jump this tick?
pub fn wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    let arena_h = state.tuning.game_height;

    // Predicted centre after a short free fall
    let t = PREDICT_TICKS;
    let predicted_center = player.bounds.center().y
        + player.vel_y * t
        + 0.5 * player.gravity * t * t;
    let predicted_bottom = predicted_center + player.bounds.size.y / 2.0;

    // Never let the floor get close
    if predicted_bottom > arena_h - 10.0 {
        return player.vel_y > 0.0;
    }

    player.vel_y >= 0.0 && predicted_center > target_altitude(state) + TARGET_SLACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::Rect;
    use crate::sim::state::{Hazard, HazardKind};

    #[test]
    fn test_jumps_when_falling_toward_floor() {
        let mut state = GameState::new(1);
        state.player.bounds.pos.y = GAME_HEIGHT - PLAYER_HEIGHT - 20.0;
        state.player.vel_y = 4.0;
        assert!(wants_jump(&state));
    }

    #[test]
    fn test_no_jump_while_rising() {
        let mut state = GameState::new(1);
        state.player.vel_y = -8.0;
        assert!(!wants_jump(&state));
    }

    #[test]
    fn test_aims_for_larger_gap() {
        let mut state = GameState::new(1);
        // Hazard hugging the bottom: the gap above is larger
        state.hazards.push(Hazard {
            id: 1,
            bounds: Rect::new(250.0, 400.0, 25.0, 160.0),
            kind: HazardKind::wall(),
        });
        assert_eq!(target_altitude(&state), 200.0);

        // Hazard near the top: aim below it
        state.hazards[0].bounds.pos.y = 30.0;
        let target = target_altitude(&state);
        assert!(target > 190.0 + 100.0);
    }
}
