//! Fixed-step frame driver
//!
//! The host calls [`FrameDriver::advance`] once per display refresh with the
//! wall-clock time since the previous call. The driver turns that into whole
//! simulation ticks, so the simulation never depends on how it is scheduled.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::InputState;
use crate::sim::{GameState, tick};

/// Longest frame we accept before treating the gap as a stall
const MAX_FRAME_DT: f32 = 0.1;

/// Accumulates refresh time into fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
    ticks: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks run by this driver
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the number run.
    pub fn advance(&mut self, state: &mut GameState, input: &mut InputState, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot input only reaches the first substep
            let tick_input = input.take_tick_input();
            tick(state, &tick_input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop any backlog the substep cap left behind
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        self.ticks += u64::from(substeps);
        substeps
    }
}
