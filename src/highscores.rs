//! High score leaderboard
//!
//! Lives only as long as the process; nothing is written to disk.

use serde::Serialize;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    /// Distance reached (score / 10)
    pub distance: u64,
    pub tokens: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Seed the run was played with
    pub seed: u64,
}

/// High score leaderboard (sorted by distance, descending)
#[derive(Debug, Clone, Default, Serialize)]
pub struct HighScores {
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a distance qualifies for the leaderboard
    pub fn qualifies(&self, distance: u64) -> bool {
        if distance == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if it beats the lowest entry
        self.entries.last().map(|e| distance > e.distance).unwrap_or(true)
    }

    /// Get the rank a distance would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, distance: u64) -> Option<usize> {
        if !self.qualifies(distance) {
            return None;
        }
        let rank = self.entries.iter().position(|e| distance > e.distance);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_run(&mut self, record: RunRecord) -> Option<usize> {
        if !self.qualifies(record.distance) {
            return None;
        }

        // Find insertion point (sorted descending by distance)
        let pos = self.entries.iter().position(|e| record.distance > e.distance);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Best run so far (if any)
    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }
}
