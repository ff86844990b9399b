//! High score records
//!
//! Kept in memory for the life of the process, either one record per
//! difficulty tier or a single shared record.

use serde::{Deserialize, Serialize};

use crate::config::HighScoreMode;
use crate::sim::{Difficulty, TIER_COUNT};

/// High score table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    mode: HighScoreMode,
    records: [u32; TIER_COUNT],
}

impl HighScores {
    pub fn new(mode: HighScoreMode) -> Self {
        Self {
            mode,
            records: [0; TIER_COUNT],
        }
    }

    /// Record slot that serves the given tier
    fn slot(&self, difficulty: Difficulty) -> usize {
        match self.mode {
            HighScoreMode::PerTier => difficulty.index(),
            HighScoreMode::Single => 0,
        }
    }

    /// Best score recorded for a tier
    pub fn best(&self, difficulty: Difficulty) -> u32 {
        self.records[self.slot(difficulty)]
    }

    /// Submit a finished round's score. Returns true if it set a new record.
    pub fn submit(&mut self, difficulty: Difficulty, score: u32) -> bool {
        let slot = self.slot(difficulty);
        if score > self.records[slot] {
            log::info!(
                "New high score for {}: {} (was {})",
                difficulty.as_str(),
                score,
                self.records[slot]
            );
            self.records[slot] = score;
            true
        } else {
            false
        }
    }

    /// Overwrite a tier's record (seeding a table, tests)
    pub fn set(&mut self, difficulty: Difficulty, score: u32) {
        let slot = self.slot(difficulty);
        self.records[slot] = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_tier_records_are_independent() {
        let mut scores = HighScores::new(HighScoreMode::PerTier);
        scores.set(Difficulty::Medium, 50);

        assert!(scores.submit(Difficulty::Medium, 80));
        assert_eq!(scores.best(Difficulty::Medium), 80);
        assert_eq!(scores.best(Difficulty::Easy), 0);
        assert_eq!(scores.best(Difficulty::Hard), 0);
    }

    #[test]
    fn test_lower_score_does_not_replace_record() {
        let mut scores = HighScores::new(HighScoreMode::PerTier);
        assert!(scores.submit(Difficulty::Easy, 120));
        assert!(!scores.submit(Difficulty::Easy, 90));
        assert!(!scores.submit(Difficulty::Easy, 120));
        assert_eq!(scores.best(Difficulty::Easy), 120);
    }

    #[test]
    fn test_single_mode_shares_one_record() {
        let mut scores = HighScores::new(HighScoreMode::Single);
        scores.submit(Difficulty::Hard, 30);
        assert_eq!(scores.best(Difficulty::Easy), 30);

        assert!(!scores.submit(Difficulty::Easy, 20));
        assert!(scores.submit(Difficulty::Medium, 45));
        assert_eq!(scores.best(Difficulty::Hard), 45);
    }
}
