//! Score and lives counters
//!
//! One tracker per field. It is passed by `&mut` into every collision handler;
//! nothing else holds it.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LIVES, STARTING_LIVES};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    lives: u8,
    score: u64,
    /// HUD strings, refreshed once per frame by `refresh`
    score_text: String,
    lives_text: String,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        let mut tracker = Self {
            lives: STARTING_LIVES,
            score: 0,
            score_text: String::new(),
            lives_text: String::new(),
        };
        tracker.refresh();
        tracker
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Add points and return the new total
    pub fn add_score(&mut self, points: u64) -> u64 {
        self.score += points;
        self.score
    }

    /// Apply a change in lives and return the new count.
    ///
    /// Gains only apply while below the cap; losses always apply and stop at 0.
    pub fn update_lives(&mut self, delta: i8) -> u8 {
        if delta > 0 {
            if self.lives < MAX_LIVES {
                self.lives = (self.lives + delta as u8).min(MAX_LIVES);
            }
        } else {
            self.lives = self.lives.saturating_sub(delta.unsigned_abs());
        }
        self.lives
    }

    /// Rebuild the HUD strings from the counters
    pub fn refresh(&mut self) {
        self.score_text = format!("SCORE: {}", self.score);
        self.lives_text = format!("LIVES: {}", self.lives);
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn lives_text(&self) -> &str {
        &self.lives_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_three_lives() {
        let tracker = Tracker::new();
        assert_eq!(tracker.lives(), 3);
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.score_text(), "SCORE: 0");
    }

    #[test]
    fn test_lives_capped_at_three() {
        let mut tracker = Tracker::new();
        assert_eq!(tracker.update_lives(1), 3);
        assert_eq!(tracker.update_lives(-1), 2);
        assert_eq!(tracker.update_lives(1), 3);
        assert_eq!(tracker.update_lives(1), 3);
    }

    #[test]
    fn test_lives_never_below_zero() {
        let mut tracker = Tracker::new();
        for _ in 0..5 {
            tracker.update_lives(-1);
        }
        assert_eq!(tracker.lives(), 0);
    }

    #[test]
    fn test_refresh_updates_text() {
        let mut tracker = Tracker::new();
        tracker.add_score(250);
        assert_eq!(tracker.score_text(), "SCORE: 0");
        tracker.refresh();
        assert_eq!(tracker.score_text(), "SCORE: 250");
        assert_eq!(tracker.lives_text(), "LIVES: 3");
    }
}
