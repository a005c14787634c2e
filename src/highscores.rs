//! Player leaderboard
//!
//! One cumulative row per username. Rows only ever grow: a finished session
//! adds its score and delivery count to whatever the player already had.

use serde::{Deserialize, Serialize};

/// Cumulative totals for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
    pub score: u64,
    /// Balls delivered across all sessions
    pub count: u32,
}

impl PlayerRecord {
    pub fn new(username: impl Into<String>, score: u64, count: u32) -> Self {
        Self {
            username: username.into(),
            score,
            count,
        }
    }
}

/// All known players, kept sorted by score (descending)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<PlayerRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn find(&self, username: &str) -> Option<&PlayerRecord> {
        self.entries.iter().find(|e| e.username == username)
    }

    /// Add a session's totals to a player, creating the row on first sight.
    /// Returns the updated record.
    pub fn upsert(&mut self, username: &str, score_delta: u64, count_delta: u32) -> PlayerRecord {
        let record = match self.entries.iter().position(|e| e.username == username) {
            Some(i) => {
                let mut record = self.entries.remove(i);
                record.score = record.score.saturating_add(score_delta);
                record.count = record.count.saturating_add(count_delta);
                record
            }
            None => PlayerRecord::new(username, score_delta, count_delta),
        };

        // Ties keep the earlier player ahead
        let pos = self
            .entries
            .iter()
            .position(|e| record.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record.clone());
        record
    }

    /// Rows ordered by score, highest first
    pub fn ranked(&self) -> &[PlayerRecord] {
        &self.entries
    }

    /// 1-indexed position of a player
    pub fn rank_of(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.username == username)
            .map(|i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore ordering after loading rows from an untrusted source
    pub(crate) fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_is_additive() {
        let mut board = Leaderboard::new();
        let first = board.upsert("zidan", 150, 3);
        assert_eq!(first, PlayerRecord::new("zidan", 150, 3));

        let second = board.upsert("zidan", 50, 1);
        assert_eq!(second, PlayerRecord::new("zidan", 200, 4));
        assert_eq!(board.entries.len(), 1);
    }

    #[test]
    fn test_ranked_by_score() {
        let mut board = Leaderboard::new();
        board.upsert("a", 100, 2);
        board.upsert("b", 300, 4);
        board.upsert("c", 200, 3);
        let names: Vec<_> = board.ranked().iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert_eq!(board.top_score(), Some(300));

        // Climbing past the leader reorders
        board.upsert("a", 250, 5);
        assert_eq!(board.rank_of("a"), Some(1));
        assert_eq!(board.rank_of("b"), Some(2));
    }

    #[test]
    fn test_tie_keeps_incumbent() {
        let mut board = Leaderboard::new();
        board.upsert("first", 100, 1);
        board.upsert("second", 100, 1);
        assert_eq!(board.rank_of("first"), Some(1));
    }

    #[test]
    fn test_find_missing() {
        let board = Leaderboard::new();
        assert!(board.find("nobody").is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut board = Leaderboard {
            entries: vec![PlayerRecord::new("low", 1, 1), PlayerRecord::new("high", 9, 1)],
        };
        board.normalize();
        assert_eq!(board.ranked()[0].username, "high");
    }
}
