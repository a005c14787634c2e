//! Player leaderboard storage
//!
//! The game only ever talks to a `PlayerStore`. Two backends ship:
//! - `MemoryStore` for tests and throwaway sessions
//! - `JsonFileStore`, a pretty-printed JSON file in the user's data directory
//!
//! Writes are additive: a session hands over its deltas and the store adds
//! them to the player's running totals.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::highscores::{Leaderboard, PlayerRecord};

/// Backing store for cumulative player totals
pub trait PlayerStore {
    /// Cheap connectivity check, run when a session starts
    fn ping(&self) -> Result<()>;

    fn find_player(&self, username: &str) -> Result<Option<PlayerRecord>>;

    /// Add `score_delta`/`count_delta` to the player's totals, creating the
    /// player if needed. Returns the stored totals.
    fn upsert_player(&mut self, username: &str, score_delta: u64, count_delta: u32)
    -> Result<PlayerRecord>;

    /// All players, highest score first
    fn list_players(&self) -> Result<Vec<PlayerRecord>>;
}

fn check_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        bail!("refusing to store a player without a username");
    }
    Ok(())
}

/// In-process store, gone when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    board: Leaderboard,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryStore {
    fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn find_player(&self, username: &str) -> Result<Option<PlayerRecord>> {
        Ok(self.board.find(username).cloned())
    }

    fn upsert_player(
        &mut self,
        username: &str,
        score_delta: u64,
        count_delta: u32,
    ) -> Result<PlayerRecord> {
        check_username(username)?;
        Ok(self.board.upsert(username, score_delta, count_delta))
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        Ok(self.board.ranked().to_vec())
    }
}

/// Leaderboard kept in a JSON file. The file is re-read on every call so
/// several processes can share it between sessions.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory, if there is one
    pub fn open_default() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// `<data_local_dir>/lasso-catch/leaderboard.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("lasso-catch").join("leaderboard.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            log::debug!("No leaderboard at {:?}, starting fresh", self.path);
            return Ok(Leaderboard::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Reading {}", self.path.display()))?;
        let mut board: Leaderboard = serde_json::from_str(&contents)
            .with_context(|| format!("Parsing {}", self.path.display()))?;
        board.normalize();
        Ok(board)
    }

    fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(board).context("Serializing leaderboard")?;
        fs::write(&self.path, json).with_context(|| format!("Writing {}", self.path.display()))?;
        log::info!("Saved leaderboard to {:?}", self.path);
        Ok(())
    }
}

impl PlayerStore for JsonFileStore {
    fn ping(&self) -> Result<()> {
        self.load().map(|_| ())
    }

    fn find_player(&self, username: &str) -> Result<Option<PlayerRecord>> {
        Ok(self.load()?.find(username).cloned())
    }

    fn upsert_player(
        &mut self,
        username: &str,
        score_delta: u64,
        count_delta: u32,
    ) -> Result<PlayerRecord> {
        check_username(username)?;
        let mut board = self.load()?;
        let record = board.upsert(username, score_delta, count_delta);
        self.save(&board)?;
        Ok(record)
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        Ok(self.load()?.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lasso-catch-test-{}-{}", std::process::id(), name))
            .join("leaderboard.json")
    }

    fn round_trip(store: &mut dyn PlayerStore) {
        assert!(store.find_player("zidan").unwrap().is_none());

        store.upsert_player("zidan", 150, 3).unwrap();
        assert_eq!(
            store.find_player("zidan").unwrap(),
            Some(PlayerRecord::new("zidan", 150, 3))
        );

        store.upsert_player("zidan", 50, 1).unwrap();
        assert_eq!(
            store.find_player("zidan").unwrap(),
            Some(PlayerRecord::new("zidan", 200, 4))
        );

        store.upsert_player("rival", 500, 2).unwrap();
        let names: Vec<_> = store
            .list_players()
            .unwrap()
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(names, ["rival", "zidan"]);
    }

    #[test]
    fn test_memory_round_trip() {
        round_trip(&mut MemoryStore::new());
    }

    #[test]
    fn test_json_round_trip() {
        let path = scratch_path("round-trip");
        let _ = fs::remove_file(&path);
        let mut store = JsonFileStore::new(&path);
        store.ping().unwrap();
        round_trip(&mut store);

        // A second handle sees the same data
        let other = JsonFileStore::new(&path);
        assert_eq!(other.list_players().unwrap().len(), 2);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut store = MemoryStore::new();
        assert!(store.upsert_player("", 10, 1).is_err());
        assert!(store.upsert_player("   ", 10, 1).is_err());
        assert!(store.list_players().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.ping().is_err());
        assert!(store.upsert_player("zidan", 1, 1).is_err());
        // The broken file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
