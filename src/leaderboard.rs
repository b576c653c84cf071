//! High score leaderboard
//!
//! Entries live in a `RecordStore` as whitespace-delimited `name score`
//! pairs. The in-memory view is always sorted by score, highest first.

use serde::{Deserialize, Serialize};

use crate::consts::NAME_PLACEHOLDER;
use crate::error::StoreError;
use crate::persistence::RecordStore;

/// Number of entries shown on the leaderboard screens
pub const BOARD_SIZE: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Parse stored records, stopping at the first malformed pair.
///
/// Returned entries are sorted descending; equal scores keep file order.
pub fn parse_records(text: &str) -> Vec<ScoreEntry> {
    let mut tokens = text.split_whitespace();
    let mut entries = Vec::new();
    while let Some(name) = tokens.next() {
        let Some(score) = tokens.next().and_then(|s| s.parse::<u64>().ok()) else {
            break;
        };
        entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
    }
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Normalize a typed name for storage
pub fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        trimmed.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

/// High score leaderboard backed by a record store
pub struct Leaderboard {
    store: Box<dyn RecordStore>,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Create a leaderboard over `store` and read its current entries
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        let mut board = Self {
            store,
            entries: Vec::new(),
        };
        board.load_entries();
        board
    }

    /// Re-read the store. On failure the previous view is kept.
    pub fn load_entries(&mut self) -> &[ScoreEntry] {
        match self.store.load() {
            Ok(text) => {
                self.entries = parse_records(&text);
                log::info!("Loaded {} leaderboard entries", self.entries.len());
            }
            Err(e) => log::warn!("Leaderboard load failed: {}", e),
        }
        &self.entries
    }

    /// Append a score, then reload so the view matches the store.
    ///
    /// A blank name is stored as the placeholder.
    pub fn append_entry(&mut self, name: &str, score: u64) -> Result<(), StoreError> {
        let name = sanitize_name(name);
        self.store.append(&format!("{} {}", name, score))?;
        log::info!("Recorded score {} for {}", score, name);
        self.load_entries();
        Ok(())
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The best `n` entries
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Check if a score would appear on the visible board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < BOARD_SIZE {
            return true;
        }
        self.entries
            .get(BOARD_SIZE - 1)
            .map(|e| score > e.score)
            .unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
