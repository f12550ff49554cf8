//! In-memory high-score boards.
//!
//! Every [`Difficulty`] gets its own board of the [`BOARD_SIZE`] best entries, sorted from the
//! highest score down. On equal scores the entry recorded first stays ahead.

use std::collections::BTreeMap;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::*;

/// Number of entries per board.
pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: Score,
    pub name: String,
}

/// Inserts a new entry into `top`, returning the sorted list cut down to [`BOARD_SIZE`].
pub fn record_score(
    mut top: Vec<ScoreEntry>,
    score: Score,
    name: impl Into<String>,
) -> Vec<ScoreEntry> {
    top.push(ScoreEntry {
        score,
        name: name.into(),
    });
    // stable, so ties keep insertion order
    top.sort_by(|a, b| b.score.cmp(&a.score));
    top.truncate(BOARD_SIZE);
    top
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    top: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position a score would take, starting at 1, or `None` if it stays off the board.
    pub fn rank_of(&self, score: Score) -> Option<usize> {
        let ahead = self.top.iter().take_while(|entry| entry.score >= score).count();
        (ahead < BOARD_SIZE).then_some(ahead + 1)
    }

    /// Adds a score and returns its position, starting at 1, or `None` if it did not make it.
    pub fn record(&mut self, score: Score, name: impl Into<String>) -> Option<usize> {
        let rank = self.rank_of(score);
        self.top = record_score(mem::take(&mut self.top), score, name);
        rank
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.top
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// Boards for every difficulty bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    boards: BTreeMap<Difficulty, ScoreBoard>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        difficulty: Difficulty,
        score: Score,
        name: impl Into<String>,
    ) -> Option<usize> {
        let name = name.into();
        let rank = self.boards.entry(difficulty).or_default().record(score, name.as_str());
        match rank {
            Some(rank) => log::info!("{name} placed #{rank} on {difficulty} with {score}"),
            None => log::debug!("{name} missed the {difficulty} board with {score}"),
        }
        rank
    }

    pub fn top(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        self.boards
            .get(&difficulty)
            .map(ScoreBoard::entries)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.values().all(ScoreBoard::is_empty)
    }
}
