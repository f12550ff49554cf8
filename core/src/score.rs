//! Score formulas applied by the caller once a game is won.
//!
//! The engine itself has no clock: elapsed seconds are whatever the caller measured.

use crate::*;

pub type Score = u32;

/// Points granted per revealed cell in a lucky game.
pub const LUCKY_CELL_REWARD: u32 = 10;

/// Lucky score: revealed cells times [`LUCKY_CELL_REWARD`], minus elapsed seconds, as an
/// absolute value.
///
/// A slow game whose penalty exceeds the reward therefore scores the size of the deficit.
pub fn lucky_score(revealed_cells: CellCount, elapsed_secs: u64) -> Score {
    let reward = i64::from(revealed_cells) * i64::from(LUCKY_CELL_REWARD);
    let elapsed = i64::try_from(elapsed_secs).unwrap_or(i64::MAX);
    let score = reward.saturating_sub(elapsed).unsigned_abs();
    Score::try_from(score).unwrap_or(Score::MAX)
}

/// Standard score: the elapsed seconds.
pub fn standard_score(elapsed_secs: u64) -> Score {
    Score::try_from(elapsed_secs).unwrap_or(Score::MAX)
}

/// Score for a won game of `mode`.
pub fn final_score(mode: GameMode, revealed_cells: CellCount, elapsed_secs: u64) -> Score {
    match mode {
        GameMode::Standard => standard_score(elapsed_secs),
        GameMode::Lucky => lucky_score(revealed_cells, elapsed_secs),
    }
}
