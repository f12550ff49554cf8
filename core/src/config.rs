use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Rule variant for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Adjacency hints, flood fill, and a win requires every mine flagged.
    Standard,
    /// No hints, every reveal opens a single cell, and flags do not count toward the win.
    Lucky,
}

impl GameMode {
    pub const fn has_hints(self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default)]
    pub mode: GameMode,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount, mode: GameMode) -> Self {
        Self { size, mines, mode }
    }

    pub fn new(size: Coord2, mines: CellCount, mode: GameMode) -> Result<Self> {
        let config = Self::new_unchecked(size, mines, mode);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid.into());
        }

        let cells = self.total_cells();
        if self.mines > cells {
            return Err(ConfigError::TooManyMines {
                requested: self.mines,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Grid preset as handed over by the surrounding application.
///
/// `height` maps to grid rows and `width` to grid columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub label: String,
    #[serde(default)]
    pub no_hints: bool,
}

impl Preset {
    pub fn mode(&self) -> GameMode {
        if self.no_hints {
            GameMode::Lucky
        } else {
            GameMode::Standard
        }
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        GameConfig::new((self.height, self.width), self.mines, self.mode())
    }
}

/// Built-in presets, also used as the buckets of the [`ScoreLedger`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Lucky,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Lucky];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Lucky => "Lucky",
        }
    }

    pub const fn mode(self) -> GameMode {
        match self {
            Self::Lucky => GameMode::Lucky,
            _ => GameMode::Standard,
        }
    }

    pub fn preset(self) -> Preset {
        let (width, height, mines) = match self {
            Self::Easy => (10, 10, 10),
            Self::Medium => (15, 13, 25),
            Self::Hard => (17, 14, 45),
            Self::Lucky => (5, 5, 3),
        };
        Preset {
            width,
            height,
            mines,
            label: self.label().into(),
            no_hints: matches!(self.mode(), GameMode::Lucky),
        }
    }

    /// All built-in presets fit their grids, so this never needs validation.
    pub const fn game_config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((10, 10), 10, GameMode::Standard),
            Self::Medium => GameConfig::new_unchecked((13, 15), 25, GameMode::Standard),
            Self::Hard => GameConfig::new_unchecked((14, 17), 45, GameMode::Standard),
            Self::Lucky => GameConfig::new_unchecked((5, 5), 3, GameMode::Lucky),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
