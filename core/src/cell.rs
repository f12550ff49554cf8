use serde::{Deserialize, Serialize};

/// One grid position.
///
/// `is_mine` is fixed at generation and `is_revealed` only ever goes from `false` to `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines in the Moore neighborhood, only computed for safe cells of hinted grids.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed
    }

    /// Character used by the plain text dump of a grid.
    pub const fn symbol(self) -> char {
        if !self.is_revealed {
            if self.is_flagged { 'F' } else { '#' }
        } else if self.is_mine {
            '*'
        } else if self.adjacent_mines == 0 {
            '.'
        } else {
            (b'0' + self.adjacent_mines) as char
        }
    }
}
