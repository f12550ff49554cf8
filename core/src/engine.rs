use crate::*;

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already revealed, or flagged in a standard game.
    NoChange,
    /// Safe reveal, with the number of cells this call opened.
    Revealed(CellCount),
    /// The clicked cell was a mine. It is the only cell opened.
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::HitMine)
    }

    pub const fn revealed_cells(self) -> CellCount {
        match self {
            Self::NoChange => 0,
            Self::Revealed(count) => count,
            Self::HitMine => 1,
        }
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Added,
    Removed,
}

impl FlagOutcome {
    pub const fn flag_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Grid handed back by [`Grid::reveal`].
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub grid: Grid,
    pub outcome: RevealOutcome,
}

impl Reveal {
    pub const fn game_over(&self) -> bool {
        self.outcome.is_game_over()
    }
}

/// Grid handed back by [`Grid::toggle_flag`].
#[derive(Clone, Debug, PartialEq)]
pub struct Flag {
    pub grid: Grid,
    pub outcome: FlagOutcome,
}

impl Flag {
    pub const fn flag_added(&self) -> bool {
        self.outcome.flag_added()
    }
}

impl Grid {
    /// Reveals the cell at `coords` following the rules of `mode`.
    ///
    /// Standard games cascade through zero-hint cells and stop at their numbered border; the
    /// cascade never opens a flagged cell or a mine. Lucky games open exactly the target cell,
    /// flagged or not.
    pub fn reveal(mut self, coords: Coord2, mode: GameMode) -> Result<Reveal> {
        let coords = self.validate_coords(coords)?;

        let outcome = match mode {
            GameMode::Standard => self.reveal_cascade(coords),
            GameMode::Lucky => self.reveal_single_cell(coords),
        };

        Ok(Reveal {
            grid: self,
            outcome,
        })
    }

    /// Flips the flag on `coords`, whatever its reveal state.
    pub fn toggle_flag(mut self, coords: Coord2) -> Result<Flag> {
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_flagged = !cell.is_flagged;
        let outcome = if cell.is_flagged {
            FlagOutcome::Added
        } else {
            FlagOutcome::Removed
        };

        Ok(Flag {
            grid: self,
            outcome,
        })
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return RevealOutcome::NoChange;
        }

        cell.is_revealed = true;
        if cell.is_mine {
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed(1)
        }
    }

    fn reveal_cascade(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        self.cells[coords.to_nd_index()].is_revealed = true;
        if cell.is_mine {
            return RevealOutcome::HitMine;
        }

        let mut revealed: CellCount = 1;
        if cell.adjacent_mines == 0 {
            let mut to_visit: Vec<Coord2> = self.unrevealed_neighbors(coords).collect();

            while let Some(visit_coords) = to_visit.pop() {
                let visit_cell = &mut self.cells[visit_coords.to_nd_index()];
                if visit_cell.is_revealed || visit_cell.is_flagged || visit_cell.is_mine {
                    continue;
                }

                visit_cell.is_revealed = true;
                revealed += 1;

                if visit_cell.adjacent_mines == 0 {
                    let next: Vec<_> = self.unrevealed_neighbors(visit_coords).collect();
                    to_visit.extend(next);
                }
            }

            log::debug!("Cascade from {coords:?} revealed {revealed} cells");
        }

        RevealOutcome::Revealed(revealed)
    }

    fn unrevealed_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_neighbors(coords).filter(|&pos| self[pos].is_unrevealed())
    }
}
