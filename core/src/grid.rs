use core::fmt;
use core::ops::Index;

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular mine field owned by the caller between moves.
///
/// Mutating operations ([`Grid::reveal`], [`Grid::toggle_flag`]) consume the grid and hand it
/// back inside their outcome, so there is exactly one authoritative copy at any time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    pub(crate) cells: Array2<Cell>,
    mine_count: CellCount,
}

/// Unchecked shape of a serialized [`Grid`].
#[derive(Deserialize)]
struct GridRepr {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let (rows, cols) = repr.cells.dim();
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid.into());
        }
        if rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(ConfigError::GridTooLarge { rows, cols }.into());
        }

        let actual = repr.cells.iter().filter(|cell| cell.is_mine).count() as CellCount;
        if actual != repr.mine_count {
            return Err(ConfigError::MineCountMismatch {
                declared: repr.mine_count,
                actual,
            }
            .into());
        }

        let grid = Self {
            cells: repr.cells,
            mine_count: actual,
        };
        if !grid.hints_are_consistent() {
            return Err(ConfigError::InconsistentHints.into());
        }
        Ok(grid)
    }
}

impl Grid {
    /// Builds a random grid by rejection sampling: a uniformly random cell is picked until one
    /// without a mine turns up, for every mine requested.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("Refusing to generate grid for {config:?}: {err}");
            return Err(err);
        }

        let (rows, cols) = config.size;
        let mut cells: Array2<Cell> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut attempts: u64 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut cells[coords.to_nd_index()];
            attempts += 1;
            if !cell.is_mine {
                cell.is_mine = true;
                mines_placed += 1;
            }
        }

        let mut grid = Self {
            cells,
            mine_count: mines_placed,
        };
        if config.mode.has_hints() {
            grid.compute_hints();
        }

        log::debug!(
            "Generated {rows}x{cols} grid with {mines_placed} mines in {attempts} draws ({:?})",
            config.mode
        );
        log::trace!("Mine map:\n{}", grid.mine_map());
        Ok(grid)
    }

    /// Builds a grid with mines at exactly the given coordinates. Duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2], mode: GameMode) -> Result<Self> {
        GameConfig::new(size, 0, mode)?;

        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        let mut mine_count: CellCount = 0;
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds(coords));
            }
            let cell = &mut cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                mine_count += 1;
            }
        }

        let mut grid = Self { cells, mine_count };
        if mode.has_hints() {
            grid.compute_hints();
        }
        Ok(grid)
    }

    fn compute_hints(&mut self) {
        let counts = Array2::from_shape_fn(self.cells.dim(), |(row, col)| {
            self.count_adjacent_mines((row as Coord, col as Coord))
        });
        for (cell, &count) in self.cells.iter_mut().zip(counts.iter()) {
            if !cell.is_mine {
                cell.adjacent_mines = count;
            }
        }
    }

    /// Hints are either absent everywhere (no-hint grid) or exact for every safe cell. Mines
    /// never carry a count.
    fn hints_are_consistent(&self) -> bool {
        let hinted = self
            .cells
            .iter()
            .any(|cell| !cell.is_mine && cell.adjacent_mines != 0);
        self.iter_cells().all(|(coords, cell)| {
            if cell.is_mine {
                cell.adjacent_mines == 0
            } else if hinted {
                cell.adjacent_mines == self.count_adjacent_mines(coords)
            } else {
                true
            }
        })
    }

    /// Counts neighboring mines directly from the layout, independent of the stored hints.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Iterates every cell together with its coordinates in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    /// Mines not yet accounted for by a flag. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    /// Whether the grid satisfies the win condition of `mode`.
    ///
    /// Standard games need every mine flagged and every safe cell revealed. Lucky games only
    /// need the safe cells revealed.
    pub fn is_complete(&self, mode: GameMode) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine {
                match mode {
                    GameMode::Standard => cell.is_flagged,
                    GameMode::Lucky => true,
                }
            } else {
                cell.is_revealed
            }
        })
    }

    /// `M`/`0` map of the mine layout, one row per line.
    pub fn mine_map(&self) -> String {
        self.cells
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_mine { "M" } else { "0" })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
