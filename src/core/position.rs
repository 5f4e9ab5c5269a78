//! Grid coordinates and fixed 8x8 topology.
//!
//! Critical mass is never stored: it is the number of orthogonal
//! neighbors a position has, which depends only on whether it sits on
//! a corner, an edge or the interior of the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::MoveError;

/// Side length of the square board.
pub const GRID_SIZE: usize = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Orthogonal neighbor positions. Never more than four.
pub type Neighbors = SmallVec<[Position; 4]>;

/// Topological class of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    /// Two neighbors.
    Corner,
    /// Three neighbors.
    Edge,
    /// Four neighbors.
    Interior,
}

impl CellClass {
    /// Orb threshold at which a cell of this class explodes.
    #[must_use]
    pub const fn critical_mass(self) -> u32 {
        match self {
            CellClass::Corner => 2,
            CellClass::Edge => 3,
            CellClass::Interior => 4,
        }
    }
}

/// A (row, col) coordinate.
///
/// Any pair of values can be represented; use [`Position::checked`] or
/// [`Position::is_in_bounds`] before treating one as a cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Position {
    /// Create a position without bounds checking.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a position, rejecting coordinates outside the board.
    pub fn checked(row: usize, col: usize) -> Result<Self, MoveError> {
        let pos = Self::new(row, col);
        if pos.is_in_bounds() {
            Ok(pos)
        } else {
            Err(MoveError::OutOfBounds { row, col })
        }
    }

    /// Rebuild a position from its row-major index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    /// Row-major index into a `CELL_COUNT` array. Only meaningful in bounds.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    /// Check that both coordinates lie on the board.
    #[must_use]
    pub const fn is_in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Corner, edge or interior.
    #[must_use]
    pub const fn class(self) -> CellClass {
        let last = GRID_SIZE - 1;
        let row_edge = self.row == 0 || self.row == last;
        let col_edge = self.col == 0 || self.col == last;
        match (row_edge, col_edge) {
            (true, true) => CellClass::Corner,
            (true, false) | (false, true) => CellClass::Edge,
            (false, false) => CellClass::Interior,
        }
    }

    /// Orb threshold at which this cell explodes.
    #[must_use]
    pub const fn critical_mass(self) -> u32 {
        self.class().critical_mass()
    }

    /// In-bounds orthogonal neighbors, in the fixed order down, up, right, left.
    #[must_use]
    pub fn neighbors(self) -> Neighbors {
        let mut out = Neighbors::new();
        if self.row + 1 < GRID_SIZE {
            out.push(Self::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            out.push(Self::new(self.row - 1, self.col));
        }
        if self.col + 1 < GRID_SIZE {
            out.push(Self::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            out.push(Self::new(self.row, self.col - 1));
        }
        out
    }

    /// Iterate over every position on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Self::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
