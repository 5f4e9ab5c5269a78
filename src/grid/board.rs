//! The 8x8 board and its read-only snapshot.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cell::Cell;
use crate::core::{MoveError, Neighbors, PlayerId, Position, CELL_COUNT, GRID_SIZE};

/// Fixed-size board owning every cell.
///
/// Raw primitives (`add_orb`, `set_owner`, `clear`) take positions that are
/// in bounds by construction of their call sites and panic otherwise.
/// `place` is the validated entry point for moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Position::all().map(Cell::empty).collect(),
        }
    }

    /// Cell at `pos`, if in bounds.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.is_in_bounds() {
            self.cells.get(pos.index())
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Orbs at `pos`, zero when out of bounds.
    #[must_use]
    pub fn orb_count(&self, pos: Position) -> u32 {
        self.cell(pos).map_or(0, Cell::orb_count)
    }

    /// Owner of `pos`, if any.
    #[must_use]
    pub fn owner(&self, pos: Position) -> Option<PlayerId> {
        self.cell(pos).and_then(Cell::owner)
    }

    /// Orb threshold of `pos`.
    #[must_use]
    pub fn critical_mass(&self, pos: Position) -> u32 {
        pos.critical_mass()
    }

    /// In-bounds orthogonal neighbors of `pos`.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        pos.neighbors()
    }

    /// Check whether `pos` holds at least its critical mass.
    #[must_use]
    pub fn is_unstable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_unstable)
    }

    /// Every position currently at or above critical mass.
    pub fn unstable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_unstable())
            .map(Cell::position)
    }

    /// Check a placement without applying it.
    pub fn check_placement(&self, pos: Position, player: PlayerId) -> Result<(), MoveError> {
        let pos = Position::checked(pos.row, pos.col)?;
        match self.cells[pos.index()].owner() {
            Some(owner) if owner != player => Err(MoveError::CellOwnedByOther { position: pos, owner }),
            _ => Ok(()),
        }
    }

    /// Place one orb for `player`.
    ///
    /// Fails without touching the board if `pos` is off the board or holds
    /// another player's orbs. Returns the updated cell.
    pub fn place(&mut self, pos: Position, player: PlayerId) -> Result<Cell, MoveError> {
        self.check_placement(pos, player)?;
        let cell = &mut self.cells[pos.index()];
        cell.add_orb(player);
        trace!(player = %player, row = pos.row, col = pos.col, orbs = cell.orb_count(), "orb placed");
        Ok(*cell)
    }

    // === Raw primitives ===

    /// Add one orb at `pos` and make `player` its owner, capturing any
    /// orbs already there. Returns the new orb count.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn add_orb(&mut self, pos: Position, player: PlayerId) -> u32 {
        let cell = &mut self.cells[pos.index()];
        cell.add_orb(player);
        cell.orb_count()
    }

    /// Remove up to `count` orbs at `pos`. Returns the remaining count.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn remove_orbs(&mut self, pos: Position, count: u32) -> u32 {
        let cell = &mut self.cells[pos.index()];
        cell.remove_orbs(count);
        cell.orb_count()
    }

    /// Give the orbs at `pos` to `player`. Empty cells stay unowned.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set_owner(&mut self, pos: Position, player: PlayerId) {
        self.cells[pos.index()].set_owner(player);
    }

    /// Empty the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.index()].clear();
    }

    // === Aggregates ===

    /// Sum of orbs over the board.
    #[must_use]
    pub fn total_orbs(&self) -> u32 {
        self.cells.iter().map(Cell::orb_count).sum()
    }

    /// Number of cells owned by `player`.
    #[must_use]
    pub fn cells_owned_by(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|c| c.is_owned_by(player)).count()
    }

    /// Orbs owned by `player`.
    #[must_use]
    pub fn orbs_owned_by(&self, player: PlayerId) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.is_owned_by(player))
            .map(Cell::orb_count)
            .sum()
    }

    /// Check if `player` owns every occupied cell (and at least one).
    #[must_use]
    pub fn is_dominated_by(&self, player: PlayerId) -> bool {
        let mut any = false;
        for cell in self.cells.iter().filter(|c| !c.is_empty()) {
            if !cell.is_owned_by(player) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Immutable copy of the board for renderers and tests.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the board.
///
/// Taken after a halted cascade it can hold cells at or above critical
/// mass; nothing is resolved further.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    cells: Vec<Cell>,
}

impl GridSnapshot {
    /// Cell at `pos`, if in bounds.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.is_in_bounds() {
            self.cells.get(pos.index())
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Sum of orbs over the board.
    #[must_use]
    pub fn total_orbs(&self) -> u32 {
        self.cells.iter().map(Cell::orb_count).sum()
    }
}

/// One row per line, `.` for empty cells, otherwise orb count and owner letter.
impl std::fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        debug_assert_eq!(self.cells.len(), CELL_COUNT);
        for row in self.cells.chunks(GRID_SIZE) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell.owner() {
                    Some(owner) => format!("{}{}", cell.orb_count(), owner.letter()),
                    None => " .".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.cells().len(), CELL_COUNT);
        assert_eq!(grid.total_orbs(), 0);
        assert!(!grid.is_dominated_by(A));
    }

    #[test]
    fn test_place_sets_owner_and_count() {
        let mut grid = Grid::new();
        let pos = Position::new(2, 5);

        let cell = grid.place(pos, A).unwrap();
        assert_eq!(cell.orb_count(), 1);
        assert_eq!(cell.owner(), Some(A));

        let cell = grid.place(pos, A).unwrap();
        assert_eq!(cell.orb_count(), 2);
    }

    #[test]
    fn test_place_rejects_other_owner() {
        let mut grid = Grid::new();
        let pos = Position::new(4, 4);
        grid.place(pos, A).unwrap();
        let before = grid.clone();

        let err = grid.place(pos, B).unwrap_err();
        assert_eq!(err, MoveError::CellOwnedByOther { position: pos, owner: A });
        assert_eq!(grid, before);
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut grid = Grid::new();
        let err = grid.place(Position::new(0, 8), A).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds { row: 0, col: 8 });
        assert_eq!(grid.total_orbs(), 0);
    }

    #[test]
    fn test_is_unstable() {
        let mut grid = Grid::new();
        let corner = Position::new(7, 0);
        grid.place(corner, A).unwrap();
        assert!(!grid.is_unstable(corner));
        grid.place(corner, A).unwrap();
        assert!(grid.is_unstable(corner));
        assert_eq!(grid.unstable_positions().collect::<Vec<_>>(), vec![corner]);
        assert!(!grid.is_unstable(Position::new(8, 8)));
    }

    #[test]
    fn test_raw_primitives() {
        let mut grid = Grid::new();
        let pos = Position::new(1, 1);

        assert_eq!(grid.add_orb(pos, A), 1);
        assert_eq!(grid.add_orb(pos, B), 2);
        assert_eq!(grid.owner(pos), Some(B));

        grid.set_owner(pos, A);
        assert_eq!(grid.owner(pos), Some(A));

        assert_eq!(grid.remove_orbs(pos, 1), 1);
        grid.clear(pos);
        assert_eq!(grid.owner(pos), None);
        assert_eq!(grid.orb_count(pos), 0);
    }

    #[test]
    fn test_ownership_aggregates() {
        let mut grid = Grid::new();
        grid.add_orb(Position::new(0, 0), A);
        grid.add_orb(Position::new(3, 3), A);
        grid.add_orb(Position::new(3, 3), A);
        assert!(grid.is_dominated_by(A));

        grid.add_orb(Position::new(5, 5), B);
        assert!(!grid.is_dominated_by(A));
        assert_eq!(grid.cells_owned_by(A), 2);
        assert_eq!(grid.orbs_owned_by(A), 3);
        assert_eq!(grid.cells_owned_by(B), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut grid = Grid::new();
        grid.add_orb(Position::new(0, 1), A);
        let snapshot = grid.snapshot();

        grid.add_orb(Position::new(0, 1), A);
        assert_eq!(snapshot.cell(Position::new(0, 1)).unwrap().orb_count(), 1);
        assert_eq!(snapshot.total_orbs(), 1);
    }

    #[test]
    fn test_snapshot_display() {
        let mut grid = Grid::new();
        grid.add_orb(Position::new(0, 0), A);
        grid.add_orb(Position::new(0, 1), B);
        grid.add_orb(Position::new(0, 1), B);

        let text = grid.snapshot().to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("1A 2B  ."));
        assert_eq!(text.lines().count(), GRID_SIZE);
    }
}
