use serde::{Deserialize, Serialize};

use crate::core::{ALL_CELLS, CELL_COUNT, CellCoord, Piece};

/// State of one cell as tracked by the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CellState {
    /// Piece currently standing on the cell.
    pub occupant: Option<Piece>,
    /// Last piece removed from this cell during the current round.
    ///
    /// Only ever set on regular cells; used to price upgrades.
    pub last_removed_this_round: Option<Piece>,
}

/// Authoritative occupancy of all 69 cells.
///
/// Cells are stored in canonical order (see [`ALL_CELLS`]), every cell owns
/// its own state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [CellState; CELL_COUNT],
}

/// One entry of the board snapshot pushed to display collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CellOccupancy {
    pub coords: CellCoord,
    pub occupant: Option<Piece>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Creates the starting board: empty regular and sun cells, full stores.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [CellState::default(); CELL_COUNT];
        for (state, coords) in cells.iter_mut().zip(ALL_CELLS) {
            state.occupant = coords.store_piece();
        }
        Self { cells }
    }

    /// Creates a board with nothing on it, stores included.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [CellState::default(); CELL_COUNT],
        }
    }

    #[must_use]
    pub fn cell(&self, coords: CellCoord) -> Option<&CellState> {
        self.cells.get(coords.index()?)
    }

    pub fn cell_mut(&mut self, coords: CellCoord) -> Option<&mut CellState> {
        self.cells.get_mut(coords.index()?)
    }

    /// Returns the piece on `coords`; `None` both for empty and unknown cells.
    #[must_use]
    pub fn occupant(&self, coords: CellCoord) -> Option<Piece> {
        self.cell(coords).and_then(|cell| cell.occupant)
    }

    /// Forgets every removal recorded during the round that just ended.
    pub fn start_new_round(&mut self) {
        for cell in &mut self.cells {
            cell.last_removed_this_round = None;
        }
    }

    /// Returns the occupancy of every cell in canonical order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CellOccupancy> {
        ALL_CELLS
            .iter()
            .zip(&self.cells)
            .map(|(&coords, cell)| CellOccupancy {
                coords,
                occupant: cell.occupant,
            })
            .collect()
    }
}
