use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Valid transitions: InProgress -> Won and InProgress -> Lost, both terminal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from generation to win or loss.
///
/// Play operations never fail: out-of-bounds targets and calls on a finished
/// board are no-ops reported as `NoChange`, so stray input can be fed
/// straight through without pre-validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
}

impl Board {
    /// Builds a board from a mine mask, deriving every number cell up front.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Board {
        let mut cells: Array2<Cell> = Array2::default(mine_mask.dim());
        let mut mine_count: CellCount = 0;

        for (index, &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                cells[index].kind = CellKind::Mine;
                mine_count += 1;
            }
        }

        let (width, height) = grid_size(&cells);
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if cells[coords.to_nd_index()].kind.is_mine() {
                    continue;
                }
                let adjacent_mines = mine_mask
                    .iter_adjacent(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
                if adjacent_mines > 0 {
                    cells[coords.to_nd_index()].kind = CellKind::Number(adjacent_mines);
                }
            }
        }

        Board {
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::InProgress,
        }
    }

    /// Builds a board with mines at the given coordinates, rejecting any that
    /// fall outside `size`. Duplicates collapse into a single mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Board> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// How many mines have not been flagged yet; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot { board: self }
    }

    /// Reveals a cell. A mine ends the game, an empty cell flood fills, a
    /// number cell reveals alone. Flagged targets stay immune until unflagged.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.in_bounds(coords) || self.state.is_finished() {
            return RevealOutcome::NoChange;
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoChange;
        }

        match cell.kind {
            CellKind::Mine => {
                self.explode(coords);
                RevealOutcome::Exploded
            }
            CellKind::Empty => {
                self.flood(coords);
                self.check_win()
            }
            CellKind::Number(_) => {
                log::debug!("revealed number cell at {:?}", coords);
                self.reveal_cell(coords);
                self.check_win()
            }
        }
    }

    /// Flips the flag on a hidden cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.in_bounds(coords) || self.state.is_finished() {
            return FlagOutcome::NoChange;
        }

        let index = coords.to_nd_index();
        if self.cells[index].revealed {
            return FlagOutcome::NoChange;
        }

        let flagged = !self.cells[index].flagged;
        self.cells[index].flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        FlagOutcome::Toggled
    }

    /// When the target is a revealed number cell with a matching count of
    /// flagged neighbors, reveals all of its unflagged hidden neighbors and
    /// merges the outcomes. Anything else falls back to a plain [`reveal`].
    ///
    /// [`reveal`]: Board::reveal
    pub fn chord_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.in_bounds(coords) || self.state.is_finished() {
            return RevealOutcome::NoChange;
        }

        let cell = self.cells[coords.to_nd_index()];
        match cell.kind {
            CellKind::Number(count)
                if cell.revealed && count == self.count_flagged_neighbors(coords) =>
            {
                self.cells
                    .iter_adjacent(coords)
                    .map(|neighbor_coords| self.reveal(neighbor_coords))
                    .reduce(core::ops::BitOr::bitor)
                    .unwrap_or(RevealOutcome::NoChange)
            }
            _ => self.reveal(coords),
        }
    }

    /// Work-list expansion over the 4-connected empty region around `start`,
    /// revealing its number fringe as the stopping border. Mines and
    /// already-revealed cells end a branch; a flagged cell swept up by the
    /// flood loses its flag as it is revealed.
    fn flood(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = self.cells[coords.to_nd_index()];
            if cell.revealed || cell.kind.is_mine() {
                continue;
            }

            self.reveal_cell(coords);
            log::trace!("flood revealed {:?}", coords);

            if cell.kind == CellKind::Empty {
                to_visit.extend(self.cells.iter_cardinal(coords));
            }
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        let index = coords.to_nd_index();
        if self.cells[index].flagged {
            self.cells[index].flagged = false;
            self.flagged_count -= 1;
        }
        self.cells[index].revealed = true;
        self.revealed_count += 1;
    }

    fn check_win(&mut self) -> RevealOutcome {
        if self.revealed_count == self.safe_cell_count() {
            self.state = GameState::Won;
            self.flag_all_mines();
            log::debug!("all safe cells revealed, game won");
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    // Auto-flag every mine once the board is won.
    fn flag_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.kind.is_mine() && !cell.flagged {
                cell.flagged = true;
                self.flagged_count += 1;
            }
        }
    }

    /// Loss transition: the triggering mine is marked exploded and every
    /// mine on the board is revealed. A flagged mine loses its flag as it is
    /// revealed.
    fn explode(&mut self, trigger: Coord2) {
        log::debug!("mine hit at {:?}, game lost", trigger);
        self.state = GameState::Lost;

        for cell in self.cells.iter_mut() {
            if cell.kind.is_mine() {
                if cell.flagged {
                    cell.flagged = false;
                    self.flagged_count -= 1;
                }
                cell.revealed = true;
            }
        }
        self.cells[trigger.to_nd_index()].exploded = true;
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_adjacent(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].flagged)
            .count() as u8
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }
}

fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let dim = grid.dim();
    (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
}

/// Read-only view of the grid handed to the rendering collaborator. Visual
/// tile selection stays on the rendering side; this only exposes the raw
/// per-cell fields.
#[derive(Copy, Clone, Debug)]
pub struct BoardSnapshot<'a> {
    board: &'a Board,
}

impl<'a> BoardSnapshot<'a> {
    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn game_state(&self) -> GameState {
        self.board.state()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.cell_at(coords)
    }

    /// Iterates every cell with its coordinates, row by row.
    pub fn iter(self) -> impl Iterator<Item = (Coord2, Cell)> + 'a {
        self.board
            .cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }
}
