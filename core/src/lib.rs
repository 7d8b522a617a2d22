//! Minesweeper board engine: grid generation, mine placement, adjacency
//! numbers, reveal/flag transitions with flood fill, and win/loss detection.
//! Rendering and input mapping live in the hosting application; this crate
//! only hands out read-only snapshots.

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine budget handed to generators and sessions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps both dimensions to at least 1 and `mines` into
    /// `[0, width * height]`. Hosts that would rather treat a bad
    /// configuration as a bug use [`GameConfig::try_new`] instead.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.clamp(0, mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    /// Fail-fast variant of [`GameConfig::new`]: rejects empty boards and
    /// mine budgets beyond the cell count instead of clamping.
    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Toggled => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Merges outcomes when one call reveals several cells (chorded reveals).
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_dimensions_and_mines() {
        let config = GameConfig::new((0, 5), 999);

        assert_eq!(config.size, (1, 5));
        assert_eq!(config.mines, 5);
    }

    #[test]
    fn config_try_new_rejects_misuse() {
        assert_eq!(GameConfig::try_new((0, 3), 1), Err(GameError::EmptyBoard));
        assert_eq!(
            GameConfig::try_new((2, 2), 5),
            Err(GameError::TooManyMines)
        );
        assert!(GameConfig::try_new((2, 2), 4).is_ok());
    }

    #[test]
    fn reveal_outcomes_merge_by_priority() {
        use RevealOutcome::*;

        assert_eq!(Revealed | Exploded, Exploded);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Revealed, Revealed);
    }
}
