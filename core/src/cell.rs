use serde::{Deserialize, Serialize};

/// Revealed-content classification, assigned once at board generation and
/// never re-derived afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Mine,
    /// Non-mine cell with 1 to 8 neighboring mines.
    Number(u8),
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Gameplay state of one grid position.
///
/// Invariants kept by the board: `flagged` implies not `revealed`, and
/// `exploded` is only ever set on the single revealed mine that ended a
/// lost game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub revealed: bool,
    pub flagged: bool,
    pub exploded: bool,
}
