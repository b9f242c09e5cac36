//! Match-3 board data structures.

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS};

/// Elemental tile types, in sprite/save index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Ice,
    Fire,
    Thunder,
    Poison,
}

impl ElementType {
    pub const ALL: [ElementType; 4] = [
        ElementType::Ice,
        ElementType::Fire,
        ElementType::Thunder,
        ElementType::Poison,
    ];

    /// Stable index used by the save format (Ice=0, Fire=1, Thunder=2, Poison=3).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ice => "Ice",
            Self::Fire => "Fire",
            Self::Thunder => "Thunder",
            Self::Poison => "Poison",
        }
    }
}

/// Grid coordinate as (row, col), 0-indexed from the top-left.
pub type Position = (usize, usize);

/// The tile grid. `None` is an empty cell awaiting gravity/refill;
/// outside of resolution every cell holds `Some` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The grid, indexed as grid[row][col].
    pub grid: Vec<Vec<Option<ElementType>>>,
    /// Grid height (number of rows).
    pub rows: usize,
    /// Grid width (number of columns).
    pub cols: usize,
}

impl Board {
    /// Create an all-empty board at the reference dimensions.
    pub fn empty() -> Self {
        Self {
            grid: vec![vec![None; BOARD_COLS]; BOARD_ROWS],
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
        }
    }

    pub fn in_bounds(&self, (row, col): Position) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn tile(&self, (row, col): Position) -> Option<ElementType> {
        self.grid[row][col]
    }

    /// True iff the two positions are orthogonal neighbors (Manhattan distance 1).
    pub fn is_adjacent((r1, c1): Position, (r2, c2): Position) -> bool {
        r1.abs_diff(r2) + c1.abs_diff(c2) == 1
    }

    /// A settled board has no empty cells.
    pub fn is_settled(&self) -> bool {
        self.grid
            .iter()
            .all(|row| row.iter().all(|tile| tile.is_some()))
    }
}
