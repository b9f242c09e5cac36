//! Board logic: generation, swapping, match detection, gravity and refill.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::board::{Board, ElementType, Position};
use crate::constants::MIN_MATCH_RUN;

/// A tile participating in a match, reported once even when it belongs to
/// both a horizontal and a vertical run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedTile {
    pub pos: Position,
    pub element: ElementType,
}

/// A tile movement produced by gravity/refill, for the presentation layer
/// to animate. Spawned tiles enter from above their target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMove {
    Fall {
        element: ElementType,
        from: Position,
        to: Position,
    },
    Spawn {
        element: ElementType,
        to: Position,
    },
}

/// Rejected swap request. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("position ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },
    #[error("tiles {p1:?} and {p2:?} are not adjacent")]
    NotAdjacent { p1: Position, p2: Position },
}

fn random_element<R: Rng>(rng: &mut R) -> ElementType {
    ElementType::ALL[rng.gen_range(0..ElementType::ALL.len())]
}

/// Generate a fresh board with no pre-existing match.
///
/// Fills left-to-right, top-to-bottom in a single pass. Each cell draws
/// uniformly from the elements that would not complete a run of 3 against
/// the two already-placed neighbors to the left and above, so no repair
/// step is needed afterwards.
pub fn generate_board<R: Rng>(rng: &mut R) -> Board {
    let mut board = Board::empty();

    for r in 0..board.rows {
        for c in 0..board.cols {
            let mut candidates: Vec<ElementType> = ElementType::ALL.to_vec();

            if c >= 2 {
                if let (Some(left), Some(far_left)) = (board.grid[r][c - 1], board.grid[r][c - 2]) {
                    if left == far_left {
                        candidates.retain(|e| *e != left);
                    }
                }
            }
            if r >= 2 {
                if let (Some(above), Some(far_above)) =
                    (board.grid[r - 1][c], board.grid[r - 2][c])
                {
                    if above == far_above {
                        candidates.retain(|e| *e != above);
                    }
                }
            }

            board.grid[r][c] = Some(candidates[rng.gen_range(0..candidates.len())]);
        }
    }

    board
}

/// Swap two tile values without any validity check.
///
/// Used internally by [`try_swap`] and by the turn machine to issue the
/// logical revert after a swap that produced no match.
pub fn swap_tiles(board: &mut Board, (r1, c1): Position, (r2, c2): Position) {
    let temp = board.grid[r1][c1];
    board.grid[r1][c1] = board.grid[r2][c2];
    board.grid[r2][c2] = temp;
}

/// Validate and perform a swap, returning the post-swap match set.
///
/// An empty match set means the caller is expected to swap back; the board
/// does not auto-revert, so the intermediate state stays observable for
/// rendering.
pub fn try_swap(board: &mut Board, p1: Position, p2: Position) -> Result<Vec<MatchedTile>, SwapError> {
    for pos in [p1, p2] {
        if !board.in_bounds(pos) {
            return Err(SwapError::OutOfBounds {
                row: pos.0,
                col: pos.1,
            });
        }
    }
    if !Board::is_adjacent(p1, p2) {
        return Err(SwapError::NotAdjacent { p1, p2 });
    }

    swap_tiles(board, p1, p2);
    Ok(check_matches(board))
}

/// Scan the whole board for horizontal and vertical runs of 3 or more
/// identical non-empty tiles.
///
/// Tiles belonging to both a horizontal and a vertical run (L/T/cross
/// shapes) are reported exactly once. The result is ordered row-major for
/// deterministic consumption.
pub fn check_matches(board: &Board) -> Vec<MatchedTile> {
    let mut matched: HashSet<Position> = HashSet::new();

    // Horizontal runs
    for r in 0..board.rows {
        let mut c = 0;
        while c < board.cols {
            let element = board.grid[r][c];
            let mut end = c + 1;
            while end < board.cols && board.grid[r][end] == element {
                end += 1;
            }
            if element.is_some() && end - c >= MIN_MATCH_RUN {
                for cc in c..end {
                    matched.insert((r, cc));
                }
            }
            c = end;
        }
    }

    // Vertical runs
    for c in 0..board.cols {
        let mut r = 0;
        while r < board.rows {
            let element = board.grid[r][c];
            let mut end = r + 1;
            while end < board.rows && board.grid[end][c] == element {
                end += 1;
            }
            if element.is_some() && end - r >= MIN_MATCH_RUN {
                for rr in r..end {
                    matched.insert((rr, c));
                }
            }
            r = end;
        }
    }

    let mut tiles: Vec<MatchedTile> = matched
        .into_iter()
        .filter_map(|pos| {
            board.tile(pos).map(|element| MatchedTile { pos, element })
        })
        .collect();
    tiles.sort_by_key(|tile| tile.pos);
    tiles
}

/// Mark the given positions empty. Pure grid mutation.
pub fn clear_tiles(board: &mut Board, tiles: &[MatchedTile]) {
    for tile in tiles {
        let (r, c) = tile.pos;
        board.grid[r][c] = None;
    }
}

/// Per column: drop every tile by the number of empty cells below it, then
/// fill the vacated top cells with new random elements.
///
/// Refills get no pre-match avoidance; new matches here are intentional and
/// drive combos. Returns the move list for animation. Afterwards the board
/// has no empty cell but may contain new matches.
pub fn drop_and_fill<R: Rng>(board: &mut Board, rng: &mut R) -> Vec<TileMove> {
    let mut moves = Vec::new();

    for c in 0..board.cols {
        let mut empty_below = 0;

        // Scan from the bottom row upward
        for r in (0..board.rows).rev() {
            match board.grid[r][c] {
                None => empty_below += 1,
                Some(element) if empty_below > 0 => {
                    board.grid[r + empty_below][c] = Some(element);
                    board.grid[r][c] = None;
                    moves.push(TileMove::Fall {
                        element,
                        from: (r, c),
                        to: (r + empty_below, c),
                    });
                }
                Some(_) => {}
            }
        }

        // Fill the vacated top cells
        for r in 0..empty_below {
            let element = random_element(rng);
            board.grid[r][c] = Some(element);
            moves.push(TileMove::Spawn { element, to: (r, c) });
        }
    }

    moves
}
