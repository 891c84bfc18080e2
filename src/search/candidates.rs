//! Candidate move generation
//!
//! Search only considers the active frontier: empty cells within Chebyshev
//! distance [`RADIUS`] of any stone.

use crate::board::{Board, Pos, BOARD_SIZE};

/// Neighborhood radius around existing stones (a 5x5 box)
pub const RADIUS: i32 = 2;

/// Empty cells near existing stones, de-duplicated, in row-major order.
///
/// Returns an empty list on an empty board; the caller picks the opening.
#[must_use]
pub fn candidates(board: &Board) -> Vec<Pos> {
    let mut near = [[false; BOARD_SIZE]; BOARD_SIZE];

    for pos in board.occupied().iter_ones() {
        for dr in -RADIUS..=RADIUS {
            for dc in -RADIUS..=RADIUS {
                let r = i32::from(pos.row) + dr;
                let c = i32::from(pos.col) + dc;
                if let Some(p) = Pos::try_new(r, c) {
                    near[p.row as usize][p.col as usize] = true;
                }
            }
        }
    }

    let mut moves = Vec::with_capacity(64);
    for (r, row) in near.iter().enumerate() {
        for (c, &flag) in row.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let pos = Pos::new(r as u8, c as u8);
            if flag && board.is_empty(pos) {
                moves.push(pos);
            }
        }
    }
    moves
}
