//! Win condition checking
//!
//! Five or more stones of one color in a row, in any of the four directions,
//! win the game. Overlines count.

use crate::board::{Board, Direction, Pos, Stone, WIN_LENGTH};

/// Length of the unbroken run of `color` through `pos` along `dir`.
///
/// The cell at `pos` is counted as `color` regardless of its content.
fn run_length(board: &Board, pos: Pos, dir: Direction, color: Stone) -> usize {
    let (dr, dc) = dir.delta();
    let mut count = 1;
    for sign in [1, -1] {
        let mut r = i32::from(pos.row) + dr * sign;
        let mut c = i32::from(pos.col) + dc * sign;
        while let Some(next) = Pos::try_new(r, c) {
            if board.get(next) != color {
                break;
            }
            count += 1;
            r += dr * sign;
            c += dc * sign;
        }
    }
    count
}

/// Fast five-in-a-row check through a specific position.
///
/// Only walks the 4 lines through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    Direction::ALL
        .iter()
        .any(|&dir| run_length(board, pos, dir, color) >= WIN_LENGTH)
}

/// Find the stones of a winning line of `color`, if one exists.
///
/// Returns the run in board order along its direction.
pub fn find_five_positions(board: &Board, color: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(color)?;

    for pos in stones.iter_ones() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            // Only start from the first stone of a run
            let before = Pos::try_new(i32::from(pos.row) - dr, i32::from(pos.col) - dc);
            if before.is_some_and(|p| board.get(p) == color) {
                continue;
            }

            let line: Vec<Pos> = (0..)
                .map_while(|i| Pos::try_new(i32::from(pos.row) + dr * i, i32::from(pos.col) + dc * i))
                .take_while(|&p| board.get(p) == color)
                .collect();
            if line.len() >= WIN_LENGTH {
                return Some(line);
            }
        }
    }
    None
}

/// Winner of the position, if either side has five in a row.
///
/// Black is reported first if, impossibly in a real game, both have one.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&color| find_five_positions(board, color).is_some())
}
