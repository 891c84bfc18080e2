//! Heuristic evaluation function for Gomoku board positions
//!
//! Every stone looks at a 9-cell window through itself along each of the four
//! axes, and every evaluation shape matched through it adds that shape's
//! weight for the stone's owner. The result is the difference seen from the
//! requested color.
//!
//! This is a static approximation: a shape is counted once per participating
//! stone and once per axis, which favors positions with many reinforcing
//! shapes.

use crate::board::{Board, Direction, Stone};

use super::line::{Line, HALF_WIDTH};
use super::patterns::{PatternScore, Score, EVAL_PATTERNS};

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate advantage for the opponent
/// - a magnitude of at least `PatternScore::FIVE` means a five is on the board
///
/// Exactly antisymmetric: `evaluate(b, Black) == -evaluate(b, White)`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> Score {
    debug_assert!(color != Stone::Empty, "evaluation needs a side");
    evaluate_stones(board, color) - evaluate_stones(board, color.opponent())
}

/// Whether a score means the game is already decided
#[inline]
#[must_use]
pub fn is_decided(score: Score) -> bool {
    score.abs() >= PatternScore::FIVE
}

/// Sum of pattern weights over all stones of one color.
fn evaluate_stones(board: &Board, color: Stone) -> Score {
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    stones
        .iter_ones()
        .flat_map(|pos| Direction::ALL.map(|dir| Line::sample(board, pos, dir, HALF_WIDTH, color)))
        .map(score_line)
        .sum()
}

/// Weight of every evaluation shape matched through the line's center.
#[allow(clippy::cast_possible_wrap)]
fn score_line(line: Line) -> Score {
    EVAL_PATTERNS
        .iter()
        .map(|&(shape, weight)| line.count(shape) as Score * weight)
        .sum()
}
