//! Immediate threat detection
//!
//! For every empty cell, pretend a side has just played there and look up the
//! strongest threat shape that move completes through the cell. The detector
//! is run for both sides each turn: once to find our best attack and once to
//! find the opponent's most urgent point to block.

use crate::board::{Board, Direction, Pos, Stone};
use crate::eval::{Line, ThreatLevel, HALF_WIDTH, THREAT_PATTERNS};

/// Strongest immediate threat found for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    /// Threat level, see [`ThreatLevel`]
    pub level: u8,
    /// Cell achieving it, `None` when nothing was found
    pub pos: Option<Pos>,
}

impl Threat {
    /// Result when no empty cell completes any listed shape
    pub const NONE: Threat = Threat {
        level: ThreatLevel::NONE,
        pos: None,
    };

    #[inline]
    pub fn is_none(&self) -> bool {
        self.pos.is_none()
    }
}

/// Find the empty cell where `side` would complete its strongest threat shape.
///
/// Cells are scanned row-major; on equal levels the first cell found wins.
/// Returns [`Threat::NONE`] if no cell completes any listed shape.
///
/// # Example
///
/// ```
/// use gomoku::board::{Board, Pos, Stone};
/// use gomoku::search::max_threat;
///
/// let mut board = Board::new();
/// for col in 5..9 {
///     board.place_stone(Pos::new(9, col), Stone::Black);
/// }
/// let threat = max_threat(&board, Stone::Black);
/// assert_eq!(threat.level, 100);
/// assert_eq!(threat.pos, Some(Pos::new(9, 4)));
/// ```
#[must_use]
pub fn max_threat(board: &Board, side: Stone) -> Threat {
    let mut best = Threat::NONE;

    for pos in board.empty_cells() {
        let level = threat_at(board, pos, side);
        if level > best.level {
            best = Threat {
                level,
                pos: Some(pos),
            };
            if level >= ThreatLevel::FIVE {
                // Nothing ranks higher, and later cells cannot win a tie
                break;
            }
        }
    }

    best
}

/// Level of the strongest shape `side` completes by playing at `pos`.
///
/// The cell's current content is ignored; it is read as a `side` stone.
#[must_use]
pub fn threat_at(board: &Board, pos: Pos, side: Stone) -> u8 {
    Direction::ALL
        .iter()
        .map(|&dir| {
            let line = Line::sample_as_played(board, pos, dir, HALF_WIDTH, side);
            line_level(line)
        })
        .max()
        .unwrap_or(ThreatLevel::NONE)
}

/// First (strongest) threat shape in the table matching through the center
fn line_level(line: Line) -> u8 {
    THREAT_PATTERNS
        .iter()
        .find(|&&(shape, _)| line.contains(shape))
        .map_or(ThreatLevel::NONE, |&(_, level)| level)
}
