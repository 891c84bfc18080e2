//! Fixed-width symbolic windows sampled along one axis
//!
//! A [`Line`] looks at `2 * half_width + 1` cells centered on a point and
//! classifies each one relative to a perspective color: own stone, empty, or
//! blocked. Off-board cells are blocked, so a board edge behaves like an
//! opposing stone and edge shapes are never scored as open.

use crate::board::{Board, Direction, Pos, Stone};

use super::patterns::Shape;

/// Window half-width used by both the evaluator and the threat detector
pub const HALF_WIDTH: usize = 4;

/// Maximum window length supported by the mask representation
pub const MAX_LINE: usize = 2 * HALF_WIDTH + 1;

/// Classification of one window slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Own,
    Empty,
    /// Opponent stone or off-board
    Blocked,
}

/// A sampled window, slot 0 being the farthest cell behind the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    own: u16,
    empty: u16,
    len: u8,
}

impl Line {
    /// Sample the board around `center` along `dir`, seen from `color`.
    #[must_use]
    pub fn sample(board: &Board, center: Pos, dir: Direction, half_width: usize, color: Stone) -> Self {
        debug_assert!(2 * half_width + 1 <= MAX_LINE);
        let (dr, dc) = dir.delta();
        let span = half_width as i32;
        let mut line = Line::default();

        for step in -span..=span {
            let r = i32::from(center.row) + dr * step;
            let c = i32::from(center.col) + dc * step;
            let symbol = match Pos::try_new(r, c).map(|p| board.get(p)) {
                None => Symbol::Blocked,
                Some(Stone::Empty) => Symbol::Empty,
                Some(s) if s == color => Symbol::Own,
                Some(_) => Symbol::Blocked,
            };
            line.push(symbol);
        }
        line
    }

    /// Sample as if `color` had just played at `center`, whatever the cell holds.
    #[must_use]
    pub fn sample_as_played(board: &Board, center: Pos, dir: Direction, half_width: usize, color: Stone) -> Self {
        let mut line = Self::sample(board, center, dir, half_width, color);
        line.put(half_width, Symbol::Own);
        line
    }

    fn push(&mut self, symbol: Symbol) {
        let idx = usize::from(self.len);
        self.len += 1;
        self.put(idx, symbol);
    }

    fn put(&mut self, idx: usize, symbol: Symbol) {
        let bit = 1u16 << idx;
        self.own &= !bit;
        self.empty &= !bit;
        match symbol {
            Symbol::Own => self.own |= bit,
            Symbol::Empty => self.empty |= bit,
            Symbol::Blocked => {}
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn center(&self) -> usize {
        self.len() / 2
    }

    pub fn symbol(&self, idx: usize) -> Symbol {
        assert!(idx < self.len(), "slot {idx} outside a line of {}", self.len);
        let bit = 1u16 << idx;
        if self.own & bit != 0 {
            Symbol::Own
        } else if self.empty & bit != 0 {
            Symbol::Empty
        } else {
            Symbol::Blocked
        }
    }

    /// Offsets at which `shape` matches with its span covering the center slot.
    pub fn matches_through_center(self, shape: Shape) -> impl Iterator<Item = usize> {
        let len = self.len();
        let shape_len = shape.len();
        let center = self.center();
        let first = (center + 1).saturating_sub(shape_len);
        let last = center.min(len.saturating_sub(shape_len));
        let mask = (1u16 << shape_len) - 1;

        (first..=last)
            .filter(move |&offset| offset + shape_len <= len)
            .filter(move |&offset| {
                (self.own >> offset) & mask == shape.own() && (self.empty >> offset) & mask == shape.empty()
            })
    }

    /// Number of center-covering occurrences of `shape`
    #[inline]
    pub fn count(self, shape: Shape) -> usize {
        self.matches_through_center(shape).count()
    }

    /// Whether `shape` occurs through the center
    #[inline]
    pub fn contains(self, shape: Shape) -> bool {
        self.matches_through_center(shape).next().is_some()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for idx in 0..self.len() {
            let ch = match self.symbol(idx) {
                Symbol::Own => 'X',
                Symbol::Empty => '_',
                Symbol::Blocked => 'O',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
