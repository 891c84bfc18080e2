//! Fixed-size bit set over the 361 board cells

use std::ops::BitOr;

use super::{Pos, TOTAL_CELLS};

/// Number of 64-bit words needed to cover the board (6 * 64 = 384 >= 361)
const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// One bit per cell, indexed row-major by [`Pos::to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    #[inline]
    fn locate(pos: Pos) -> (usize, u64) {
        let idx = pos.to_index();
        (idx / 64, 1u64 << (idx % 64))
    }

    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let (word, mask) = Self::locate(pos);
        self.bits[word] |= mask;
    }

    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let (word, mask) = Self::locate(pos);
        self.bits[word] &= !mask;
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        let (word, mask) = Self::locate(pos);
        self.bits[word] & mask != 0
    }

    /// Population count
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Iterate set cells in row-major order
    pub fn iter_ones(&self) -> Ones {
        Ones {
            bits: self.bits,
            word_idx: 0,
        }
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(mut self, rhs: Bitboard) -> Bitboard {
        for (lhs, rhs) in self.bits.iter_mut().zip(rhs.bits) {
            *lhs |= rhs;
        }
        self
    }
}

/// Iterator over set cells of a [`Bitboard`]
pub struct Ones {
    bits: [u64; WORDS],
    word_idx: usize,
}

impl Iterator for Ones {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < WORDS {
            let word = &mut self.bits[self.word_idx];
            if *word == 0 {
                self.word_idx += 1;
                continue;
            }
            let idx = self.word_idx * 64 + word.trailing_zeros() as usize;
            // clear lowest set bit
            *word &= *word - 1;
            return (idx < TOTAL_CELLS).then(|| Pos::from_index(idx));
        }
        None
    }
}
