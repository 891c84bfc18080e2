//! Pattern tables for Gomoku evaluation and threat detection
//!
//! Shapes are written as templates over three symbols:
//! - `X`: a stone of the perspective color
//! - `_`: an empty cell
//! - `O`: an opposing stone or the board edge
//!
//! Templates are parsed at compile time into a pair of bit masks so matching
//! a [`Line`](super::line::Line) is two shifts and two compares.

use super::line::MAX_LINE;

/// Signed evaluation score (positive favors the perspective color)
pub type Score = i64;

/// Evaluation weights, strictly decreasing with tactical severity
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - the game is decided
    pub const FIVE: Score = 10_000_000;
    /// Open four: _XXXX_
    pub const OPEN_FOUR: Score = 100_000;
    /// Simple four: one completion point left (OXXXX_, XX_XX, ...)
    pub const FOUR: Score = 10_000;
    /// Open three: _XXX_, _X_XX_, _XX_X_
    pub const OPEN_THREE: Score = 1_000;
    /// Three with one side blocked
    pub const BLOCKED_THREE: Score = 200;
    /// Open two
    pub const OPEN_TWO: Score = 50;
    /// Two with one side blocked
    pub const BLOCKED_TWO: Score = 10;
}

/// Threat levels ranking immediate tactical replies.
///
/// Never summed with evaluation scores.
pub struct ThreatLevel;

impl ThreatLevel {
    /// No listed pattern completed
    pub const NONE: u8 = 0;
    /// Playing here makes five
    pub const FIVE: u8 = 100;
    /// Playing here makes an open four
    pub const OPEN_FOUR: u8 = 90;
    /// Playing here makes a four with a single completion point
    pub const FOUR: u8 = 80;
    /// Playing here makes an open three with room on both sides
    pub const OPEN_THREE: u8 = 60;
    /// Playing here makes a bare three that still has to be answered
    pub const FORCING_THREE: u8 = 50;
}

/// A fixed shape template, stored as masks over its own length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    own: u16,
    empty: u16,
    len: u8,
}

impl Shape {
    /// Parse a template of `X`, `_` and `O` bytes.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for constants) on an empty template, one
    /// longer than a sampled line, or any other byte.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(template: &[u8]) -> Self {
        assert!(
            !template.is_empty() && template.len() <= MAX_LINE,
            "shape template length out of range"
        );
        let mut own = 0u16;
        let mut empty = 0u16;
        let mut i = 0;
        while i < template.len() {
            match template[i] {
                b'X' => own |= 1 << i,
                b'_' => empty |= 1 << i,
                b'O' => {}
                _ => panic!("shape templates use only X, _ and O"),
            }
            i += 1;
        }
        Self {
            own,
            empty,
            len: template.len() as u8,
        }
    }

    #[inline]
    pub const fn own(self) -> u16 {
        self.own
    }

    #[inline]
    pub const fn empty(self) -> u16 {
        self.empty
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Number of own stones in the template
    #[inline]
    pub const fn stones(self) -> u32 {
        self.own.count_ones()
    }
}

/// Evaluation table: shape and its weight.
pub const EVAL_PATTERNS: [(Shape, Score); 23] = [
    (Shape::new(b"XXXXX"), PatternScore::FIVE),
    (Shape::new(b"_XXXX_"), PatternScore::OPEN_FOUR),
    (Shape::new(b"OXXXX_"), PatternScore::FOUR),
    (Shape::new(b"_XXXXO"), PatternScore::FOUR),
    (Shape::new(b"X_XXX"), PatternScore::FOUR),
    (Shape::new(b"XXX_X"), PatternScore::FOUR),
    (Shape::new(b"XX_XX"), PatternScore::FOUR),
    (Shape::new(b"_XXX_"), PatternScore::OPEN_THREE),
    (Shape::new(b"_X_XX_"), PatternScore::OPEN_THREE),
    (Shape::new(b"_XX_X_"), PatternScore::OPEN_THREE),
    (Shape::new(b"OXXX__"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"__XXXO"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"OXX_X_"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"_X_XXO"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"OX_XX_"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"_XX_XO"), PatternScore::BLOCKED_THREE),
    (Shape::new(b"__XX__"), PatternScore::OPEN_TWO),
    (Shape::new(b"_X_X_"), PatternScore::OPEN_TWO),
    (Shape::new(b"_X__X_"), PatternScore::OPEN_TWO),
    (Shape::new(b"OXX___"), PatternScore::BLOCKED_TWO),
    (Shape::new(b"___XXO"), PatternScore::BLOCKED_TWO),
    (Shape::new(b"OX_X__"), PatternScore::BLOCKED_TWO),
    (Shape::new(b"__X_XO"), PatternScore::BLOCKED_TWO),
];

/// Threat table: shape a move would complete and its level.
pub const THREAT_PATTERNS: [(Shape, u8); 12] = [
    (Shape::new(b"XXXXX"), ThreatLevel::FIVE),
    (Shape::new(b"_XXXX_"), ThreatLevel::OPEN_FOUR),
    (Shape::new(b"OXXXX_"), ThreatLevel::FOUR),
    (Shape::new(b"_XXXXO"), ThreatLevel::FOUR),
    (Shape::new(b"X_XXX"), ThreatLevel::FOUR),
    (Shape::new(b"XXX_X"), ThreatLevel::FOUR),
    (Shape::new(b"XX_XX"), ThreatLevel::FOUR),
    (Shape::new(b"_XXX__"), ThreatLevel::OPEN_THREE),
    (Shape::new(b"__XXX_"), ThreatLevel::OPEN_THREE),
    (Shape::new(b"_X_XX_"), ThreatLevel::OPEN_THREE),
    (Shape::new(b"_XX_X_"), ThreatLevel::OPEN_THREE),
    (Shape::new(b"_XXX_"), ThreatLevel::FORCING_THREE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        // Each tier must dwarf the one below it
        let tiers = [
            PatternScore::FIVE,
            PatternScore::OPEN_FOUR,
            PatternScore::FOUR,
            PatternScore::OPEN_THREE,
            PatternScore::BLOCKED_THREE,
            PatternScore::OPEN_TWO,
            PatternScore::BLOCKED_TWO,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0] >= 4 * pair[1], "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_threat_level_hierarchy() {
        assert!(ThreatLevel::FIVE > ThreatLevel::OPEN_FOUR);
        assert!(ThreatLevel::OPEN_FOUR > ThreatLevel::FOUR);
        assert!(ThreatLevel::FOUR > ThreatLevel::OPEN_THREE);
        assert!(ThreatLevel::OPEN_THREE > ThreatLevel::FORCING_THREE);
        assert!(ThreatLevel::FORCING_THREE > ThreatLevel::NONE);
    }

    #[test]
    fn test_shape_masks() {
        let shape = Shape::new(b"_XX_XO");
        assert_eq!(shape.len(), 6);
        assert_eq!(shape.own(), 0b01_0110);
        assert_eq!(shape.empty(), 0b00_1001);
        assert_eq!(shape.stones(), 3);
    }

    #[test]
    fn test_tables_sorted_by_value() {
        assert!(EVAL_PATTERNS.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(THREAT_PATTERNS.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_only_five_template_is_a_full_run() {
        for (shape, weight) in EVAL_PATTERNS {
            if weight == PatternScore::FIVE {
                assert_eq!(shape.stones(), 5);
            } else {
                assert!(shape.stones() <= 4);
            }
        }
    }

    /// Same template read right to left
    fn reversed(shape: Shape) -> Shape {
        let len = shape.len();
        let flip = |mask: u16| (0..len).filter(|i| mask & (1 << i) != 0).fold(0u16, |acc, i| acc | 1 << (len - 1 - i));
        Shape {
            own: flip(shape.own()),
            empty: flip(shape.empty()),
            len: shape.len,
        }
    }

    #[test]
    fn test_reversed_helper() {
        assert_eq!(reversed(Shape::new(b"OX_X__")), Shape::new(b"__X_XO"));
        assert_eq!(reversed(Shape::new(b"XX_XX")), Shape::new(b"XX_XX"));
    }

    #[test]
    fn test_eval_table_closed_under_reversal() {
        for (shape, weight) in EVAL_PATTERNS {
            let mirror = reversed(shape);
            assert!(
                EVAL_PATTERNS.contains(&(mirror, weight)),
                "{shape:?} has no mirror with weight {weight}"
            );
        }
    }

    #[test]
    fn test_threat_table_closed_under_reversal() {
        for (shape, level) in THREAT_PATTERNS {
            let mirror = reversed(shape);
            assert!(
                THREAT_PATTERNS.contains(&(mirror, level)),
                "{shape:?} has no mirror with level {level}"
            );
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        for (i, (a, _)) in EVAL_PATTERNS.iter().enumerate() {
            for (b, _) in &EVAL_PATTERNS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
