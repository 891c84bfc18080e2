//! Depth-bounded minimax with alpha-beta pruning
//!
//! The searcher maximizes the static evaluation for one fixed color. Moves
//! for either side are drawn from the candidate frontier in row-major order,
//! so the first best move seen wins every tie and results are deterministic.
//!
//! Stones placed while descending go through [`Board::place_scoped`], which
//! restores the cell on every exit path, pruning breaks included.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new();
//! for col in 0..4 {
//!     board.place_stone(Pos::new(9, col), Stone::Black);
//! }
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&board, Stone::Black, 2);
//! assert_eq!(result.best_move, Some(Pos::new(9, 4)));
//! ```

use std::time::{Duration, Instant};

use log::trace;

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, is_decided, Score};

use super::candidates::candidates;

/// Infinity score for alpha-beta bounds
const INF: Score = Score::MAX;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Expansions cut short because `beta <= alpha`
    pub beta_cutoffs: u64,
    /// Static evaluations performed
    pub evaluations: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only when there was nothing to search
    pub best_move: Option<Pos>,
    /// Minimax value of the position for the searching color
    pub score: Score,
    /// Requested depth
    pub depth: i8,
    /// Total nodes visited
    pub nodes: u64,
    /// Whether the deadline cut the search short
    pub timed_out: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Minimax searcher with optional pruning and deadline.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    pruning: bool,
    stopped: bool,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher without a time limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a searcher that stops descending once `limit` has elapsed and
    /// answers with the best root move completed so far.
    #[must_use]
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Alpha-beta search for `color` to `depth` plies.
    ///
    /// The board is only borrowed; the search works on its own copy.
    #[must_use]
    pub fn search(&mut self, board: &Board, color: Stone, depth: i8) -> SearchResult {
        self.run(board, color, depth, true)
    }

    /// Plain minimax to `depth` plies, visiting every node.
    ///
    /// Returns the same move and score as [`Searcher::search`]; kept as the
    /// reference the pruned search is checked against.
    #[must_use]
    pub fn minimax(&mut self, board: &Board, color: Stone, depth: i8) -> SearchResult {
        self.run(board, color, depth, false)
    }

    fn run(&mut self, board: &Board, color: Stone, depth: i8, pruning: bool) -> SearchResult {
        debug_assert!(color != Stone::Empty, "search needs a side");
        self.pruning = pruning;
        self.stopped = false;
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.deadline = self.time_limit.map(|limit| Instant::now() + limit);

        let mut work_board = board.clone();
        let (score, mut best_move) = self.alpha_beta(&mut work_board, color, depth, -INF, INF, true);
        debug_assert_eq!(&work_board, board, "search leaked a placement");

        if best_move.is_none() && self.stopped {
            // Out of time before any root move finished
            best_move = candidates(board).first().copied();
        }

        trace!(
            "search depth={} pruning={} nodes={} cutoffs={} score={} move={:?} timed_out={}",
            depth,
            pruning,
            self.nodes,
            self.stats.beta_cutoffs,
            score,
            best_move,
            self.stopped
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            timed_out: self.stopped,
            stats: self.stats.clone(),
        }
    }

    /// Check the deadline and latch the stop flag once it has passed.
    #[inline]
    fn check_time(&mut self) -> bool {
        if !self.stopped {
            if let Some(deadline) = self.deadline {
                self.stopped = Instant::now() >= deadline;
            }
        }
        self.stopped
    }

    /// Recursive minimax node. `maximizing` means `color` is to move.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: i8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> (Score, Option<Pos>) {
        self.nodes += 1;
        self.stats.evaluations += 1;
        let static_score = evaluate(board, color);

        if depth <= 0 || is_decided(static_score) || self.check_time() {
            return (static_score, None);
        }

        let moves = candidates(board);
        if moves.is_empty() {
            return (static_score, None);
        }

        let mover = if maximizing { color } else { color.opponent() };
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mov in moves {
            let (score, _) = {
                let mut child = board.place_scoped(mov, mover);
                self.alpha_beta(&mut child, color, depth - 1, alpha, beta, !maximizing)
            };

            if self.stopped {
                break;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mov);
                }
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        if best_move.is_none() {
            // Interrupted before the first child finished
            return (static_score, None);
        }
        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in setup {
            board.place_stone(Pos::new(row, col), stone);
        }
        board
    }

    fn midgame() -> Board {
        setup_board(&[
            (9, 9, Stone::Black),
            (9, 10, Stone::White),
            (10, 10, Stone::Black),
            (8, 8, Stone::White),
            (10, 9, Stone::Black),
        ])
    }

    #[test]
    fn test_search_empty_board() {
        let mut searcher = Searcher::new();
        let result = searcher.search(&Board::new(), Stone::Black, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_search_depth_zero_is_static() {
        let board = midgame();
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Stone::White, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&board, Stone::White));
    }

    #[test]
    fn test_search_finds_winning_move() {
        let board = setup_board(&[
            (9, 0, Stone::Black),
            (9, 1, Stone::Black),
            (9, 2, Stone::Black),
            (9, 3, Stone::Black),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Stone::Black, 1);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert!(result.score >= PatternScore::FIVE);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let board = setup_board(&[
            (9, 0, Stone::White),
            (9, 1, Stone::White),
            (9, 2, Stone::White),
            (9, 3, Stone::White),
            (10, 0, Stone::Black),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Stone::Black, 2);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
    }

    #[test]
    fn test_decided_position_is_terminal() {
        let board = setup_board(&[
            (2, 2, Stone::White),
            (2, 3, Stone::White),
            (2, 4, Stone::White),
            (2, 5, Stone::White),
            (2, 6, Stone::White),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Stone::Black, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
        assert!(result.score <= -PatternScore::FIVE);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = midgame();
        let before = board.clone();
        let mut searcher = Searcher::new();
        let _ = searcher.search(&board, Stone::White, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let board = midgame();
        let mut searcher = Searcher::new();

        for (color, depth) in [(Stone::White, 1), (Stone::White, 2), (Stone::Black, 2), (Stone::White, 3)] {
            let pruned = searcher.search(&board, color, depth);
            let full = searcher.minimax(&board, color, depth);
            assert_eq!(pruned.best_move, full.best_move, "{color:?} depth {depth}");
            assert_eq!(pruned.score, full.score, "{color:?} depth {depth}");
            assert!(pruned.nodes <= full.nodes);
            assert_eq!(full.stats.beta_cutoffs, 0);
        }
    }

    #[test]
    fn test_pruning_saves_nodes() {
        let board = midgame();
        let mut searcher = Searcher::new();
        let pruned = searcher.search(&board, Stone::White, 2);
        let full = searcher.minimax(&board, Stone::White, 2);
        assert!(pruned.stats.beta_cutoffs > 0);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn test_expired_deadline_falls_back_to_first_candidate() {
        let board = midgame();
        let mut searcher = Searcher::with_time_limit(Duration::ZERO);
        let result = searcher.search(&board, Stone::White, 3);
        assert!(result.timed_out);
        assert_eq!(result.best_move, candidates(&board).first().copied());
        assert_eq!(searcher.time_limit(), Some(Duration::ZERO));
    }

    #[test]
    fn test_generous_deadline_matches_untimed() {
        let board = midgame();
        let untimed = Searcher::new().search(&board, Stone::Black, 2);
        let timed = Searcher::with_time_limit(Duration::from_secs(600)).search(&board, Stone::Black, 2);
        assert!(!timed.timed_out);
        assert_eq!(timed.best_move, untimed.best_move);
        assert_eq!(timed.score, untimed.score);
    }
}
