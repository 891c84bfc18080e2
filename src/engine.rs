//! Main AI Engine integrating all search components
//!
//! The engine owns its own board and plays one fixed color. Each turn it
//! records the opponent's move, ranks the immediate threats of both sides and
//! applies a fixed priority policy:
//!
//! 1. **Immediate win**: our threat level reaches five
//! 2. **Block win**: the opponent's threat level reaches five
//! 3. **Attack**: we can make an open four and the opponent has nothing stronger
//! 4. **Defense**: the opponent can make an open four
//! 5. **Attack**: our open three is at least a level above the opponent's best
//! 6. **Alpha-Beta**: no forced tactic, fall back to minimax search
//!
//! If the search has nothing to offer, the engine plays the board center, or
//! the first empty cell when the center is taken.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Pos, Stone};
//!
//! let mut engine = AIEngine::with_config(EngineConfig {
//!     max_depth: 1,
//!     ..EngineConfig::default()
//! });
//! assert_eq!(engine.color(), Stone::White);
//!
//! let reply = engine.take_turn(9, 9).unwrap();
//! assert_eq!(engine.board().get(reply), Stone::White);
//! assert_eq!(engine.board().get(Pos::new(9, 9)), Stone::Black);
//! ```

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, Score, ThreatLevel};
use crate::search::{max_threat, SearchResult, Searcher, Threat};

/// Rejected move requests and unplayable positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("move ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({}, {}) is already occupied", .0.row, .0.col)]
    Occupied(Pos),
    #[error("no empty cell left on the board")]
    BoardFull,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth in plies when no forced tactic applies
    pub max_depth: i8,
    /// Optional per-move deadline for the search
    pub time_limit: Option<Duration>,
    /// Color the engine plays
    pub color: Stone,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            time_limit: None,
            color: Stone::White,
        }
    }
}

/// Type of decision that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// First stone of the game, at the center
    Opening,
    /// Completes our five
    ImmediateWin,
    /// Blocks the opponent's five
    BlockWin,
    /// Plays our own strongest threat
    Attack,
    /// Blocks the opponent's open-four point
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Search produced nothing; center or first empty cell
    Fallback,
}

/// Result of a move decision with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen move
    pub best_move: Pos,
    /// Evaluation for the engine: search value, or static score after the move
    pub score: Score,
    /// Which branch of the policy chose the move
    pub search_type: SearchType,
    /// Our strongest immediate threat level
    pub ai_threat: u8,
    /// Opponent's strongest immediate threat level
    pub opp_threat: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of search nodes visited
    pub nodes: u64,
}

/// Main AI Engine for Gomoku.
///
/// Owns the authoritative engine-side board; the caller keeps its own copy
/// in sync through [`AIEngine::take_turn`].
#[derive(Debug, Clone)]
pub struct AIEngine {
    board: Board,
    config: EngineConfig,
    searcher: Searcher,
}

impl AIEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.color` is `Stone::Empty`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_board(Board::new(), config)
    }

    /// Create an engine resuming from an existing position.
    ///
    /// # Panics
    ///
    /// Panics if `config.color` is `Stone::Empty`.
    #[must_use]
    pub fn from_board(board: Board, config: EngineConfig) -> Self {
        assert!(config.color != Stone::Empty, "the engine must play a color");
        let mut searcher = Searcher::new();
        searcher.set_time_limit(config.time_limit);
        Self {
            board,
            config,
            searcher,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Color the engine plays
    #[must_use]
    pub fn color(&self) -> Stone {
        self.config.color
    }

    pub fn set_max_depth(&mut self, depth: i8) {
        self.config.max_depth = depth;
    }

    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.config.time_limit = limit;
        self.searcher.set_time_limit(limit);
    }

    /// Start a new game on an empty board, keeping the configuration.
    pub fn reset(&mut self) {
        self.board = Board::new();
    }

    /// Record the opponent's move, answer it, and return the engine's move.
    ///
    /// The engine's stone is already on its board when this returns. An
    /// illegal request is rejected and leaves the board unchanged.
    pub fn take_turn(&mut self, row: i32, col: i32) -> Result<Pos, EngineError> {
        self.record_move(row, col)?;
        self.play_own_move()
    }

    /// Play the engine's move without an opponent move first (engine opens).
    pub fn open(&mut self) -> Result<Pos, EngineError> {
        self.play_own_move()
    }

    /// Put an opponent stone on the board without answering it.
    pub fn record_move(&mut self, row: i32, col: i32) -> Result<Pos, EngineError> {
        let pos = self.check_move(row, col)?;
        self.board.place_stone(pos, self.config.color.opponent());
        debug!("opponent played ({}, {})", pos.row, pos.col);
        Ok(pos)
    }

    /// Choose the engine's move and put it on the board.
    pub fn play_own_move(&mut self) -> Result<Pos, EngineError> {
        let result = self.select_move()?;
        self.board.place_stone(result.best_move, self.config.color);
        Ok(result.best_move)
    }

    /// Validate a requested opponent move against the engine's board.
    pub fn check_move(&self, row: i32, col: i32) -> Result<Pos, EngineError> {
        let pos = Pos::try_new(row, col).ok_or(EngineError::OutOfBounds { row, col })?;
        if self.board.is_empty(pos) {
            Ok(pos)
        } else {
            Err(EngineError::Occupied(pos))
        }
    }

    /// Decide the engine's move for the current position without playing it.
    pub fn select_move(&mut self) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let color = self.config.color;

        if self.board.is_full() {
            return Err(EngineError::BoardFull);
        }
        if self.board.is_board_empty() {
            return Ok(self.forced(Pos::center(), SearchType::Opening, Threat::NONE, Threat::NONE, start));
        }

        let ai = max_threat(&self.board, color);
        let opp = max_threat(&self.board, color.opponent());
        debug!(
            "threats: ai={} at {:?}, opponent={} at {:?}",
            ai.level, ai.pos, opp.level, opp.pos
        );

        if let Some((pos, search_type)) = forced_move(ai, opp) {
            let result = self.forced(pos, search_type, ai, opp, start);
            debug!("{:?} at ({}, {})", search_type, pos.row, pos.col);
            return Ok(result);
        }

        let result = self.searcher.search(&self.board, color, self.config.max_depth);
        let elapsed = elapsed_ms(start);
        let result = match result.best_move {
            Some(pos) => MoveResult::from_alphabeta(pos, &result, ai, opp, elapsed),
            None => {
                let pos = self.fallback_move()?;
                MoveResult {
                    best_move: pos,
                    score: result.score,
                    search_type: SearchType::Fallback,
                    ai_threat: ai.level,
                    opp_threat: opp.level,
                    time_ms: elapsed,
                    nodes: result.nodes,
                }
            }
        };
        debug!(
            "{:?} at ({}, {}) score={} nodes={} in {}ms",
            result.search_type, result.best_move.row, result.best_move.col, result.score, result.nodes, result.time_ms
        );
        Ok(result)
    }

    /// Center if free, else the first empty cell in row-major order.
    fn fallback_move(&self) -> Result<Pos, EngineError> {
        let center = Pos::center();
        if self.board.is_empty(center) {
            return Ok(center);
        }
        self.board.empty_cells().next().ok_or(EngineError::BoardFull)
    }

    fn forced(&mut self, pos: Pos, search_type: SearchType, ai: Threat, opp: Threat, start: Instant) -> MoveResult {
        let color = self.config.color;
        let score = evaluate(&self.board.place_scoped(pos, color), color);
        MoveResult {
            best_move: pos,
            score,
            search_type,
            ai_threat: ai.level,
            opp_threat: opp.level,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveResult {
    fn from_alphabeta(pos: Pos, result: &SearchResult, ai: Threat, opp: Threat, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            ai_threat: ai.level,
            opp_threat: opp.level,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Priority policy over both sides' strongest immediate threats.
///
/// Returns `None` when no tactic dominates and the position should be searched.
#[must_use]
pub fn forced_move(ai: Threat, opp: Threat) -> Option<(Pos, SearchType)> {
    let attack = |kind| ai.pos.map(|pos| (pos, kind));
    let defend = |kind| opp.pos.map(|pos| (pos, kind));

    if ai.level >= ThreatLevel::FIVE {
        attack(SearchType::ImmediateWin)
    } else if opp.level >= ThreatLevel::FIVE {
        defend(SearchType::BlockWin)
    } else if ai.level >= ThreatLevel::OPEN_FOUR && ai.level >= opp.level {
        attack(SearchType::Attack)
    } else if opp.level >= ThreatLevel::OPEN_FOUR {
        defend(SearchType::Defense)
    } else if ai.level >= ThreatLevel::OPEN_THREE && ai.level >= opp.level.saturating_add(10) {
        attack(SearchType::Attack)
    } else {
        None
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
