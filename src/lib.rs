//! Gomoku AI Engine
//!
//! An engine for freestyle Gomoku:
//! - Standard 19x19 board
//! - 5-in-a-row to win (overlines allowed)
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection
//! - [`eval`]: Line extraction, shape tables and static evaluation
//! - [`search`]: Candidate generation, threat detection, alpha-beta search
//! - [`engine`]: Move selection policy integrating all components
//! - [`protocol`]: Line-based text protocol for driving the engine
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Pos, Stone};
//!
//! let mut engine = AIEngine::with_config(EngineConfig {
//!     max_depth: 2,
//!     ..EngineConfig::default()
//! });
//!
//! // Black opens at the center, the engine answers as White
//! let reply = engine.take_turn(9, 9).unwrap();
//! println!("AI plays at ({}, {})", reply.row, reply.col);
//! assert_eq!(engine.board().get(Pos::new(9, 9)), Stone::Black);
//! ```
//!
//! # Move Priority
//!
//! 1. Complete our own five
//! 2. Block the opponent's five
//! 3. Make an open four when the opponent has nothing stronger
//! 4. Block the opponent's open four point
//! 5. Extend a clearly stronger open three
//! 6. Alpha-Beta search over the neighborhood of existing stones

pub mod board;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use engine::{AIEngine, EngineConfig, EngineError, MoveResult, SearchType};
