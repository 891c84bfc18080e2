//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation restricted to the stones' neighborhood
//! - Immediate threat detection for forced replies
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod candidates;
pub mod threat;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use candidates::candidates;
pub use threat::{max_threat, threat_at, Threat};
