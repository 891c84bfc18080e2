//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions:
//! - [`line`]: fixed-width symbolic windows along the four axes
//! - [`patterns`]: shape tables with evaluation weights and threat levels
//! - [`heuristic`]: whole-board static evaluation

pub mod heuristic;
pub mod line;
pub mod patterns;

pub use heuristic::{evaluate, is_decided};
pub use line::{Line, Symbol, HALF_WIDTH};
pub use patterns::{PatternScore, Score, Shape, ThreatLevel, EVAL_PATTERNS, THREAT_PATTERNS};
