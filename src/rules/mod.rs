//! Game rules for freestyle Gomoku
//!
//! No captures and no forbidden moves: the first side with five or more
//! stones in a row wins.

pub mod win;

pub use win::{check_winner, find_five_positions, has_five_at_pos};
