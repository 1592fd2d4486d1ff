//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! The agent searches the game tree to a fixed depth using alpha-beta
//! pruning, center-first move ordering and an immediate-win shortcut, and
//! falls back to a positional heuristic when no forced outcome is found
//! within the search horizon.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Board, Player}, config::SearchConfig, solver::{BestMove, Solver}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! let mut solver = Solver::new(SearchConfig::default().with_depth(2));
//! let result = solver.best_move(&mut board, Player::Two);
//!
//! assert_eq!(result.best_move, BestMove::Column(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod heuristic;

pub mod config;

pub mod solver;

pub mod game;

pub mod benchmark;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles in a line needed to win
pub const CONNECT: usize = 4;

// the center weights reach two columns either side of the middle column,
// and a winning line must fit on the board both ways
const_assert!(WIDTH >= 5 && WIDTH % 2 == 1);
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
