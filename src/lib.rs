//! A depth-limited alpha-beta agent for playing 'Connect 4' and its
//! 'Connect N' variants
//!
//! The agent explores the game tree to a fixed depth and scores the
//! positions it reaches with a simple defensive heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_alphabeta::{agent::Agent, board::Board, search::AlphaBetaAgent};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one threatens to complete the bottom row in column 4
//! let board = Board::from_moves(7, 6, 4, "112233")?;
//! let mut agent = AlphaBetaAgent::new("alpha-beta", 2)?;
//!
//! assert_eq!(agent.select_move(&board)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod search;

pub mod agent;

pub mod game;

pub mod arena;

pub mod config;

pub mod logging;

mod test;

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The default number of aligned tiles needed to win
pub const CONNECT: usize = 4;

// moves are written as single 1-indexed digits
const_assert!(WIDTH <= 9);
// the default board must fit in the terminal
const_assert!(HEIGHT <= board::MAX_HEIGHT);
// the default board must be able to hold a winning line
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
