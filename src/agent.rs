use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::board::Board;

/// A strategy that chooses moves
pub trait Agent {
    fn name(&self) -> &str;

    /// Picks a 0-indexed column to play on `board`
    ///
    /// An agent that returns a full or out-of-range column forfeits the game.
    fn select_move(&mut self, board: &Board) -> Result<usize>;
}

/// An agent that plays a uniformly random free column
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a `RandomAgent` that always plays the same sequence of choices
    pub fn with_seed<S: Into<String>>(name: S, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&mut self, board: &Board) -> Result<usize> {
        board
            .free_cols()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no legal moves, the board has no free columns"))
    }
}
