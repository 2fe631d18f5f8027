use anyhow::Result;
use clap::Args;

use std::fmt;
use std::str::FromStr;

use crate::{
    agent::{Agent, RandomAgent},
    board::Board,
    error::ConfigError,
    search::AlphaBetaAgent,
    CONNECT, HEIGHT, WIDTH,
};

/// Board dimensions shared by every subcommand
#[derive(Args, Clone, Debug)]
pub struct BoardConfig {
    /// Number of columns (at most 9)
    #[arg(long, default_value_t = WIDTH)]
    pub width: usize,

    /// Number of rows
    #[arg(long, default_value_t = HEIGHT)]
    pub height: usize,

    /// Number of aligned tiles needed to win
    #[arg(long, default_value_t = CONNECT)]
    pub connect: usize,
}

impl BoardConfig {
    /// Builds a board after playing the given 1-indexed column digits
    pub fn board(&self, moves: &str) -> Result<Board> {
        Board::from_moves(self.width, self.height, self.connect, moves)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            connect: CONNECT,
        }
    }
}

/// Who controls a player
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerSpec {
    Human,
    Random,
    AlphaBeta(usize),
}

impl PlayerSpec {
    /// Creates an automated agent for this spec
    ///
    /// `seed` makes random agents reproducible.
    pub fn build(
        &self,
        name: &str,
        seed: Option<u64>,
    ) -> Result<Box<dyn Agent + Send>, ConfigError> {
        match *self {
            PlayerSpec::Human => Err(ConfigError::HumanInArena),
            PlayerSpec::Random => {
                let agent = match seed {
                    Some(seed) => RandomAgent::with_seed(name, seed),
                    None => RandomAgent::new(name),
                };
                Ok(Box::new(agent))
            }
            PlayerSpec::AlphaBeta(depth) => {
                let agent = AlphaBetaAgent::new(name, depth)
                    .map_err(|_| ConfigError::InvalidDepth(depth.to_string()))?;
                Ok(Box::new(agent))
            }
        }
    }
}

impl FromStr for PlayerSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.split_once(':') {
            None if s == "human" => Ok(PlayerSpec::Human),
            None if s == "random" => Ok(PlayerSpec::Random),
            Some(("alphabeta", depth)) => match depth.parse::<usize>() {
                Ok(depth) if depth > 0 => Ok(PlayerSpec::AlphaBeta(depth)),
                _ => Err(ConfigError::InvalidDepth(depth.to_string())),
            },
            _ => Err(ConfigError::UnknownPlayer(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSpec::Human => write!(f, "human"),
            PlayerSpec::Random => write!(f, "random"),
            PlayerSpec::AlphaBeta(depth) => write!(f, "alphabeta:{}", depth),
        }
    }
}
