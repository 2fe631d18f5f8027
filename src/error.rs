use crate::board::GameState;

/// Errors reported by the alpha-beta search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves, the board has no free columns")]
    NoLegalMoves,

    #[error("the game is already over ({0:?})")]
    GameOver(GameState),

    #[error("invalid search depth {0}, must be at least 1")]
    InvalidDepth(usize),
}

/// Errors that can occur when reading player or board configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown player '{0}', expected 'human', 'random' or 'alphabeta:<depth>'")]
    UnknownPlayer(String),

    #[error("invalid search depth '{0}'")]
    InvalidDepth(String),

    #[error("human players cannot take part in an arena")]
    HumanInArena,
}
