//! Plays a game between two agents

use anyhow::Result;
use log::{debug, warn};

use crate::{
    agent::Agent,
    board::{Board, GameState, Player},
};

/// The result of a finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub board: Board,
    pub state: GameState,
    /// The player who lost by playing an illegal move, if any
    pub forfeit: Option<Player>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.forfeit {
            Some(player) => Some(player.other()),
            None => self.state.winner(),
        }
    }
}

pub struct Game<'a> {
    board: Board,
    agents: [&'a mut dyn Agent; 2],
}

impl<'a> Game<'a> {
    /// Creates a game continuing from `board`, with `one` playing as player 1
    pub fn new(board: Board, one: &'a mut dyn Agent, two: &'a mut dyn Agent) -> Self {
        Self {
            board,
            agents: [one, two],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays a single move for the player whose turn it is
    ///
    /// Returns the player forfeiting the game if their agent picked an
    /// illegal column.
    pub fn step(&mut self) -> Result<Option<Player>> {
        let player = self.board.player();
        let agent = match player {
            Player::One => &mut *self.agents[0],
            Player::Two => &mut *self.agents[1],
        };

        let column = agent.select_move(&self.board)?;
        if !self.board.playable(column) {
            warn!(
                "{} ({}) played illegal column {}, forfeiting",
                agent.name(),
                player,
                column + 1
            );
            return Ok(Some(player));
        }
        debug!("{} ({}) plays column {}", agent.name(), player, column + 1);
        self.board.play(column);
        Ok(None)
    }

    /// Plays until the game is over
    pub fn play(mut self) -> Result<GameRecord> {
        while !self.board.state().is_over() {
            if let Some(player) = self.step()? {
                return Ok(GameRecord {
                    state: self.board.state(),
                    board: self.board,
                    forfeit: Some(player),
                });
            }
        }
        debug!("Game over: {:?} after {} moves", self.board.state(), self.board.num_moves());
        Ok(GameRecord {
            state: self.board.state(),
            board: self.board,
            forfeit: None,
        })
    }
}
