//! Plays many independent games between two agent specs

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use std::fmt;

use crate::{
    board::Player,
    config::{BoardConfig, PlayerSpec},
    error::ConfigError,
    game::Game,
};

/// Results of an arena, counted per spec rather than per seat
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Games decided by an illegal move
    pub forfeits: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} draws, {} forfeits)",
            self.first_wins, self.second_wins, self.draws, self.forfeits
        )
    }
}

// which spec won a single game
enum Verdict {
    First,
    Second,
    Draw,
}

/// Plays `games` games between `first` and `second`, swapping who moves
/// first after every game
///
/// Games run in parallel; each game is searched on a single thread. `seed`
/// makes random agents reproducible.
pub fn run(
    board: &BoardConfig,
    first: PlayerSpec,
    second: PlayerSpec,
    games: usize,
    seed: u64,
) -> Result<Tally> {
    if first == PlayerSpec::Human || second == PlayerSpec::Human {
        return Err(ConfigError::HumanInArena.into());
    }

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results = (0..games)
        .into_par_iter()
        .map(|i| -> Result<(Verdict, bool)> {
            let first_starts = i % 2 == 0;
            let game_seed = seed.wrapping_add(2 * i as u64);
            let mut a = first.build(&format!("{} (a)", first), Some(game_seed))?;
            let mut b = second.build(
                &format!("{} (b)", second),
                Some(game_seed.wrapping_add(1)),
            )?;

            let game = if first_starts {
                Game::new(board.board("")?, &mut *a, &mut *b)
            } else {
                Game::new(board.board("")?, &mut *b, &mut *a)
            };
            let record = game.play()?;
            progress.inc(1);

            let first_seat = if first_starts { Player::One } else { Player::Two };
            let verdict = match record.winner() {
                Some(winner) if winner == first_seat => Verdict::First,
                Some(_) => Verdict::Second,
                None => Verdict::Draw,
            };
            Ok((verdict, record.forfeit.is_some()))
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();

    let mut tally = Tally::default();
    for (verdict, forfeit) in results {
        match verdict {
            Verdict::First => tally.first_wins += 1,
            Verdict::Second => tally.second_wins += 1,
            Verdict::Draw => tally.draws += 1,
        }
        if forfeit {
            tally.forfeits += 1;
        }
    }
    info!("{} vs {}: {}", first, second, tally);
    Ok(tally)
}
