use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use std::io::{stdin, stdout, Write};

use connect4_alphabeta::{
    agent::Agent,
    arena,
    board::{Board, GameState, Player},
    config::{BoardConfig, PlayerSpec},
    game::Game,
    logging::init_logger,
    search::AlphaBetaAgent,
};

#[derive(Parser)]
#[command(name = "connect4", about = "Play or analyse Connect 4 with an alpha-beta agent")]
struct Cli {
    /// Log specification, e.g. 'info' or 'connect4_alphabeta=debug'
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a game in the terminal
    Play {
        /// Controller of player 1: human, random or alphabeta:<depth>
        #[arg(long, default_value = "human")]
        one: PlayerSpec,

        /// Controller of player 2: human, random or alphabeta:<depth>
        #[arg(long, default_value = "alphabeta:5")]
        two: PlayerSpec,

        /// Moves already played, as 1-indexed column digits
        #[arg(long, default_value = "")]
        moves: String,

        #[command(flatten)]
        board: BoardConfig,
    },
    /// Print the best move of a position
    Analyse {
        /// Search depth in plies
        #[arg(long, default_value_t = 5)]
        depth: usize,

        /// Moves already played, as 1-indexed column digits
        #[arg(long, default_value = "")]
        moves: String,

        #[command(flatten)]
        board: BoardConfig,
    },
    /// Play many games between two automated players
    Arena {
        #[arg(long)]
        one: PlayerSpec,

        #[arg(long)]
        two: PlayerSpec,

        #[arg(long, default_value_t = 100)]
        games: usize,

        /// Seed for random players
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[command(flatten)]
        board: BoardConfig,
    },
}

/// Reads moves from the terminal
struct HumanAgent {
    name: String,
}

impl Agent for HumanAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let stdin = stdin();
        loop {
            print!("Move input > ");
            stdout().flush()?;
            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                return Err(anyhow!("input closed"));
            }

            match input_str.trim().parse::<usize>() {
                Ok(column) if column >= 1 && board.playable(column - 1) => {
                    return Ok(column - 1)
                }
                Ok(column) => {
                    println!("Invalid move, column {} is full or out of range", column)
                }
                Err(_) => println!("Invalid number: {}", input_str.trim()),
            }
        }
    }
}

fn build_agent(spec: PlayerSpec, name: &str) -> Result<Box<dyn Agent>> {
    match spec {
        PlayerSpec::Human => Ok(Box::new(HumanAgent {
            name: name.to_string(),
        })),
        _ => {
            let agent: Box<dyn Agent> = spec.build(name, None)?;
            Ok(agent)
        }
    }
}

fn play(one: PlayerSpec, two: PlayerSpec, board: Board) -> Result<()> {
    println!("Welcome to Connect {}\n", board.connect());

    let mut agent_one = build_agent(one, "Player 1")?;
    let mut agent_two = build_agent(two, "Player 2")?;
    let both_ai = one != PlayerSpec::Human && two != PlayerSpec::Human;

    let mut game = Game::new(board, &mut *agent_one, &mut *agent_two);

    // game loop
    loop {
        game.board().display()?;

        match game.board().state() {
            GameState::Playing => {
                let player = game.board().player();
                let spec = match player {
                    Player::One => one,
                    Player::Two => two,
                };
                if spec != PlayerSpec::Human {
                    println!("{} ({}) is thinking...", player, spec);
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if both_ai {
                        std::thread::sleep(std::time::Duration::from_secs(1));
                    }
                }

                if game.step()?.is_some() {
                    println!("{} played an illegal move and forfeits!", player);
                    break;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

fn analyse(depth: usize, board: Board) -> Result<()> {
    board.display()?;

    let agent = AlphaBetaAgent::new("analysis", depth)?;
    let result = agent.search(&board)?;

    println!(
        "{} to move, searched {} positions at depth {}",
        board.player(),
        result.node_count,
        depth
    );
    println!("Best move: {}, score: {}", result.column + 1, result.value);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logger(&cli.log)?;

    match cli.cmd {
        Cmd::Play {
            one,
            two,
            moves,
            board,
        } => play(one, two, board.board(&moves)?),
        Cmd::Analyse {
            depth,
            moves,
            board,
        } => analyse(depth, board.board(&moves)?),
        Cmd::Arena {
            one,
            two,
            games,
            seed,
            board,
        } => {
            let tally = arena::run(&board, one, two, games, seed)?;
            println!("{} vs {} over {} games: {}", one, two, tally.games(), tally);
            Ok(())
        }
    }
}
