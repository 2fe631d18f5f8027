use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{CONNECT, HEIGHT, WIDTH};

/// Line directions checked for alignments: horizontal, vertical and both diagonals
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// The shortest run of tiles that counts as a line in progress
const MIN_RUN: usize = 2;

/// The tallest board that still fits a typical terminal
pub const MAX_HEIGHT: usize = 16;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opponent of this player
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell this player's tiles occupy
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }

    fn win_for(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

/// A gravity board of `width` columns and `height` rows, won by aligning
/// `connect` tiles
///
/// Cloning a `Board` produces an independent deep copy.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    width: usize,
    height: usize,
    connect: usize,
    player: Player,
    /// The moves played so far as 1-indexed column digits
    pub game: String,
    num_moves: usize,
    state: GameState,
}

impl Board {
    pub fn new(width: usize, height: usize, connect: usize) -> Result<Self> {
        if width < 1 || width > 9 {
            return Err(anyhow!(
                "Invalid board width {}, must be between 1 and 9",
                width
            ));
        }
        if height < 1 || height > MAX_HEIGHT {
            return Err(anyhow!(
                "Invalid board height {}, must be between 1 and {}",
                height,
                MAX_HEIGHT
            ));
        }
        if connect < 2 {
            return Err(anyhow!(
                "Invalid line length {}, must be at least 2",
                connect
            ));
        }
        Ok(Self::empty(width, height, connect))
    }

    /// An empty board of the standard 7x6 'Connect 4' dimensions
    pub fn standard() -> Self {
        Self::empty(WIDTH, HEIGHT, CONNECT)
    }

    // dimensions must already be valid
    fn empty(width: usize, height: usize, connect: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            width,
            height,
            connect,
            player: Player::One,
            game: String::new(),
            num_moves: 0,
            state: GameState::Playing,
        }
    }

    /// Creates a board by playing a string of 1-indexed column digits
    pub fn from_moves<S: AsRef<str>>(
        width: usize,
        height: usize,
        connect: usize,
        moves: S,
    ) -> Result<Self> {
        let mut board = Self::new(width, height, connect)?;
        board.play_moves(moves)?;
        Ok(board)
    }

    /// Plays a string of 1-indexed column digits on this board
    pub fn play_moves<S: AsRef<str>>(&mut self, moves: S) -> Result<()> {
        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = self.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn connect(&self) -> usize {
        self.connect
    }

    /// The player whose turn it is
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[x + self.width * y]
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.width && self.heights[column] < self.height
    }

    /// The columns that can still accept a tile, in ascending order
    pub fn free_cols(&self) -> Vec<usize> {
        (0..self.width).filter(|&c| self.playable(c)).collect()
    }

    /// Drops a tile in a 1-indexed column after checking the move is legal
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if column_one_indexed < 1 || column_one_indexed > self.width {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.width
            ));
        }
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, game is over"));
        }
        let column = column_one_indexed - 1;
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.play(column);
        Ok(self.state)
    }

    /// Drops a tile for the current player in a 0-indexed column and passes
    /// the turn. The column must be playable.
    pub fn play(&mut self, column: usize) {
        debug_assert!(self.playable(column));

        if self.check_winning_move(column) {
            self.state = GameState::win_for(self.player);
        } else if self.num_moves + 1 == self.width * self.height {
            self.state = GameState::Draw;
        }

        let row = self.heights[column];
        self.cells[column + self.width * row] = self.player.cell();
        self.heights[column] += 1;
        self.num_moves += 1;
        self.game.push_str(&(column + 1).to_string());
        self.player = self.player.other();
    }

    /// Whether the cell at (x, y) is occupied and part of at least one
    /// aligned run of same-owner tiles
    pub fn is_any_line_at(&self, x: usize, y: usize) -> bool {
        let cell = self.cell(x, y);
        if cell.is_empty() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.run_length(x, y, dx, dy, cell) >= MIN_RUN)
    }

    // would the current player complete a line by playing this column?
    fn check_winning_move(&self, column: usize) -> bool {
        let cell = self.player.cell();
        let row = self.heights[column];
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.run_length(column, row, dx, dy, cell) >= self.connect)
    }

    // length of the run of `cell` through (x, y) along a direction,
    // counting (x, y) itself whatever it holds
    fn run_length(&self, x: usize, y: usize, dx: i32, dy: i32, cell: Cell) -> usize {
        1 + self.count_from(x, y, dx, dy, cell) + self.count_from(x, y, -dx, -dy, cell)
    }

    fn count_from(&self, x: usize, y: usize, dx: i32, dy: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut x = x as i32 + dx;
        let mut y = y as i32 + dy;
        while x >= 0
            && x < self.width as i32
            && y >= 0
            && y < self.height as i32
            && self.cells[x as usize + self.width * y as usize] == cell
        {
            count += 1;
            x += dx;
            y += dy;
        }
        count
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.width).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.height {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let pos_x = origin_x + (idx % self.width) as u16;
            let pos_y = origin_y
                .checked_sub((idx / self.width) as u16)
                .ok_or_else(|| anyhow!("Terminal too small to draw {} rows", self.height))?;

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x + self.width as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = match self.cell(x, y) {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
