//! A depth-limited alpha-beta agent

use anyhow::Result;
use log::debug;

use crate::{
    agent::Agent,
    board::{Board, Player},
    error::SearchError,
};

/// Score of a line tile owned by the searching player
pub const OWN_LINE_SCORE: f64 = 1.0;
/// Score of a line tile owned by the opponent
pub const OPPONENT_LINE_SCORE: f64 = -10.0;

/// The outcome of a top-level search
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The chosen 0-indexed column
    pub column: usize,
    /// The board reached by playing `column`
    pub board: Board,
    /// The minimax value of `column` for the player to move
    pub value: f64,
    /// The number of nodes searched (for diagnostics only)
    pub node_count: usize,
}

/// An agent that picks moves with alpha-beta pruned minimax search
///
/// # Notes
/// The game tree is rebuilt from scratch on every call, down to `max_depth`
/// plies. Leaves are scored by [`evaluate`] from the point of view of the
/// player to move at the root. Columns are searched in ascending order and
/// ties keep the lowest column, so the chosen move is deterministic.
#[derive(Clone, Debug)]
pub struct AlphaBetaAgent {
    name: String,
    max_depth: usize,
}

impl AlphaBetaAgent {
    /// Creates a new `AlphaBetaAgent` searching `max_depth` plies ahead
    pub fn new<S: Into<String>>(name: S, max_depth: usize) -> Result<Self, SearchError> {
        if max_depth == 0 {
            return Err(SearchError::InvalidDepth(max_depth));
        }
        Ok(Self {
            name: name.into(),
            max_depth,
        })
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Searches the position and returns the best move found with its value
    pub fn search(&self, board: &Board) -> Result<SearchResult, SearchError> {
        if board.free_cols().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if board.state().is_over() {
            return Err(SearchError::GameOver(board.state()));
        }

        let me = board.player();
        let mut search = Search { me, node_count: 0 };
        let branch = search.max_value(board, self.max_depth, f64::NEG_INFINITY, f64::INFINITY);

        let (board, column) = branch.successor.ok_or(SearchError::NoLegalMoves)?;
        debug!(
            "{}: column {} scores {} for {} ({} nodes, depth {})",
            self.name,
            column + 1,
            branch.value,
            me,
            search.node_count,
            self.max_depth
        );
        Ok(SearchResult {
            column,
            board,
            value: branch.value,
            node_count: search.node_count,
        })
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&mut self, board: &Board) -> Result<usize> {
        Ok(self.search(board)?.column)
    }
}

/// A successor board with the column played to reach it, and its value
struct Branch {
    successor: Option<(Board, usize)>,
    value: f64,
}

impl Branch {
    fn leaf(value: f64) -> Self {
        Self {
            successor: None,
            value,
        }
    }
}

/// Per-call search state; the searching player is fixed when the search starts
struct Search {
    me: Player,
    node_count: usize,
}

impl Search {
    fn max_value(&mut self, board: &Board, depth: usize, mut alpha: f64, beta: f64) -> Branch {
        self.node_count += 1;

        if depth == 0 || board.state().is_over() {
            return Branch::leaf(self.heuristic(board));
        }

        let mut best = Branch::leaf(f64::NEG_INFINITY);
        for (next, column) in successors(board) {
            let value = self.min_value(&next, depth - 1, alpha, beta).value;
            if best.successor.is_none() || value > best.value {
                best = Branch {
                    successor: Some((next, column)),
                    value,
                };
            }
            // the minimizer already has a better option elsewhere
            if best.value >= beta {
                return best;
            }
            alpha = alpha.max(best.value);
        }
        best
    }

    fn min_value(&mut self, board: &Board, depth: usize, alpha: f64, mut beta: f64) -> Branch {
        self.node_count += 1;

        if depth == 0 || board.state().is_over() {
            return Branch::leaf(self.heuristic(board));
        }

        let mut best = Branch::leaf(f64::INFINITY);
        for (next, column) in successors(board) {
            let value = self.max_value(&next, depth - 1, alpha, beta).value;
            if best.successor.is_none() || value < best.value {
                best = Branch {
                    successor: Some((next, column)),
                    value,
                };
            }
            // the maximizer already has a better option elsewhere
            if best.value <= alpha {
                return best;
            }
            beta = beta.min(best.value);
        }
        best
    }

    fn heuristic(&self, board: &Board) -> f64 {
        evaluate(board, self.me)
    }
}

/// Returns every board reachable in one move, paired with the 0-indexed
/// column played, in ascending column order
pub fn successors(board: &Board) -> Vec<(Board, usize)> {
    board
        .free_cols()
        .into_iter()
        .map(|column| {
            let mut next = board.clone();
            // this also passes the turn
            next.play(column);
            (next, column)
        })
        .collect()
}

/// Scores a board for `me`, higher is better
///
/// A win for `me` is worth +∞ and a win for the opponent −∞. Otherwise every
/// tile that is part of at least one aligned run scores
/// [`OWN_LINE_SCORE`] for `me` or [`OPPONENT_LINE_SCORE`] for the opponent,
/// making the agent play defensively. Drawn boards are scored the same way.
pub fn evaluate(board: &Board, me: Player) -> f64 {
    let you = me.other();
    match board.state().winner() {
        Some(winner) if winner == me => return f64::INFINITY,
        Some(winner) if winner == you => return f64::NEG_INFINITY,
        _ => {}
    }

    let mut value = 0.0;
    for x in 0..board.width() {
        for y in 0..board.height() {
            match board.cell(x, y).owner() {
                Some(owner) if owner == you && board.is_any_line_at(x, y) => {
                    value += OPPONENT_LINE_SCORE
                }
                Some(owner) if owner == me && board.is_any_line_at(x, y) => {
                    value += OWN_LINE_SCORE
                }
                _ => {}
            }
        }
    }
    value
}
