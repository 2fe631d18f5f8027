#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::agent::{Agent, RandomAgent};
    use crate::arena;
    use crate::board::{Board, Cell, GameState, Player, MAX_HEIGHT};
    use crate::config::{BoardConfig, PlayerSpec};
    use crate::error::SearchError;
    use crate::game::Game;
    use crate::search::{evaluate, successors, AlphaBetaAgent};
    use crate::{HEIGHT, WIDTH};

    fn standard(moves: &str) -> Result<Board> {
        Board::from_moves(WIDTH, HEIGHT, 4, moves)
    }

    // plain minimax without pruning, returning the value, the first best
    // column and the number of nodes visited
    fn minimax(board: &Board, depth: usize, me: Player) -> (f64, Option<usize>, usize) {
        if depth == 0 || board.state().is_over() {
            return (evaluate(board, me), None, 1);
        }
        let maximizing = board.player() == me;
        let mut best: Option<(f64, usize)> = None;
        let mut nodes = 1;
        for (next, column) in successors(board) {
            let (value, _, n) = minimax(&next, depth - 1, me);
            nodes += n;
            let better = match best {
                None => true,
                Some((best_value, _)) if maximizing => value > best_value,
                Some((best_value, _)) => value < best_value,
            };
            if better {
                best = Some((value, column));
            }
        }
        match best {
            Some((value, column)) => (value, Some(column), nodes),
            None => (evaluate(board, me), None, nodes),
        }
    }

    /// Always plays the same column, legal or not
    struct ColumnAgent(usize);

    impl Agent for ColumnAgent {
        fn name(&self) -> &str {
            "column"
        }

        fn select_move(&mut self, _board: &Board) -> Result<usize> {
            Ok(self.0)
        }
    }

    #[test]
    pub fn horizontal_and_vertical_wins() -> Result<()> {
        let board = standard("1122334")?;
        assert_eq!(board.state(), GameState::PlayerOneWin);

        let board = standard("1212121")?;
        assert_eq!(board.state(), GameState::PlayerOneWin);

        let board = standard("12321232")?;
        assert_eq!(board.state(), GameState::PlayerTwoWin);
        Ok(())
    }

    #[test]
    pub fn diagonal_wins() -> Result<()> {
        let mut board = standard("1223343454")?;
        assert_eq!(board.state(), GameState::Playing);
        board.play_checked(4)?;
        assert_eq!(board.state(), GameState::PlayerOneWin);

        // mirror image
        let board = standard("76655454344")?;
        assert_eq!(board.state(), GameState::PlayerOneWin);
        Ok(())
    }

    #[test]
    pub fn draw_on_full_board() -> Result<()> {
        let board = Board::from_moves(2, 2, 3, "1122")?;
        assert_eq!(board.state(), GameState::Draw);
        assert!(board.free_cols().is_empty());
        Ok(())
    }

    #[test]
    pub fn illegal_moves() -> Result<()> {
        let mut board = standard("111111")?;
        assert!(board.play_checked(0).is_err());
        assert!(board.play_checked(WIDTH + 1).is_err());
        // column 1 is full
        assert!(board.play_checked(1).is_err());
        assert_eq!(board.free_cols(), vec![1, 2, 3, 4, 5, 6]);

        let mut won = standard("1122334")?;
        assert!(won.play_checked(5).is_err());

        assert!(standard("12a").is_err());
        assert!(Board::new(0, 6, 4).is_err());
        assert!(Board::new(10, 6, 4).is_err());
        assert!(Board::new(7, 6, 1).is_err());
        Ok(())
    }

    #[test]
    pub fn board_height_limit() -> Result<()> {
        assert!(Board::new(7, MAX_HEIGHT + 1, 4).is_err());
        assert!(Board::new(7, 0, 4).is_err());

        let tallest = Board::new(7, MAX_HEIGHT, 4)?;
        assert_eq!(tallest.height(), MAX_HEIGHT);

        let standard = Board::standard();
        assert_eq!((standard.width(), standard.height(), standard.connect()), (WIDTH, HEIGHT, 4));
        assert_eq!(standard.state(), GameState::Playing);
        Ok(())
    }

    #[test]
    pub fn turns_alternate() -> Result<()> {
        let mut board = Board::standard();
        assert_eq!(board.player(), Player::One);
        board.play_checked(4)?;
        assert_eq!(board.player(), Player::Two);
        assert_eq!(board.cell(3, 0), Cell::PlayerOne);
        board.play_checked(4)?;
        assert_eq!(board.player(), Player::One);
        assert_eq!(board.cell(3, 1), Cell::PlayerTwo);
        assert_eq!(board.game, "44");
        assert_eq!(board.num_moves(), 2);
        Ok(())
    }

    #[test]
    pub fn line_membership() -> Result<()> {
        let board = standard("1122")?;
        assert!(board.is_any_line_at(0, 0));
        assert!(board.is_any_line_at(1, 1));
        assert!(!board.is_any_line_at(2, 0));

        let board = standard("13")?;
        assert!(!board.is_any_line_at(0, 0));
        assert!(!board.is_any_line_at(2, 0));

        // diagonal pair
        let board = standard("122")?;
        assert!(board.is_any_line_at(0, 0));
        assert!(board.is_any_line_at(1, 1));
        assert!(!board.is_any_line_at(1, 0));
        Ok(())
    }

    #[test]
    pub fn successor_boards() -> Result<()> {
        let board = Board::standard();
        let next = successors(&board);

        assert_eq!(next.len(), WIDTH);
        for (i, (successor, column)) in next.iter().enumerate() {
            assert_eq!(*column, i);
            assert_eq!(successor.player(), Player::Two);
            assert_eq!(successor.cell(i, 0), Cell::PlayerOne);
            assert_eq!(successor.num_moves(), 1);
        }
        // the original is untouched
        assert_eq!(board.num_moves(), 0);

        let board = standard("111111")?;
        let columns: Vec<usize> = successors(&board).into_iter().map(|(_, c)| c).collect();
        assert_eq!(columns, vec![1, 2, 3, 4, 5, 6]);

        let full = Board::from_moves(2, 2, 3, "1122")?;
        assert!(successors(&full).is_empty());
        Ok(())
    }

    #[test]
    pub fn evaluation_ratio() -> Result<()> {
        // two line tiles each
        let board = standard("1122")?;
        assert_eq!(evaluate(&board, Player::One), 2.0 - 20.0);
        assert_eq!(evaluate(&board, Player::Two), 2.0 - 20.0);

        // three line tiles for player 1, two for player 2
        let board = standard("12131")?;
        assert_eq!(evaluate(&board, Player::Two), 2.0 - 30.0);
        assert_eq!(evaluate(&board, Player::One), 3.0 - 20.0);

        // isolated tiles score nothing
        let board = standard("17")?;
        assert_eq!(evaluate(&board, Player::One), 0.0);
        Ok(())
    }

    #[test]
    pub fn evaluation_of_finished_games() -> Result<()> {
        let won = standard("1122334")?;
        assert_eq!(evaluate(&won, Player::One), f64::INFINITY);
        assert_eq!(evaluate(&won, Player::Two), f64::NEG_INFINITY);

        // draws fall through to the line count
        let drawn = Board::from_moves(2, 2, 3, "1122")?;
        let value = evaluate(&drawn, Player::One);
        assert!(value.is_finite());
        assert_eq!(value, 2.0 - 20.0);
        Ok(())
    }

    #[test]
    pub fn immediate_win() -> Result<()> {
        let board = standard("112233")?;
        for depth in 1..=4 {
            let result = AlphaBetaAgent::new("ab", depth)?.search(&board)?;
            assert_eq!(result.value, f64::INFINITY);
            assert!(board.playable(result.column));
            if depth <= 3 {
                assert_eq!(result.column, 3);
                assert_eq!(result.board.state(), GameState::PlayerOneWin);
            }
        }
        Ok(())
    }

    #[test]
    pub fn immediate_block() -> Result<()> {
        // player 2 threatens the bottom row in column 4
        let board = standard("717263")?;
        for depth in 2..=4 {
            let mut agent = AlphaBetaAgent::new("ab", depth)?;
            assert_eq!(agent.select_move(&board)?, 3);
        }
        Ok(())
    }

    #[test]
    pub fn lowest_column_wins_ties() -> Result<()> {
        let result = AlphaBetaAgent::new("ab", 1)?.search(&Board::standard())?;
        assert_eq!(result.column, 0);
        assert_eq!(result.value, 0.0);
        Ok(())
    }

    #[test]
    pub fn depth_one_scores_leaves_directly() -> Result<()> {
        for moves in ["", "1122", "12131", "4453"].iter() {
            let board = standard(moves)?;
            let me = board.player();
            let result = AlphaBetaAgent::new("ab", 1)?.search(&board)?;

            let best = successors(&board)
                .iter()
                .map(|(next, _)| evaluate(next, me))
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(result.value, best);
            assert_eq!(result.value, evaluate(&result.board, me));
        }
        Ok(())
    }

    #[test]
    pub fn search_is_deterministic() -> Result<()> {
        let board = standard("4453")?;
        let agent = AlphaBetaAgent::new("ab", 4)?;
        let first = agent.search(&board)?;
        let second = agent.search(&board)?;
        assert_eq!(first.column, second.column);
        assert_eq!(first.value, second.value);
        assert_eq!(first.node_count, second.node_count);
        Ok(())
    }

    #[test]
    pub fn chosen_moves_are_legal() -> Result<()> {
        // column 1 is full
        let board = standard("111111")?;
        for depth in 1..=4 {
            let column = AlphaBetaAgent::new("ab", depth)?.select_move(&board)?;
            assert_ne!(column, 0);
            assert!(board.free_cols().contains(&column));
        }
        Ok(())
    }

    #[test]
    pub fn search_preconditions() -> Result<()> {
        let agent = AlphaBetaAgent::new("ab", 3)?;

        let full = Board::from_moves(2, 2, 3, "1122")?;
        assert_eq!(agent.search(&full).unwrap_err(), SearchError::NoLegalMoves);

        let won = standard("1122334")?;
        assert_eq!(
            agent.search(&won).unwrap_err(),
            SearchError::GameOver(GameState::PlayerOneWin)
        );

        assert_eq!(
            AlphaBetaAgent::new("ab", 0).unwrap_err(),
            SearchError::InvalidDepth(0)
        );
        Ok(())
    }

    #[test]
    pub fn pruning_matches_minimax() -> Result<()> {
        let positions = ["", "4", "44", "4453", "112233", "717263", "12131", "334455", "111111"];
        for moves in positions.iter() {
            let board = standard(moves)?;
            for depth in 1..=4 {
                let result = AlphaBetaAgent::new("ab", depth)?.search(&board)?;
                let (value, column, nodes) = minimax(&board, depth, board.player());
                assert_eq!(result.value, value, "value of '{}' at depth {}", moves, depth);
                assert_eq!(Some(result.column), column, "move of '{}' at depth {}", moves, depth);
                assert!(result.node_count <= nodes);
            }
        }

        // deeper searches on a small board
        for moves in ["", "2", "1223", "3212"].iter() {
            let board = Board::from_moves(4, 4, 3, moves)?;
            for depth in 1..=6 {
                let result = AlphaBetaAgent::new("ab", depth)?.search(&board)?;
                let (value, column, _) = minimax(&board, depth, board.player());
                assert_eq!(result.value, value, "value of '{}' at depth {}", moves, depth);
                assert_eq!(Some(result.column), column, "move of '{}' at depth {}", moves, depth);
            }
        }
        Ok(())
    }

    #[test]
    pub fn drawn_positions_inside_the_tree() -> Result<()> {
        // player 2 threatens column 2; blocking it forces a full-board draw
        let board = Board::from_moves(3, 3, 3, "123211")?;
        for depth in 3..=6 {
            let result = AlphaBetaAgent::new("ab", depth)?.search(&board)?;
            let (value, column, _) = minimax(&board, depth, board.player());
            assert!(result.value.is_finite());
            assert_eq!(result.value, 4.0 - 40.0);
            assert_eq!(result.column, 1);
            assert_eq!(result.value, value);
            assert_eq!(Some(result.column), column);
        }

        // full games on a tiny board, where many lines end in draws
        let board = Board::from_moves(3, 3, 3, "")?;
        for depth in 1..=9 {
            let result = AlphaBetaAgent::new("ab", depth)?.search(&board)?;
            let (value, column, _) = minimax(&board, depth, board.player());
            assert_eq!(result.value, value, "value at depth {}", depth);
            assert_eq!(Some(result.column), column, "move at depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn game_between_agents_finishes() -> Result<()> {
        let mut one = AlphaBetaAgent::new("ab-2", 2)?;
        let mut two = AlphaBetaAgent::new("ab-3", 3)?;
        let record = Game::new(Board::standard(), &mut one, &mut two).play()?;
        assert!(record.state.is_over());
        assert!(record.forfeit.is_none());
        assert!(record.board.num_moves() <= WIDTH * HEIGHT);

        let mut one = RandomAgent::with_seed("random-1", 1);
        let mut two = RandomAgent::with_seed("random-2", 2);
        let record = Game::new(Board::standard(), &mut one, &mut two).play()?;
        assert!(record.state.is_over());
        assert!(record.forfeit.is_none());
        Ok(())
    }

    #[test]
    pub fn blocks_vertical_threat_in_game() -> Result<()> {
        // player 1 only ever plays column 1, and forfeits once it is full
        let mut stacker = ColumnAgent(0);
        let mut agent = AlphaBetaAgent::new("ab", 2)?;
        let record = Game::new(Board::standard(), &mut stacker, &mut agent).play()?;
        assert_eq!(record.winner(), Some(Player::Two));
        Ok(())
    }

    #[test]
    pub fn illegal_move_forfeits() -> Result<()> {
        let mut cheat = ColumnAgent(WIDTH + 3);
        let mut agent = RandomAgent::with_seed("random", 0);
        let record = Game::new(Board::standard(), &mut cheat, &mut agent).play()?;
        assert_eq!(record.forfeit, Some(Player::One));
        assert_eq!(record.winner(), Some(Player::Two));
        assert_eq!(record.board.num_moves(), 0);
        Ok(())
    }

    #[test]
    pub fn seeded_random_agents_repeat() -> Result<()> {
        let board = Board::standard();
        let mut a = RandomAgent::with_seed("a", 42);
        let mut b = RandomAgent::with_seed("b", 42);
        for _ in 0..10 {
            let column = a.select_move(&board)?;
            assert_eq!(column, b.select_move(&board)?);
            assert!(board.playable(column));
        }
        Ok(())
    }

    #[test]
    pub fn arena_plays_every_game() -> Result<()> {
        let config = BoardConfig {
            width: 5,
            height: 4,
            connect: 3,
        };
        let tally = arena::run(&config, PlayerSpec::Random, PlayerSpec::AlphaBeta(2), 6, 7)?;
        assert_eq!(tally.games(), 6);
        assert_eq!(tally.forfeits, 0);

        assert!(arena::run(&config, PlayerSpec::Human, PlayerSpec::Random, 1, 0).is_err());
        Ok(())
    }
}
