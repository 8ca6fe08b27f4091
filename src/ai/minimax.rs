use std::fmt;

use log::{debug, trace, warn};

use crate::game::{Board, Cell, Player};

use super::agent::Agent;

/// Base magnitude of a decided game. Any win outscores every heuristic value.
pub const WIN_SCORE: i64 = 1_000_000;

/// Trait for evaluating a non-terminal leaf.
///
/// Scores are on the engine's scale: negative favours `own`, positive favours
/// the opponent.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, own: Player) -> i64;
}

/// Rewards discs near the center column, ignoring rows and connectivity.
pub struct CenterDistanceHeuristic;

impl CenterDistanceHeuristic {
    /// 0 on the edge columns, `width / 2` on the center column.
    pub fn column_weight(width: usize, col: usize) -> i64 {
        let center = (width / 2) as i64;
        center - (center - col as i64).abs()
    }
}

impl Heuristic for CenterDistanceHeuristic {
    fn evaluate(&self, board: &Board, own: Player) -> i64 {
        let own_cell = own.to_cell();
        let mut score = 0;

        for col in 0..board.width() {
            let weight = Self::column_weight(board.width(), col);
            for row in 0..board.height() {
                match board.get(row, col) {
                    Cell::Empty => {}
                    c if c == own_cell => score -= weight,
                    _ => score += weight,
                }
            }
        }

        score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Maximizing,
    Minimizing,
}

impl Turn {
    pub fn flip(self) -> Turn {
        match self {
            Turn::Maximizing => Turn::Minimizing,
            Turn::Minimizing => Turn::Maximizing,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Maximizing => f.write_str("maximizing"),
            Turn::Minimizing => f.write_str("minimizing"),
        }
    }
}

/// Column chosen at a search node, with the score backing it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: Option<usize>,
    pub score: i64,
}

impl SearchOutcome {
    fn leaf(score: i64) -> Self {
        SearchOutcome {
            column: None,
            score,
        }
    }
}

/// Fixed-depth minimax without pruning.
///
/// The engine is always the minimizer: its own discs drive the score down and
/// the opponent's drive it up. Candidate columns are tried in ascending order
/// and only a strictly better score replaces the current best, so ties go to
/// the lowest column.
pub struct MinimaxAgent {
    depth: usize,
    own: Player,
    heuristic: Box<dyn Heuristic>,
    nodes: u64,
}

impl MinimaxAgent {
    pub fn new(depth: usize, own: Player) -> Self {
        MinimaxAgent {
            depth,
            own,
            heuristic: Box::new(CenterDistanceHeuristic),
            nodes: 0,
        }
    }

    pub fn with_heuristic(depth: usize, own: Player, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth,
            own,
            heuristic,
            nodes: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn own(&self) -> Player {
        self.own
    }

    /// Nodes visited by the most recent search.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Pick a column for `own`, leaving `board` untouched.
    pub fn get_move(&mut self, board: &Board) -> Option<usize> {
        self.search(board).column
    }

    /// Run a full search from `board` and return the root decision.
    pub fn search(&mut self, board: &Board) -> SearchOutcome {
        self.nodes = 0;
        let mut scratch = board.clone();
        let outcome = self.minimax(&mut scratch, self.depth, Turn::Minimizing, None);
        debug!(
            "best move = {:?} with score = {} at depth {} ({} nodes)",
            outcome.column, outcome.score, self.depth, self.nodes
        );
        outcome
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        turn: Turn,
        last_move: Option<usize>,
    ) -> SearchOutcome {
        self.nodes += 1;

        if let Some(col) = last_move {
            if board.was_winning_move(col) {
                let magnitude = WIN_SCORE + depth as i64;
                // The side that just moved is the opposite of `turn`.
                return match turn {
                    Turn::Maximizing => SearchOutcome::leaf(-magnitude),
                    Turn::Minimizing => SearchOutcome::leaf(magnitude),
                };
            }
        }

        if depth == 0 {
            return SearchOutcome::leaf(self.heuristic.evaluate(board, self.own));
        }

        let moves = board.valid_moves();
        if moves.is_empty() {
            return SearchOutcome::leaf(0);
        }

        let (mut best_score, player) = match turn {
            Turn::Minimizing => (i64::MAX, self.own),
            Turn::Maximizing => (i64::MIN, self.own.other()),
        };
        let mut best_move = None;

        for col in moves {
            if let Err(err) = board.make_move(col, player) {
                warn!("search failed to play column {col}: {err}");
                break;
            }

            let child = self.minimax(board, depth - 1, turn.flip(), Some(col));
            trace!(
                "depth {depth}: move {col} in a {turn} turn scored {} (best so far {best_move:?} = {best_score})",
                child.score
            );

            let improves = match turn {
                Turn::Minimizing => child.score < best_score,
                Turn::Maximizing => child.score > best_score,
            };
            if improves {
                best_score = child.score;
                best_move = Some(col);
            }

            if let Err(err) = board.undo_move(col) {
                warn!("search failed to undo column {col}: {err}");
                break;
            }
        }

        SearchOutcome {
            column: best_move,
            score: best_score,
        }
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        self.get_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 6]) -> Board {
        rows.concat().parse().unwrap()
    }

    /// Largest heuristic magnitude a board of this size can produce.
    fn heuristic_bound(board: &Board) -> i64 {
        (0..board.width())
            .map(|col| CenterDistanceHeuristic::column_weight(board.width(), col))
            .sum::<i64>()
            * board.height() as i64
    }

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::standard();
        let h = CenterDistanceHeuristic;
        assert_eq!(h.evaluate(&board, Player::Red), 0);
        assert_eq!(h.evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_column_weights() {
        let weights: Vec<i64> = (0..7)
            .map(|col| CenterDistanceHeuristic::column_weight(7, col))
            .collect();
        assert_eq!(weights, vec![0, 1, 2, 3, 2, 1, 0]);

        // Even widths put the center right of the middle.
        let weights: Vec<i64> = (0..6)
            .map(|col| CenterDistanceHeuristic::column_weight(6, col))
            .collect();
        assert_eq!(weights, vec![0, 1, 2, 3, 2, 1]);
    }

    #[test]
    fn heuristic_own_discs_push_score_down() {
        let h = CenterDistanceHeuristic;
        let mut board = Board::standard();
        board.make_move(3, Player::Yellow).unwrap();
        assert_eq!(h.evaluate(&board, Player::Yellow), -3);
        assert_eq!(h.evaluate(&board, Player::Red), 3);

        // Rows do not matter, edges are worth nothing.
        board.make_move(3, Player::Yellow).unwrap();
        board.make_move(0, Player::Red).unwrap();
        board.make_move(5, Player::Red).unwrap();
        assert_eq!(h.evaluate(&board, Player::Yellow), -6 + 1);
    }

    // --- Algorithm tests ---

    #[test]
    fn depth_one_prefers_center_on_empty_board() {
        let mut agent = MinimaxAgent::new(1, Player::Yellow);
        let outcome = agent.search(&Board::standard());
        assert_eq!(outcome.column, Some(3));
        assert_eq!(outcome.score, -3);
    }

    #[test]
    fn ties_go_to_lowest_column() {
        // Center column full: columns 2 and 4 score the same at depth 1.
        let board = board([
            "   O   ", "   X   ", "   O   ", "   X   ", "   O   ", "   X   ",
        ]);
        let mut agent = MinimaxAgent::new(1, Player::Yellow);
        assert_eq!(agent.get_move(&board), Some(2));
    }

    #[test]
    fn narrow_board_uses_right_hand_center() {
        let mut board = Board::new(2, 4).unwrap();
        // width / 2 == 1, so column 1 carries the weight.
        let mut agent = MinimaxAgent::new(1, Player::Red);
        assert_eq!(agent.get_move(&board), Some(1));

        board.make_move(1, Player::Yellow).unwrap();
        board.make_move(1, Player::Yellow).unwrap();
        board.make_move(1, Player::Yellow).unwrap();
        board.make_move(1, Player::Red).unwrap();
        assert_eq!(agent.get_move(&board), Some(0));
    }

    #[test]
    fn takes_winning_move() {
        let board = board([
            "       ", "       ", "       ", "       ", "XXX    ", "OOO    ",
        ]);
        let mut agent = MinimaxAgent::new(4, Player::Yellow);
        let outcome = agent.search(&board);
        assert_eq!(outcome.column, Some(3), "Should take winning move at col 3");
        assert_eq!(outcome.score, -(WIN_SCORE + 3));
    }

    #[test]
    fn blocks_opponent_win() {
        let board = board([
            "       ", "       ", "       ", "       ", "       ", "XXX    ",
        ]);
        for depth in [2, 3, 4] {
            let mut agent = MinimaxAgent::new(depth, Player::Yellow);
            assert_eq!(
                agent.get_move(&board),
                Some(3),
                "Should block at col 3 with depth {depth}"
            );
        }
    }

    #[test]
    fn blocks_as_first_player() {
        let board = board([
            "       ", "       ", "       ", "       ", "      X", "OOO   X",
        ]);
        let mut agent = MinimaxAgent::new(2, Player::Red);
        assert_eq!(agent.get_move(&board), Some(3));
    }

    #[test]
    fn prefers_win_over_block() {
        // Red threatens col 3, Yellow can finish the vertical in col 6.
        let board = board([
            "       ", "       ", "       ", "      O", "      O", "XXX   O",
        ]);
        let mut agent = MinimaxAgent::new(4, Player::Yellow);
        assert_eq!(agent.get_move(&board), Some(6));
    }

    #[test]
    fn lost_position_is_scored_as_a_loss() {
        // Red has two open ends on the bottom row; one block is not enough.
        let board = board([
            "       ", "       ", "       ", "       ", "       ", " XXX   ",
        ]);
        let mut agent = MinimaxAgent::new(2, Player::Yellow);
        let outcome = agent.search(&board);
        assert_eq!(outcome.column, Some(0));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn win_scores_dominate_heuristic() {
        let board = board([
            "       ", "       ", "       ", "       ", "XXX    ", "OOO    ",
        ]);
        for depth in 1..=3 {
            let mut agent = MinimaxAgent::new(depth, Player::Yellow);
            let outcome = agent.search(&board);
            assert!(outcome.score.abs() >= WIN_SCORE);
            assert!(outcome.score.abs() > heuristic_bound(&board));
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let board = board([
            "OXXXXOO", "XXXXOOO", "OOOXXXX", "XXXXOOO", "OOOXXXX", "XXXXOOO",
        ]);
        let mut agent = MinimaxAgent::new(4, Player::Yellow);
        assert_eq!(
            agent.search(&board),
            SearchOutcome {
                column: None,
                score: 0
            }
        );
    }

    #[test]
    fn single_open_column_is_chosen() {
        let board = board([
            " OXXXXO", "XXXXOOO", "OOOXXXX", "XXXXOOO", "OOOXXXX", "XXXXOOO",
        ]);
        let mut agent = MinimaxAgent::new(4, Player::Red);
        assert_eq!(agent.get_move(&board), Some(0));
    }

    #[test]
    fn search_leaves_board_untouched() {
        let board = board([
            "       ", "       ", "       ", "   O   ", "  XX   ", " OXOX  ",
        ]);
        let before = board.clone();
        let mut agent = MinimaxAgent::new(4, Player::Yellow);
        agent.get_move(&board);
        assert_eq!(board, before);
        assert!(agent.nodes_searched() > 1);
    }

    #[test]
    fn search_is_deterministic() {
        let board = board([
            "       ", "       ", "       ", "   O   ", "  XX   ", " OXOX  ",
        ]);
        let first = MinimaxAgent::new(4, Player::Yellow).search(&board);
        for _ in 0..3 {
            assert_eq!(MinimaxAgent::new(4, Player::Yellow).search(&board), first);
        }
    }

    #[test]
    fn node_count_matches_full_width_tree() {
        // No pruning: 1 + 7 + 49 nodes on an empty board at depth 2.
        let mut agent = MinimaxAgent::new(2, Player::Yellow);
        agent.search(&Board::standard());
        assert_eq!(agent.nodes_searched(), 57);
    }

    #[test]
    fn custom_heuristic_is_used() {
        struct PreferEdge;
        impl Heuristic for PreferEdge {
            fn evaluate(&self, board: &Board, own: Player) -> i64 {
                if board.get(0, 6) == own.to_cell() {
                    -10
                } else {
                    0
                }
            }
        }

        let mut agent = MinimaxAgent::with_heuristic(1, Player::Yellow, Box::new(PreferEdge));
        assert_eq!(agent.get_move(&Board::standard()), Some(6));
    }

    // --- Integration tests ---

    #[test]
    fn full_game_vs_self_completes() {
        let mut red = MinimaxAgent::new(3, Player::Red);
        let mut yellow = MinimaxAgent::new(2, Player::Yellow);
        let mut board = Board::standard();
        let mut player = Player::Red;

        loop {
            let col = match player {
                Player::Red => red.select_move(&board),
                Player::Yellow => yellow.select_move(&board),
            }
            .expect("board is not full");
            assert!(board.is_valid_move(col), "Column {col} is not legal");
            board.make_move(col, player).unwrap();
            if board.was_winning_move(col) || board.is_full() {
                break;
            }
            player = player.other();
        }
    }

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::new(4, Player::Red);
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 4);
        assert_eq!(agent.own(), Player::Red);
    }
}
