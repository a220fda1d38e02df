use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::game::{Board, GameState, Player};

use super::agent::Agent;
use super::evaluator::{Evaluator, EvaluatorKind, TerminalEvaluator};

/// Bound used for the initial alpha-beta window.
pub const INFINITY: i32 = i32::MAX;

/// Search settings, loadable from the `[search]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each candidate machine move.
    pub depth: usize,
    pub evaluator: EvaluatorKind,
    /// Score root columns on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 4,
            evaluator: EvaluatorKind::Terminal,
            parallel: false,
        }
    }
}

/// Positions reachable by one `player` move, in ascending column order.
fn children(board: &Board, player: Player) -> impl Iterator<Item = (usize, Board)> + '_ {
    board.playable_columns().filter_map(move |col| {
        let mut child = *board;
        child.apply_move(col, player).ok().map(|_| (col, child))
    })
}

/// Depth-limited minimax with alpha-beta pruning. The machine maximizes.
///
/// Every hypothetical move is made on a copy; the caller's board is never
/// touched.
pub struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a dyn Evaluator) -> Self {
        Searcher { evaluator, nodes: 0 }
    }

    /// Positions visited since this searcher was created.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    pub fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || board.is_game_over() {
            return self.evaluator.evaluate(board);
        }

        if maximizing {
            let mut best = -INFINITY;
            for (_, child) in children(board, Player::Machine) {
                let score = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for (_, child) in children(board, Player::Human) {
                let score = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }

    /// Score of playing the machine into `col`, or `None` if it is not playable.
    pub fn score_move(&mut self, board: &Board, col: usize, depth: usize) -> Option<i32> {
        let mut child = *board;
        child.apply_move(col, Player::Machine).ok()?;
        Some(self.minimax(&child, depth, -INFINITY, INFINITY, false))
    }

    /// Best machine column; ties go to the lowest index. `None` on a full board.
    pub fn find_best_move(&mut self, board: &Board, depth: usize) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;

        for (col, child) in children(board, Player::Machine) {
            // Next ply belongs to the human
            let score = self.minimax(&child, depth, -INFINITY, INFINITY, false);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        best.map(|(col, _)| col)
    }
}

/// Minimax with the terminal evaluator.
pub fn minimax(board: &Board, depth: usize, alpha: i32, beta: i32, maximizing: bool) -> i32 {
    Searcher::new(&TerminalEvaluator).minimax(board, depth, alpha, beta, maximizing)
}

/// Best machine column under the terminal evaluator.
pub fn find_best_move(board: &Board, depth: usize) -> Option<usize> {
    Searcher::new(&TerminalEvaluator).find_best_move(board, depth)
}

/// Score every playable root column independently on the rayon pool.
///
/// Returns the scores in ascending column order and the total number of
/// positions visited.
pub fn score_columns_parallel(
    board: &Board,
    depth: usize,
    evaluator: &dyn Evaluator,
) -> (Vec<(usize, i32)>, u64) {
    let columns: Vec<usize> = board.playable_columns().collect();
    let results: Vec<(usize, i32, u64)> = columns
        .into_par_iter()
        .filter_map(|col| {
            let mut searcher = Searcher::new(evaluator);
            let score = searcher.score_move(board, col, depth)?;
            Some((col, score, searcher.nodes_searched()))
        })
        .collect();

    let nodes: u64 = results.iter().map(|&(_, _, nodes)| nodes).sum();
    let scores: Vec<(usize, i32)> = results.into_iter().map(|(col, score, _)| (col, score)).collect();
    (scores, nodes)
}

/// Highest score wins; among equal scores the lowest column wins.
pub fn pick_best(scores: &[(usize, i32)]) -> Option<usize> {
    scores
        .iter()
        .copied()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(col, _)| col)
}

/// Agent that always plays the machine side using a fixed-depth search.
pub struct MinimaxAgent {
    config: SearchConfig,
    evaluator: Box<dyn Evaluator>,
    last_nodes: u64,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self::from_config(&SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        MinimaxAgent {
            config: config.clone(),
            evaluator: config.evaluator.build(),
            last_nodes: 0,
        }
    }

    pub fn with_evaluator(depth: usize, evaluator: Box<dyn Evaluator>) -> Self {
        MinimaxAgent {
            config: SearchConfig {
                depth,
                ..SearchConfig::default()
            },
            evaluator,
            last_nodes: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    /// Positions visited by the most recent search.
    pub fn last_nodes(&self) -> u64 {
        self.last_nodes
    }

    /// Choose the machine's column for `board`.
    pub fn best_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        let best = if self.config.parallel {
            let (scores, nodes) =
                score_columns_parallel(board, self.config.depth, self.evaluator.as_ref());
            self.last_nodes = nodes;
            pick_best(&scores)
        } else {
            let mut searcher = Searcher::new(self.evaluator.as_ref());
            let best = searcher.find_best_move(board, self.config.depth);
            self.last_nodes = searcher.nodes_searched();
            best
        };

        best.ok_or(SearchError::NoLegalMove)
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::NoLegalMove);
        }
        self.best_move(state.board())
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::ai::evaluator::WindowEvaluator;
    use proptest::prelude::*;

    /// Plain minimax without pruning.
    fn exhaustive(evaluator: &dyn Evaluator, board: &Board, depth: usize, maximizing: bool) -> i32 {
        if depth == 0 || board.is_game_over() {
            return evaluator.evaluate(board);
        }
        let player = if maximizing { Player::Machine } else { Player::Human };
        let scores = children(board, player)
            .map(|(_, child)| exhaustive(evaluator, &child, depth - 1, !maximizing));
        if maximizing {
            scores.max().unwrap_or(-INFINITY)
        } else {
            scores.min().unwrap_or(INFINITY)
        }
    }

    /// Non-terminal position reached by alternating legal moves.
    fn reachable_board() -> impl Strategy<Value = Board> {
        prop::collection::vec(0usize..7, 0..24).prop_map(|moves| {
            let mut board = Board::new();
            let mut player = Player::Human;
            for col in moves {
                let mut next = board;
                if next.apply_move(col, player).is_ok() && !next.is_game_over() {
                    board = next;
                    player = player.other();
                }
            }
            board
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_pruning_preserves_value(
            board in reachable_board(),
            depth in 0usize..4,
            maximizing in any::<bool>(),
        ) {
            for evaluator in [&TerminalEvaluator as &dyn Evaluator, &WindowEvaluator] {
                let pruned = Searcher::new(evaluator).minimax(&board, depth, -INFINITY, INFINITY, maximizing);
                let full = exhaustive(evaluator, &board, depth, maximizing);
                prop_assert_eq!(pruned, full);
            }
        }

        #[test]
        fn prop_parallel_root_agrees(board in reachable_board(), depth in 0usize..3) {
            let sequential = Searcher::new(&WindowEvaluator).find_best_move(&board, depth);
            let (scores, _) = score_columns_parallel(&board, depth, &WindowEvaluator);
            prop_assert_eq!(sequential, pick_best(&scores));
        }
    }
}
