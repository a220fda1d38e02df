use serde::{Deserialize, Serialize};

use crate::game::{runs, Board, Cell, Player, ROWS};

/// Score returned by [`WindowEvaluator`] for a decided position.
pub const WIN_SCORE: i32 = 1_000_000;

/// Trait for scoring a position. Positive values favour the machine.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Exact at terminal positions and blind everywhere else: +1 for a machine
/// four, -1 for a human four, 0 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalEvaluator;

impl Evaluator for TerminalEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        if board.has_four_in_a_row(Player::Machine) {
            1
        } else if board.has_four_in_a_row(Player::Human) {
            -1
        } else {
            0
        }
    }
}

/// Threat-counting heuristic over every 4-cell window, with a centre column
/// bonus. Decided positions score ±[`WIN_SCORE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowEvaluator;

impl WindowEvaluator {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 3 && empty == 1 {
            50
        } else if own == 2 && empty == 2 {
            10
        } else if opp == 3 && empty == 1 {
            -80
        } else if opp == 2 && empty == 2 {
            -10
        } else {
            0
        }
    }
}

impl Evaluator for WindowEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        if board.has_four_in_a_row(Player::Machine) {
            return WIN_SCORE;
        }
        if board.has_four_in_a_row(Player::Human) {
            return -WIN_SCORE;
        }

        let mut score = 0;

        // Center column bonus
        for row in 0..ROWS {
            match board.get(row, 3) {
                Cell::Machine => score += 3,
                Cell::Human => score -= 3,
                Cell::Empty => {}
            }
        }

        for line in runs() {
            let mut own = 0;
            let mut opp = 0;
            let mut empty = 0;
            for (row, col) in line {
                match board.get(row, col) {
                    Cell::Machine => own += 1,
                    Cell::Human => opp += 1,
                    Cell::Empty => empty += 1,
                }
            }
            score += Self::score_window(own, opp, empty);
        }

        score
    }
}

/// Evaluator selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Terminal,
    Window,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Terminal => Box::new(TerminalEvaluator),
            EvaluatorKind::Window => Box::new(WindowEvaluator),
        }
    }
}

/// Score a position with the exact terminal evaluator.
pub fn evaluate(board: &Board) -> i32 {
    TerminalEvaluator.evaluate(board)
}
