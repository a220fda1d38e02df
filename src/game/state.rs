use super::board::{Board, Outcome, COLS};
use super::player::Player;
use crate::error::MoveError;

/// A board plus whose turn it is. The outcome is always read off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl GameState {
    /// Create an empty game where `first` moves first
    pub fn new(first: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: first,
        }
    }

    /// Create initial game state; the human opens
    pub fn initial() -> Self {
        Self::new(Player::Human)
    }

    /// Resume from an existing position with `to_move` on turn
    pub fn from_board(board: Board, to_move: Player) -> Self {
        GameState {
            board,
            current_player: to_move,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Get list of legal columns (not full), ascending
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| self.board.is_playable(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.apply_move(column, self.current_player)?;
        self.current_player = self.current_player.other();

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
