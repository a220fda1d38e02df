//! Core Connect Four game logic: board representation, player types, and the
//! game state machine.

mod board;
mod player;
mod state;

pub use board::{runs, Board, Cell, Outcome, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::GameState;
