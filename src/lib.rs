//! # Minimax Connect Four
//!
//! Connect Four against a machine opponent that picks its moves with a
//! fixed-depth minimax search and alpha-beta pruning. Ships with a terminal
//! UI built with Ratatui and a headless match runner.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, state machine
//! - [`ai`]: Agent trait, evaluators, minimax search
//! - [`arena`]: Automated games between two agents
//! - [`ui`]: Terminal UI: human versus machine
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
