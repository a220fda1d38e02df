//! Move selection: the agent trait, position evaluators, and the
//! depth-limited minimax search with alpha-beta pruning.

mod agent;
pub mod evaluator;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use evaluator::{evaluate, Evaluator, EvaluatorKind, TerminalEvaluator, WindowEvaluator};
pub use minimax::{find_best_move, minimax, MinimaxAgent, SearchConfig, Searcher};
pub use random::RandomAgent;
