use crate::error::SearchError;
use crate::game::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and scripted matches.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Player};

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::new();
        let state = GameState::initial();
        let legal = state.legal_actions();

        for _ in 0..100 {
            let action = agent.select_action(&state).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent1 = RandomAgent::seeded(1);
        let mut agent2 = RandomAgent::seeded(2);
        let mut state = GameState::initial();

        let mut turn = 0;
        while !state.is_terminal() {
            let action = if turn % 2 == 0 {
                agent1.select_action(&state).unwrap()
            } else {
                agent2.select_action(&state).unwrap()
            };
            state = state.apply_move(action).unwrap();
            turn += 1;
        }

        assert!(state.is_terminal());
        assert!(turn <= 42);
    }

    #[test]
    fn test_seeded_agents_agree() {
        let state = GameState::initial();
        let mut a = RandomAgent::seeded(7);
        let mut b = RandomAgent::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.select_action(&state), b.select_action(&state));
        }
    }

    #[test]
    fn test_no_action_on_full_board() {
        let board: Board = "
            HHMMHHM
            MMHHMMH
            HHMMHHM
            MMHHMMH
            HHMMHHM
            MMHHMMH
        "
        .parse()
        .unwrap();
        let mut agent = RandomAgent::seeded(0);
        let state = GameState::from_board(board, Player::Human);
        assert_eq!(agent.select_action(&state), Err(SearchError::NoLegalMove));
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
