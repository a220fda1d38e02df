//! Automated games between two agents, used by the headless mode.

use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{GameState, Outcome, Player};

/// Result of a single finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub first: Player,
    pub outcome: Outcome,
    pub moves: Vec<usize>,
    pub final_state: GameState,
}

/// Play one game to completion. `machine` plays the machine side and `human`
/// stands in for the person at the keyboard.
pub fn play_game(
    machine: &mut dyn Agent,
    human: &mut dyn Agent,
    first: Player,
) -> Result<GameRecord, MatchError> {
    let mut state = GameState::new(first);
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let agent: &mut dyn Agent = match state.current_player() {
            Player::Machine => &mut *machine,
            Player::Human => &mut *human,
        };
        let action = agent.select_action(&state)?;
        state
            .apply_move_mut(action)
            .map_err(|_| MatchError::IllegalAction {
                agent: agent.name().to_string(),
                action,
                legal: state.legal_actions(),
            })?;
        moves.push(action);
    }

    Ok(GameRecord {
        first,
        outcome: state.outcome(),
        moves,
        final_state: state,
    })
}

/// Running win/loss/draw tally from the machine's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub machine_wins: usize,
    pub human_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::MachineWin => self.machine_wins += 1,
            Outcome::HumanWin => self.human_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn games(&self) -> usize {
        self.machine_wins + self.human_wins + self.draws
    }

    /// Machine win rate over all recorded games.
    pub fn win_rate(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.machine_wins as f32 / games as f32
    }
}

/// Play `games` games, alternating who opens, starting with the human.
pub fn play_match(
    machine: &mut dyn Agent,
    human: &mut dyn Agent,
    games: usize,
    mut on_game: impl FnMut(usize, &GameRecord),
) -> Result<MatchSummary, MatchError> {
    let mut summary = MatchSummary::default();
    for game in 0..games {
        let first = if game % 2 == 0 { Player::Human } else { Player::Machine };
        let record = play_game(machine, human, first)?;
        summary.record(record.outcome);
        on_game(game, &record);
    }
    Ok(summary)
}
