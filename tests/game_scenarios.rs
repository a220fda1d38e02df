//! End-to-end scenarios driven the way the UI drives the core: check
//! playability, apply the human move, read the outcome, ask the engine for a
//! reply, apply it.

use minimax_connect_four::ai::{find_best_move, Agent, MinimaxAgent};
use minimax_connect_four::error::{MoveError, SearchError};
use minimax_connect_four::game::{Board, GameState, Outcome, Player, COLS};

fn board(s: &str) -> Board {
    s.parse().expect("test board should parse")
}

/// Apply the finishing human move and check the outcome flips only then.
fn assert_wins_only_after(mut b: Board, col: usize) {
    assert_eq!(b.outcome(), Outcome::InProgress, "already decided:\n{b}");
    assert!(b.is_playable(col));
    b.apply_move(col, Player::Human).unwrap();
    assert_eq!(b.outcome(), Outcome::HumanWin, "no win after column {col}:\n{b}");
}

#[test]
fn human_win_is_reported_after_the_move_horizontal() {
    let b = board(
        "
        .......
        .......
        .......
        .......
        MMM....
        HHH....
        ",
    );
    assert_wins_only_after(b, 3);
}

#[test]
fn human_win_is_reported_after_the_move_vertical() {
    let b = board(
        "
        .......
        .......
        .......
        H......
        H......
        HMMM..M
        ",
    );
    assert_wins_only_after(b, 0);
}

#[test]
fn human_win_is_reported_after_the_move_ascending_diagonal() {
    let b = board(
        "
        .......
        .......
        .......
        ..HM...
        .HMM...
        HMMH...
        ",
    );
    assert_wins_only_after(b, 3);
}

#[test]
fn human_win_is_reported_after_the_move_descending_diagonal() {
    let b = board(
        "
        .......
        .......
        .......
        ...MH..
        ...HMH.
        ..MMHMH
        ",
    );
    assert_wins_only_after(b, 3);
}

#[test]
fn full_board_without_four_is_a_draw() {
    let b = board(
        "
        HHMMHHM
        MMHHMMH
        HHMMHHM
        MMHHMMH
        HHMMHHM
        MMHHMMH
        ",
    );
    assert_eq!(b.outcome(), Outcome::Draw);
    assert_eq!(find_best_move(&b, 4), None);
}

#[test]
fn machine_blocks_open_three() {
    let mut state = GameState::initial();
    // Human builds 0-1-2 on the bottom row while the machine stacks column 6
    for (human, machine) in [(0, 6), (1, 6)] {
        state.apply_move_mut(human).unwrap();
        state.apply_move_mut(machine).unwrap();
    }
    state.apply_move_mut(2).unwrap();
    assert_eq!(state.current_player(), Player::Machine);

    let reply = find_best_move(state.board(), 4);
    assert_eq!(reply, Some(3));

    state.apply_move_mut(3).unwrap();
    assert_eq!(state.outcome(), Outcome::InProgress);
}

#[test]
fn presentation_round_trip() {
    let mut state = GameState::initial();
    let mut machine = MinimaxAgent::new(4);

    assert!(state.board().is_playable(3));
    state.apply_move_mut(3).unwrap();
    assert_eq!(state.outcome(), Outcome::InProgress);

    let reply = machine.select_action(&state).unwrap();
    assert!(state.board().is_playable(reply));
    state.apply_move_mut(reply).unwrap();

    assert_eq!(state.board().disc_count(), 2);
    assert_eq!(state.current_player(), Player::Human);
}

#[test]
fn precondition_violations_are_distinct_errors() {
    let mut state = GameState::initial();
    assert_eq!(
        state.apply_move_mut(COLS),
        Err(MoveError::InvalidColumn { column: COLS })
    );

    let mut b = Board::new();
    for _ in 0..6 {
        b.apply_move(4, Player::Machine).unwrap();
    }
    assert_eq!(
        b.apply_move(4, Player::Human),
        Err(MoveError::ColumnFull { column: 4 })
    );

    // Finish a game, then ask for more
    for _ in 0..3 {
        state.apply_move_mut(0).unwrap();
        state.apply_move_mut(1).unwrap();
    }
    state.apply_move_mut(0).unwrap();
    assert_eq!(state.outcome(), Outcome::HumanWin);
    assert_eq!(state.apply_move_mut(2), Err(MoveError::GameOver));

    let mut machine = MinimaxAgent::new(4);
    assert_eq!(machine.select_action(&state), Err(SearchError::NoLegalMove));
}

#[test]
fn machine_plays_a_full_game_against_scripted_human() {
    let mut state = GameState::initial();
    let mut machine = MinimaxAgent::new(4);

    while !state.is_terminal() {
        let col = match state.current_player() {
            // Keep stacking the leftmost open column
            Player::Human => state.board().playable_columns().next().unwrap(),
            Player::Machine => machine.select_action(&state).unwrap(),
        };
        assert!(state.board().is_playable(col));
        state.apply_move_mut(col).unwrap();
    }

    assert!(state.outcome().is_terminal());
    assert!(state.legal_actions().is_empty());
}

#[test]
fn repeated_searches_agree() {
    let b = board(
        "
        .......
        .......
        .......
        ...H...
        ..MM...
        .HHMH..
        ",
    );
    let first = find_best_move(&b, 4);
    for _ in 0..3 {
        assert_eq!(find_best_move(&b, 4), first);
    }
}
