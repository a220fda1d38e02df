use crate::ai::{Agent, MinimaxAgent};
use crate::config::AppConfig;
use crate::game::{GameState, Outcome, Player, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Human-versus-machine session driven by the keyboard.
pub struct App {
    game_state: GameState,
    first_player: Player,
    agent: MinimaxAgent,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let first_player = if config.game.machine_first {
            Player::Machine
        } else {
            Player::Human
        };
        let mut app = App {
            game_state: GameState::new(first_player),
            first_player,
            agent: MinimaxAgent::from_config(&config.search),
            selected_column: COLS / 2,
            should_quit: false,
            message: None,
        };
        app.machine_turn();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game_state = GameState::new(self.first_player);
        self.selected_column = COLS / 2;
        self.machine_turn();
    }

    /// Drop the human's disc in the selected column, then let the machine reply
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        if let Err(err) = self.game_state.apply_move_mut(self.selected_column) {
            self.message = Some(format!("Cannot play there: {err}"));
            return;
        }

        if !self.announce_outcome() {
            self.machine_turn();
        }
    }

    /// Play the machine's move if it is the machine's turn
    fn machine_turn(&mut self) {
        if self.game_state.is_terminal() || self.game_state.current_player() != Player::Machine {
            return;
        }

        let result = self
            .agent
            .select_action(&self.game_state)
            .map_err(|err| err.to_string())
            .and_then(|col| {
                self.game_state
                    .apply_move_mut(col)
                    .map(|()| col)
                    .map_err(|err| err.to_string())
            });

        match result {
            Ok(col) => {
                if !self.announce_outcome() {
                    self.message = Some(format!(
                        "Machine played column {} ({} positions searched)",
                        col + 1,
                        self.agent.last_nodes()
                    ));
                }
            }
            Err(err) => {
                self.message = Some(format!("Machine could not move: {err}"));
            }
        }
    }

    /// Set the end-of-game message. Returns true if the game is over.
    fn announce_outcome(&mut self) -> bool {
        let text = match self.game_state.outcome() {
            Outcome::InProgress => return false,
            Outcome::HumanWin => "You win!",
            Outcome::MachineWin => "Machine wins!",
            Outcome::Draw => "It's a draw!",
        };
        self.message = Some(format!("{text} Press 'r' to play again."));
        true
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            self.agent.depth(),
        );
    }
}
