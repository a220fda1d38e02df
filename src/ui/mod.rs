//! Terminal UI for playing against the machine.

mod app;
mod game_view;

pub use app::App;
