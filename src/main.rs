use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minimax_connect_four::ai::{EvaluatorKind, MinimaxAgent, RandomAgent};
use minimax_connect_four::arena::play_match;
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::game::Outcome;
use minimax_connect_four::ui::App;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override search depth (plies below each candidate move)
    #[arg(long)]
    depth: Option<usize>,

    /// Override position evaluator
    #[arg(long, value_enum)]
    evaluator: Option<EvaluatorKind>,

    /// Search root columns in parallel
    #[arg(long)]
    parallel: bool,

    /// Let the machine make the first move
    #[arg(long)]
    machine_first: bool,

    /// Play the machine against a random opponent on stdout instead of opening the UI
    #[arg(long)]
    headless: bool,

    /// Number of games in headless mode
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        app_config.search.depth = depth;
    }
    if let Some(evaluator) = cli.evaluator {
        app_config.search.evaluator = evaluator;
    }
    if cli.parallel {
        app_config.search.parallel = true;
    }
    if cli.machine_first {
        app_config.game.machine_first = true;
    }
    app_config
        .validate()
        .context("invalid command-line overrides")?;

    if cli.headless {
        run_headless(&app_config, cli.games)
    } else {
        run_tui(&app_config).context("terminal UI failed")
    }
}

fn run_headless(config: &AppConfig, games: usize) -> Result<()> {
    let mut machine = MinimaxAgent::from_config(&config.search);
    let mut random = RandomAgent::new();

    println!(
        "Minimax (depth {}, {:?} evaluator) vs Random, {} games",
        config.search.depth, config.search.evaluator, games
    );

    let summary = play_match(&mut machine, &mut random, games, |game, record| {
        let result = match record.outcome {
            Outcome::MachineWin => "machine wins",
            Outcome::HumanWin => "random wins",
            Outcome::Draw => "draw",
            Outcome::InProgress => "unfinished",
        };
        println!(
            "Game {:>3}: {} opened, {} after {} moves",
            game + 1,
            record.first.name(),
            result,
            record.moves.len()
        );
        println!("{}\n", record.final_state.board());
    })
    .context("headless match aborted")?;

    println!(
        "Machine {} / Random {} / Draws {}  (win rate {:.0}%)",
        summary.machine_wins,
        summary.human_wins,
        summary.draws,
        summary.win_rate() * 100.0
    );
    Ok(())
}

fn run_tui(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even when the app returned an error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
