pub mod app;
pub mod error;
pub mod name;
pub mod opponent;
pub mod reducer;
pub mod renderer;
pub mod session;
pub mod state;

pub use app::HandCricketApp;
pub use error::{ActionError, NameError};
pub use opponent::{Opponent, RandomOpponent};
pub use reducer::{reduce, Action};
pub use session::Session;
pub use state::{GameResult, GameState, Guess, Phase, Rules};

use crate::core::{config::Settings, engine::Engine};
use anyhow::Result;
use ratatui::DefaultTerminal;

/// Game runner for Hand Cricket; returns the state the player left the game in
pub async fn run_game(
    settings: &Settings,
    name: Option<String>,
    terminal: DefaultTerminal,
) -> Result<GameState> {
    let opponent = RandomOpponent::from_seed(settings.seed);
    let mut game = HandCricketApp::new(settings.rules, opponent)
        .with_timing(settings.tick_rate(), settings.toast_duration());
    if let Some(name) = name {
        game = game.with_name_input(name);
    }
    let engine = Engine::new(game);
    let game = engine.run(terminal).await?;
    Ok(game.state().clone())
}
