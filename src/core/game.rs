//! Core game interface the engine drives
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Requests a game can make of the engine that hosts it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Quit,
}

/// Handle passed into every game callback
#[derive(Debug, Clone)]
pub struct Context {
    tx: UnboundedSender<EngineCommand>,
}

impl Context {
    pub fn new(tx: UnboundedSender<EngineCommand>) -> Self {
        Self { tx }
    }

    /// Ask the engine to leave its loop after the current frame
    pub fn quit(&self) {
        // The receiver only goes away once the engine has stopped anyway.
        let _ = self.tx.send(EngineCommand::Quit);
    }
}

/// Main game trait that all terminal games implement
pub trait Game {
    /// How often `on_tick` should fire; `None` for purely input-driven games
    fn tick_rate(&self) -> Option<Duration>;

    fn on_tick(&mut self, dt: Duration, ctx: &Context);

    /// Handle one key press. Esc is reserved by the engine.
    fn handle_input(&mut self, event: KeyEvent, ctx: &Context);

    /// Render the current view into the Ratatui frame
    fn render(&self, frame: &mut ratatui::Frame);
}
