use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::core::game::{Context, EngineCommand, Game};

const IDLE_SLEEP: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Runs until Esc or a game-issued quit, then hands the game back for a final summary.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let mut last_tick = Instant::now();
        let (cmd_tx, mut cmd_rx) = tokio::sync::mpsc::unbounded_channel::<EngineCommand>();
        let ctx = Context::new(cmd_tx);
        info!("engine started");

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Esc {
                            debug!("esc pressed");
                            break;
                        }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }

            // Games without ticks still need the loop to wake up so input keeps getting polled.
            let tick_rate = self.game.tick_rate();
            let tick_sleep = tick_rate.map_or(IDLE_SLEEP, |rate| rate.min(IDLE_SLEEP));

            tokio::select! {
                Some(cmd) = cmd_rx.recv() => {
                    match cmd {
                        EngineCommand::Quit => break,
                    }
                }

                _ = tokio::time::sleep(tick_sleep) => {
                    if let Some(rate) = tick_rate {
                        let dt = last_tick.elapsed();
                        if dt >= rate {
                            last_tick = Instant::now();
                            self.game.on_tick(dt, &ctx);
                        }
                    }
                }
            }
        }

        info!("engine stopped");
        Ok(self.game)
    }
}
