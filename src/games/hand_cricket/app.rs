use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::games::hand_cricket::error::{ActionError, NameError};
use crate::core::game::{Context, Game};
use crate::games::hand_cricket::name::{is_name_char, validate_name, MAX_NAME_LEN};
use crate::games::hand_cricket::opponent::{Opponent, RandomOpponent};
use crate::games::hand_cricket::reducer::Action;
use crate::games::hand_cricket::renderer;
use crate::games::hand_cricket::session::Session;
use crate::games::hand_cricket::state::{
    CoinSide, GameResult, GameState, Guess, Phase, Role, Rules, Side,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    remaining: Duration,
}

/// The last pair of picks, kept around so the pitch view can show what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub batter: Side,
    pub player: Guess,
    pub computer: Guess,
}

impl Delivery {
    pub fn is_out(&self) -> bool {
        self.player == self.computer
    }

    /// Runs the batter scored off this delivery.
    pub fn runs(&self) -> u8 {
        match self.batter {
            Side::Player => self.player.value(),
            Side::Computer => self.computer.value(),
        }
    }
}

/// Terminal front end: routes keys to actions and keeps the purely visual bits
/// (typed name, toast, last reveal) out of the game state.
pub struct HandCricketApp<O: Opponent = RandomOpponent> {
    session: Session,
    opponent: O,
    name_input: String,
    toast: Option<Toast>,
    last_delivery: Option<Delivery>,
    toast_ttl: Duration,
    tick_rate: Duration,
}

impl<O: Opponent> HandCricketApp<O> {
    pub fn new(rules: Rules, opponent: O) -> Self {
        Self {
            session: Session::new(rules),
            opponent,
            name_input: String::new(),
            toast: None,
            last_delivery: None,
            toast_ttl: Duration::from_millis(2500),
            tick_rate: Duration::from_millis(100),
        }
    }

    pub fn with_timing(mut self, tick_rate: Duration, toast_ttl: Duration) -> Self {
        self.tick_rate = tick_rate;
        self.toast_ttl = toast_ttl;
        self
    }

    /// Pre-fills the welcome input; it is still validated on Enter.
    pub fn with_name_input(mut self, name: impl Into<String>) -> Self {
        self.name_input = name.into();
        self
    }

    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    pub fn rules(&self) -> &Rules {
        self.session.rules()
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn last_delivery(&self) -> Option<&Delivery> {
        self.last_delivery.as_ref()
    }

    fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.toast = Some(Toast {
            title: title.into(),
            message: message.into(),
            remaining: self.toast_ttl,
        });
    }

    fn reject(&mut self, err: ActionError) {
        self.notify(err.title(), err.to_string());
    }

    fn dispatch(&mut self, action: Action) -> bool {
        match self.session.dispatch(action) {
            Ok(_) => true,
            Err(e) => {
                self.reject(e);
                false
            }
        }
    }

    fn reset(&mut self) {
        self.dispatch(Action::ResetGame);
        self.name_input.clear();
        self.last_delivery = None;
        self.toast = None;
    }

    fn on_welcome_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if is_name_char(c) => {
                if self.name_input.chars().count() >= MAX_NAME_LEN {
                    self.reject(NameError::TooLong { max: MAX_NAME_LEN }.into());
                } else {
                    self.name_input.push(c);
                }
            }
            KeyCode::Char(c) => self.reject(NameError::InvalidCharacter(c).into()),
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Enter => match validate_name(&self.name_input) {
                Ok(name) => {
                    if self.dispatch(Action::SetPlayerName(name)) {
                        self.name_input.clear();
                    }
                }
                Err(e) => self.reject(e.into()),
            },
            _ => {}
        }
    }

    fn on_toss_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.dispatch(Action::SetTossChoice(CoinSide::Heads));
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.dispatch(Action::SetTossChoice(CoinSide::Tails));
            }
            KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Enter => {
                if self.state().player_choice.is_none() {
                    self.reject(ActionError::TossNotCalled);
                    return;
                }
                let outcome = self.opponent.flip_coin();
                debug!(%outcome, "coin flipped");
                self.dispatch(Action::PerformToss(outcome));
            }
            _ => {}
        }
    }

    fn on_role_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.dispatch(Action::SetRole(Role::Attack));
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.dispatch(Action::SetRole(Role::Defense));
            }
            KeyCode::Enter => {
                // Enter accepts whatever role the computer left over.
                let roles = self.state().available_roles();
                if let [only] = roles[..] {
                    self.dispatch(Action::SetRole(only));
                }
            }
            _ => {}
        }
    }

    fn on_play_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c as u8 - b'0';
                let player = match Guess::new(digit) {
                    Ok(guess) => guess,
                    Err(e) => return self.reject(e),
                };
                let computer = self.opponent.pick();
                let batter = self.state().batting_side();
                if self.dispatch(Action::MakeGuess { player, computer }) {
                    self.last_delivery = Some(Delivery { batter, player, computer });
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.dispatch(Action::EndGame(GameResult::Lose));
            }
            _ => {}
        }
    }

    fn on_game_over_key(&mut self, code: KeyCode, ctx: &Context) {
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => self.reset(),
            KeyCode::Char('q') | KeyCode::Char('Q') => ctx.quit(),
            _ => {}
        }
    }
}

impl<O: Opponent> Game for HandCricketApp<O> {
    fn tick_rate(&self) -> Option<Duration> {
        Some(self.tick_rate)
    }

    fn on_tick(&mut self, dt: Duration, _ctx: &Context) {
        if let Some(toast) = self.toast.as_mut() {
            toast.remaining = toast.remaining.saturating_sub(dt);
            if toast.remaining.is_zero() {
                self.toast = None;
            }
        }
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context) {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.reset();
            }
            return;
        }

        match self.state().phase {
            Phase::Welcome => self.on_welcome_key(event.code),
            Phase::Toss => self.on_toss_key(event.code),
            Phase::RoleSelect => self.on_role_key(event.code),
            Phase::Playing => self.on_play_key(event.code),
            Phase::GameOver => self.on_game_over_key(event.code, ctx),
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::render(frame, self);
    }
}
