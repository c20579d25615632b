use tracing::{debug, info, warn};

use crate::games::hand_cricket::error::ActionError;
use crate::games::hand_cricket::reducer::{reduce, Action};
use crate::games::hand_cricket::state::{GameState, Rules};

/// Owns the one authoritative `GameState` and is the only place it gets replaced.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: GameState,
    rules: Rules,
}

impl Session {
    pub fn new(rules: Rules) -> Self {
        Self { state: GameState::default(), rules }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Applies `action`. A rejected action keeps the current state and hands back the reason.
    pub fn dispatch(&mut self, action: Action) -> Result<&GameState, ActionError> {
        match reduce(&self.state, &action, &self.rules) {
            Ok(next) => {
                debug!(action = action.name(), from = %self.state.phase, to = %next.phase, "transition");
                if next.is_over() && !self.state.is_over() {
                    info!(
                        result = ?next.game_result,
                        player = next.player_score,
                        computer = next.computer_score,
                        "game over"
                    );
                }
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!(action = action.name(), phase = %self.state.phase, error = %e, "action rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hand_cricket::state::Phase;

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut session = Session::default();
        let before = session.state().clone();
        assert!(session.dispatch(Action::SetPlayerName("no way".into())).is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn accepted_action_replaces_state() {
        let mut session = Session::default();
        let state = session.dispatch(Action::SetPlayerName("Rahul".into())).unwrap();
        assert_eq!(state.phase, Phase::Toss);
        assert_eq!(session.state().player_name, "Rahul");
    }
}
