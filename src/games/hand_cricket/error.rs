use thiserror::Error;

use crate::games::hand_cricket::state::{Phase, Role};

/// Why a player name was refused on the welcome screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("please enter your name to start the game")]
    Empty,
    #[error("name must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("name must be at most {max} characters long")]
    TooLong { max: usize },
    #[error("only alphanumeric characters are allowed (got {0:?})")]
    InvalidCharacter(char),
}

impl NameError {
    /// Short headline used for the toast shown to the player.
    pub fn title(&self) -> &'static str {
        match self {
            NameError::Empty => "Name Required",
            NameError::TooShort { .. } => "Name Too Short",
            NameError::TooLong { .. } => "Name Too Long",
            NameError::InvalidCharacter(_) => "Invalid Character",
        }
    }
}

/// A dispatched action whose precondition did not hold. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error("call heads or tails before flipping the coin")]
    TossNotCalled,
    #[error("{0} is not available, the computer already picked its role")]
    RoleUnavailable(Role),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("guess must be between 1 and 6 (got {0})")]
    GuessOutOfRange(u8),
}

impl ActionError {
    pub fn title(&self) -> &'static str {
        match self {
            ActionError::WrongPhase { .. } => "Not Now",
            ActionError::TossNotCalled => "Call The Toss",
            ActionError::RoleUnavailable(_) => "Role Taken",
            ActionError::InvalidName(e) => e.title(),
            ActionError::GuessOutOfRange(_) => "Invalid Number",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_errors_carry_toast_titles() {
        assert_eq!(NameError::Empty.title(), "Name Required");
        assert_eq!(NameError::TooShort { min: 2 }.title(), "Name Too Short");
        assert_eq!(NameError::InvalidCharacter('!').title(), "Invalid Character");
    }

    #[test]
    fn action_error_wraps_name_error_transparently() {
        let err: ActionError = NameError::TooShort { min: 2 }.into();
        assert_eq!(err.title(), "Name Too Short");
        assert_eq!(err.to_string(), "name must be at least 2 characters long");
    }

    #[test]
    fn wrong_phase_message_names_the_phase() {
        let err = ActionError::WrongPhase { action: "make-guess", phase: Phase::Toss };
        assert_eq!(err.to_string(), "make-guess is not allowed during toss");
    }
}
