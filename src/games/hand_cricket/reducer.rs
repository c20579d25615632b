use crate::games::hand_cricket::error::ActionError;
use crate::games::hand_cricket::name::validate_name;
use crate::games::hand_cricket::state::{
    CoinSide, GameResult, GameState, Guess, Innings, InningsPolicy, Phase, Role, Rules,
    COMPUTER_TOSS_ROLE,
};

/// Everything that can happen to a game. The set is closed; views only ever produce these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetPlayerName(String),
    SetTossChoice(CoinSide),
    /// Carries the outcome already drawn by the opponent.
    PerformToss(CoinSide),
    SetRole(Role),
    StartGame,
    MakeGuess { player: Guess, computer: Guess },
    EndGame(GameResult),
    ResetGame,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPlayerName(_) => "set-name",
            Action::SetTossChoice(_) => "set-toss-choice",
            Action::PerformToss(_) => "perform-toss",
            Action::SetRole(_) => "set-role",
            Action::StartGame => "start-game",
            Action::MakeGuess { .. } => "make-guess",
            Action::EndGame(_) => "end-game",
            Action::ResetGame => "reset-game",
        }
    }
}

fn require_phase(state: &GameState, action: &Action, phase: Phase) -> Result<(), ActionError> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(ActionError::WrongPhase { action: action.name(), phase: state.phase })
    }
}

/// Computes the state that follows `action`. Never touches `state`; on error the caller keeps it.
pub fn reduce(state: &GameState, action: &Action, rules: &Rules) -> Result<GameState, ActionError> {
    match action {
        Action::SetPlayerName(raw) => {
            require_phase(state, action, Phase::Welcome)?;
            let player_name = validate_name(raw)?;
            Ok(GameState { player_name, phase: Phase::Toss, ..state.clone() })
        }

        Action::SetTossChoice(side) => {
            require_phase(state, action, Phase::Toss)?;
            Ok(GameState { player_choice: Some(*side), ..state.clone() })
        }

        Action::PerformToss(outcome) => {
            require_phase(state, action, Phase::Toss)?;
            let choice = state.player_choice.ok_or(ActionError::TossNotCalled)?;
            Ok(GameState {
                toss_result: Some(*outcome),
                player_won_toss: choice == *outcome,
                phase: Phase::RoleSelect,
                ..state.clone()
            })
        }

        Action::SetRole(role) => {
            require_phase(state, action, Phase::RoleSelect)?;
            if !state.player_won_toss && *role == COMPUTER_TOSS_ROLE {
                return Err(ActionError::RoleUnavailable(*role));
            }
            let attacking = *role == Role::Attack;
            Ok(GameState {
                is_player_attacking: attacking,
                is_player_turn: attacking,
                phase: Phase::Playing,
                ..state.clone()
            })
        }

        Action::StartGame => {
            require_phase(state, action, Phase::RoleSelect)?;
            if state.player_won_toss {
                return Ok(GameState { phase: Phase::Playing, ..state.clone() });
            }
            // The computer has already taken its role; the player gets the other one.
            let attacking = COMPUTER_TOSS_ROLE.opposite() == Role::Attack;
            Ok(GameState {
                is_player_attacking: attacking,
                is_player_turn: attacking,
                phase: Phase::Playing,
                ..state.clone()
            })
        }

        Action::MakeGuess { player, computer } => {
            require_phase(state, action, Phase::Playing)?;
            Ok(play_delivery(state, *player, *computer, rules))
        }

        Action::EndGame(result) => {
            require_phase(state, action, Phase::Playing)?;
            Ok(GameState { game_result: Some(*result), phase: Phase::GameOver, ..state.clone() })
        }

        Action::ResetGame => Ok(GameState::default()),
    }
}

fn play_delivery(state: &GameState, player: Guess, computer: Guess, rules: &Rules) -> GameState {
    let mut next = state.clone();

    if player != computer {
        if state.is_player_turn {
            next.player_score += u32::from(player.value());
        } else {
            next.computer_score += u32::from(computer.value());
        }
        next.current_round += 1;
        if rules.alternate_turns {
            next.is_player_turn = !state.is_player_turn;
        }
        return next;
    }

    // The batter is out.
    match (rules.innings, state.innings) {
        (InningsPolicy::Single, _) => {
            next.game_result = Some(if state.is_player_turn { GameResult::Lose } else { GameResult::Win });
            next.phase = Phase::GameOver;
        }
        (InningsPolicy::Two, Innings::First) => {
            next.innings = Innings::Second;
            next.is_player_turn = !state.is_player_turn;
        }
        (InningsPolicy::Two, Innings::Second) => {
            next.game_result = Some(match state.player_score.cmp(&state.computer_score) {
                std::cmp::Ordering::Greater => GameResult::Win,
                std::cmp::Ordering::Less => GameResult::Lose,
                std::cmp::Ordering::Equal => GameResult::Tie,
            });
            next.phase = Phase::GameOver;
        }
    }
    next
}
