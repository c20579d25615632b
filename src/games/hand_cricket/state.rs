use std::fmt;

use serde::Deserialize;

use crate::games::hand_cricket::error::ActionError;

pub const MIN_GUESS: u8 = 1;
pub const MAX_GUESS: u8 = 6;

/// Role the computer takes whenever it wins the toss.
pub const COMPUTER_TOSS_ROLE: Role = Role::Defense;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Welcome,
    Toss,
    RoleSelect,
    Playing,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Welcome => "welcome",
            Phase::Toss => "toss",
            Phase::RoleSelect => "role-select",
            Phase::Playing => "playing",
            Phase::GameOver => "game-over",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoinSide::Heads => "Heads",
            CoinSide::Tails => "Tails",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attack,
    Defense,
}

impl Role {
    pub fn opposite(self) -> Role {
        match self {
            Role::Attack => Role::Defense,
            Role::Defense => Role::Attack,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Attack => "attack",
            Role::Defense => "defense",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Lose,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Innings {
    #[default]
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

/// A single pick in the range 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guess(u8);

impl Guess {
    pub fn new(value: u8) -> Result<Self, ActionError> {
        if (MIN_GUESS..=MAX_GUESS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ActionError::GuessOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Guess> {
        (MIN_GUESS..=MAX_GUESS).map(Guess)
    }
}

impl TryFrom<u8> for Guess {
    type Error = ActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Guess::new(value)
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a match is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsPolicy {
    /// The first dismissal ends the match.
    #[default]
    Single,
    /// Each side bats once; scores are compared after the second dismissal.
    Two,
}

impl std::str::FromStr for InningsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(InningsPolicy::Single),
            "two" | "2" => Ok(InningsPolicy::Two),
            other => Err(format!("unknown innings policy '{other}' (expected 'single' or 'two')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub innings: InningsPolicy,
    /// Hand the bat over after every scoring delivery instead of letting the batter continue.
    pub alternate_turns: bool,
}

/// The whole game, as seen by the reducer. Replaced, never mutated, on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub player_name: String,
    pub is_player_turn: bool,
    pub is_player_attacking: bool,
    pub player_score: u32,
    pub computer_score: u32,
    pub current_round: u32,
    pub game_result: Option<GameResult>,
    pub toss_result: Option<CoinSide>,
    pub player_choice: Option<CoinSide>,
    pub player_won_toss: bool,
    pub innings: Innings,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: Phase::Welcome,
            player_name: String::new(),
            is_player_turn: false,
            is_player_attacking: false,
            player_score: 0,
            computer_score: 0,
            current_round: 1,
            game_result: None,
            toss_result: None,
            player_choice: None,
            player_won_toss: false,
            innings: Innings::First,
        }
    }
}

impl GameState {
    pub fn batting_side(&self) -> Side {
        if self.is_player_turn {
            Side::Player
        } else {
            Side::Computer
        }
    }

    pub fn batter_name(&self) -> &str {
        match self.batting_side() {
            Side::Player => &self.player_name,
            Side::Computer => "Computer",
        }
    }

    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Computer => self.computer_score,
        }
    }

    /// Score the chasing side has to pass. Only meaningful in the second innings.
    pub fn target(&self) -> Option<u32> {
        match self.innings {
            Innings::First => None,
            Innings::Second => {
                let defending = match self.batting_side() {
                    Side::Player => Side::Computer,
                    Side::Computer => Side::Player,
                };
                Some(self.score_of(defending) + 1)
            }
        }
    }

    pub fn available_roles(&self) -> Vec<Role> {
        if self.phase != Phase::RoleSelect {
            return Vec::new();
        }
        if self.player_won_toss {
            vec![Role::Attack, Role::Defense]
        } else {
            vec![COMPUTER_TOSS_ROLE.opposite()]
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_session_start() {
        let state = GameState::default();
        assert_eq!(state.phase, Phase::Welcome);
        assert_eq!(state.current_round, 1);
        assert!(state.game_result.is_none());
        assert!(!state.player_won_toss);
        assert_eq!(state.innings, Innings::First);
    }

    #[test]
    fn guess_rejects_out_of_range_values() {
        assert_eq!(Guess::new(0), Err(ActionError::GuessOutOfRange(0)));
        assert_eq!(Guess::new(7), Err(ActionError::GuessOutOfRange(7)));
        assert_eq!(Guess::all().map(Guess::value).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn target_is_defending_score_plus_one_in_second_innings() {
        let mut state = GameState {
            player_score: 14,
            computer_score: 3,
            is_player_turn: false,
            ..GameState::default()
        };
        assert_eq!(state.target(), None);

        state.innings = Innings::Second;
        assert_eq!(state.target(), Some(15));
    }

    #[test]
    fn losing_the_toss_leaves_only_attack() {
        let state = GameState {
            phase: Phase::RoleSelect,
            player_won_toss: false,
            ..GameState::default()
        };
        assert_eq!(state.available_roles(), vec![Role::Attack]);
    }

    #[test]
    fn innings_policy_parses_from_cli_strings() {
        assert_eq!("two".parse::<InningsPolicy>(), Ok(InningsPolicy::Two));
        assert_eq!(" Single ".parse::<InningsPolicy>(), Ok(InningsPolicy::Single));
        assert!("three".parse::<InningsPolicy>().is_err());
    }
}
