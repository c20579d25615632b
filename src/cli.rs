use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::config::{load_settings, Settings};
use crate::core::logging::init_tracing;
use crate::core::terminal::{TerminalColor, TerminalPrinter};
use crate::games::hand_cricket::state::{GameResult, GameState, InningsPolicy, Phase};
use crate::games::hand_cricket;

#[derive(Parser)]
#[command(name = "handcricket")]
#[command(about = "🏏 Hand cricket in the terminal: call the toss, pick 1-6, don't get caught out")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags that win over the config file and the environment
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Path to a TOML config file (default: ./handcricket.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed the computer's coin and picks for a reproducible game
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Match format: "single" ends on the first dismissal, "two" plays both innings
    #[arg(short, long, global = true)]
    pub innings: Option<InningsPolicy>,

    /// Hand the bat over after every scoring delivery
    #[arg(long, global = true)]
    pub alternate_turns: bool,

    /// Pre-fill the name on the welcome screen
    #[arg(short, long, global = true)]
    pub name: Option<String>,
}

impl Overrides {
    /// Layers the flags over `settings` and checks the final rule set.
    pub fn apply(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(innings) = self.innings {
            settings.rules.innings = innings;
        }
        if self.alternate_turns {
            settings.rules.alternate_turns = true;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Play a game (the default)
    Play,
    /// Print the rules and the active match settings
    Rules,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.overrides.config.as_deref())?;
    let settings = cli.overrides.apply(settings)?;
    init_tracing(&settings)?;
    info!(?settings, "settings loaded");

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let terminal = ratatui::try_init().context("failed to initialise terminal")?;
            let result = hand_cricket::run_game(&settings, cli.overrides.name.clone(), terminal).await;
            ratatui::restore();

            let state = result?;
            if state.phase == Phase::GameOver {
                print_scorecard(&state).context("failed to print scorecard")?;
            }
        }
        Commands::Rules => print_rules(&settings).context("failed to print rules")?,
    }

    Ok(())
}

fn print_rules(settings: &Settings) -> std::io::Result<()> {
    let mut out = TerminalPrinter::stdout();
    out.print_colored_line("🏏 Guess & Toss Showdown", TerminalColor::Cyan)?;
    out.empty_line()?;
    for rule in [
        "• Win the toss to choose attack (bat first) or defense (bowl first)",
        "• Lose the toss and the computer defends, so you attack",
        "• Each delivery both sides pick a number 1-6",
        "• If the numbers match, the batter is OUT",
        "• Otherwise the batter adds their own number to their score",
    ] {
        out.print_line(rule)?;
    }
    out.empty_line()?;

    let format = match settings.rules.innings {
        InningsPolicy::Single => "single innings: the first dismissal ends the match",
        InningsPolicy::Two => "two innings: each side bats once, higher score wins",
    };
    out.print_line(&format!("Format: {format}"))?;
    out.print_line(&format!(
        "Turns: {}",
        if settings.rules.alternate_turns {
            "the bat changes hands after every scoring delivery"
        } else {
            "the batter keeps batting until out"
        }
    ))?;
    if let Some(seed) = settings.seed {
        out.print_line(&format!("Seed: {seed}"))?;
    }
    out.flush()
}

fn print_scorecard(state: &GameState) -> std::io::Result<()> {
    let mut out = TerminalPrinter::stdout();
    let (banner, color) = match state.game_result {
        Some(GameResult::Win) => ("🏆 You Won!", TerminalColor::Green),
        Some(GameResult::Tie) => ("🤝 It's a Tie!", TerminalColor::Yellow),
        _ => ("💔 You Lost!", TerminalColor::Red),
    };
    out.print_colored_line(banner, color)?;
    out.print_line(&format!(
        "{} {}  VS  Computer {}",
        state.player_name, state.player_score, state.computer_score
    ))?;
    out.print_line(&format!("Rounds: {}", state.current_round))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hand_cricket::state::Rules;

    #[test]
    fn no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["handcricket"]).unwrap();
        assert_eq!(cli.command.unwrap_or(Commands::Play), Commands::Play);
    }

    #[test]
    fn parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "handcricket", "rules", "--seed", "9", "--innings", "two", "--alternate-turns",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Rules));
        assert_eq!(cli.overrides.seed, Some(9));
        assert_eq!(cli.overrides.innings, Some(InningsPolicy::Two));
        assert!(cli.overrides.alternate_turns);
    }

    #[test]
    fn rejects_unknown_innings() {
        assert!(Cli::try_parse_from(["handcricket", "--innings", "five"]).is_err());
    }

    #[test]
    fn flags_win_over_loaded_settings() {
        let loaded = Settings {
            seed: Some(1),
            rules: Rules { innings: InningsPolicy::Two, alternate_turns: false },
            ..Settings::default()
        };
        let overrides = Overrides {
            seed: Some(5),
            innings: Some(InningsPolicy::Single),
            alternate_turns: true,
            ..Overrides::default()
        };
        let settings = overrides.apply(loaded).unwrap();
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.rules, Rules { innings: InningsPolicy::Single, alternate_turns: true });
    }

    #[test]
    fn absent_flags_keep_loaded_settings() {
        let loaded = Settings { seed: Some(1), ..Settings::default() };
        assert_eq!(Overrides::default().apply(loaded.clone()).unwrap(), loaded);
    }

    #[test]
    fn alternate_turns_flag_conflicts_with_two_innings() {
        let loaded = Settings {
            rules: Rules { innings: InningsPolicy::Two, alternate_turns: false },
            ..Settings::default()
        };
        let overrides = Overrides { alternate_turns: true, ..Overrides::default() };
        assert!(overrides.apply(loaded.clone()).is_err());

        let from_file = Settings {
            rules: Rules { innings: InningsPolicy::Two, alternate_turns: true },
            ..Settings::default()
        };
        let single = Overrides { innings: Some(InningsPolicy::Single), ..Overrides::default() };
        assert_eq!(
            single.apply(from_file).unwrap().rules,
            Rules { innings: InningsPolicy::Single, alternate_turns: true }
        );
    }
}
