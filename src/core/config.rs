use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::games::hand_cricket::state::{InningsPolicy, Rules};

pub const DEFAULT_CONFIG_PATH: &str = "handcricket.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: Rules,
    pub seed: Option<u64>,
    pub tick_ms: u64,
    pub toast_ms: u64,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            seed: None,
            tick_ms: 100,
            toast_ms: 2500,
            log_file: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Rejects rule combinations the match model cannot score.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !(self.rules.innings == InningsPolicy::Two && self.rules.alternate_turns),
            "alternate_turns cannot be combined with two innings: each side bats through its own innings"
        );
        Ok(())
    }
}

/// Reads the TOML file and then applies `HANDCRICKET_*` environment overrides.
///
/// An explicit `path` must exist; the default `handcricket.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => parse_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                parse_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env(settings, |key| std::env::var(key).ok())
}

fn parse_file(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    parse_settings(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

pub fn parse_settings(raw: &str) -> Result<Settings> {
    Ok(toml::from_str(raw)?)
}

pub(crate) fn apply_env<F>(mut settings: Settings, var: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var("HANDCRICKET_SEED") {
        settings.seed = Some(
            v.trim()
                .parse::<u64>()
                .with_context(|| format!("HANDCRICKET_SEED is not a number: '{v}'"))?,
        );
    }
    if let Some(v) = var("HANDCRICKET_INNINGS") {
        settings.rules.innings = v.parse::<InningsPolicy>().map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = var("HANDCRICKET_ALTERNATE_TURNS") {
        settings.rules.alternate_turns = parse_flag("HANDCRICKET_ALTERNATE_TURNS", &v)?;
    }
    if let Some(v) = var("HANDCRICKET_LOG_FILE") {
        settings.log_file = if v.is_empty() { None } else { Some(PathBuf::from(v)) };
    }
    if let Some(v) = var("HANDCRICKET_LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} is not a boolean: '{value}'"),
    }
}
