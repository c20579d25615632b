use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Settings;

/// Installs the global subscriber. The TUI owns stdout, so events only go to `log_file`;
/// without one nothing is recorded.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let Some(path) = settings.log_file.as_ref() else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Uses `log_filter` (file, then `HANDCRICKET_LOG_FILTER`); `RUST_LOG` is not consulted.
fn build_filter(settings: &Settings) -> Result<EnvFilter> {
    EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_log_file_means_no_subscriber() {
        assert!(init_tracing(&Settings::default()).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let settings = Settings {
            log_file: Some("/definitely/not/here/handcricket.log".into()),
            ..Settings::default()
        };
        let err = init_tracing(&settings).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }

    #[test]
    fn filter_comes_from_configured_log_filter() {
        let settings = Settings { log_filter: "handcricket=debug".into(), ..Settings::default() };
        assert_eq!(build_filter(&settings).unwrap().to_string().to_lowercase(), "handcricket=debug");
    }

    #[test]
    fn malformed_log_filter_is_reported() {
        let settings = Settings { log_filter: "handcricket=loud".into(), ..Settings::default() };
        let err = build_filter(&settings).unwrap_err();
        assert!(err.to_string().contains("invalid log filter 'handcricket=loud'"));
    }
}
