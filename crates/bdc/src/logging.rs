//! Logging setup.
//!
//! Filter precedence, highest first: `BDC_LOG`, `--verbose` (debug), then `log_level` from the
//! config. Output always goes to stderr so it never mixes with rendered trees on stdout.

use anyhow::Context;
use bdcapp::config::{BdcConfig, LogFormat};
use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "BDC_LOG";

pub fn init(config: &BdcConfig, verbose: bool) -> anyhow::Result<()> {
    let directives = resolve_directives(std::env::var(LOG_ENV).ok(), config, verbose);
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter `{}`", directives))?;

    let base_subscriber = Registry::default().with(filter);
    match config.log_format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }
    Ok(())
}

fn resolve_directives(env: Option<String>, config: &BdcConfig, verbose: bool) -> String {
    match env {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ if verbose => "debug".to_string(),
        _ => config.log_level.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins() {
        let config = BdcConfig::default();
        assert_eq!(
            resolve_directives(Some("bdcapp=trace".into()), &config, true),
            "bdcapp=trace"
        );
    }

    #[test]
    fn test_verbose_over_config() {
        let config = BdcConfig::default();
        assert_eq!(resolve_directives(None, &config, true), "debug");
        assert_eq!(resolve_directives(Some("  ".into()), &config, true), "debug");
    }

    #[test]
    fn test_config_level() {
        let config = BdcConfig {
            log_level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_directives(None, &config, false), "info");
    }
}
