//! Diagnostics for the command line tool.
//!
//! Output goes to stderr so stdout carries only command results. Records
//! emitted through the `log` facade by the library crates are forwarded to
//! the same subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global subscriber for `config`.
///
/// Level precedence, highest first: `--log-level`, `SPDX_EXPR_LOG_LEVEL`,
/// then the default of `warn`. A subscriber that is already installed is
/// left in place.
pub fn init_logging(config: &CliConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn init_logging_is_idempotent() {
        let config = CliConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_uses_config_log_level() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Debug), None, false);
        assert_eq!(filter_from_config(&config).to_string(), "debug");
    }
}
