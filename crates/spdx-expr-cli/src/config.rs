//! Tool configuration parsed from environment variables.
//!
//! - `SPDX_EXPR_LOG_LEVEL`: diagnostics level (trace, debug, info, warn,
//!   error).
//! - `SPDX_LICENSE_LIST_DIR` and `SPDX_ONLY_USE_LOCAL_LICENSES`: see
//!   [`LicenseListConfig`].
//!
//! Command-line flags override environment values.

use std::str::FromStr;

use camino::Utf8PathBuf;
use spdx_license_list::LicenseListConfig;

use crate::error::CliError;

/// Variable selecting the diagnostics level.
pub const LOG_LEVEL_VAR: &str = "SPDX_EXPR_LOG_LEVEL";

/// Diagnostics level, mirroring the `tracing` levels.
///
/// Defaults to `Warn` so registry fallbacks are reported without noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-token detail.
    Trace,
    /// Registry population and id allocation.
    Debug,
    /// Informational messages.
    Info,
    /// Fallbacks and deprecated input.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// The matching `tracing` filter directive.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Diagnostics level.
    pub log_level: LogLevel,
    /// Where the license list comes from.
    pub license_list: LicenseListConfig,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`CliError::InvalidConfig`] when `SPDX_EXPR_LOG_LEVEL` is not a
    /// known level.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    /// Returns [`CliError::InvalidConfig`] when the log level is not a known
    /// level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|value| value.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            log_level,
            license_list: LicenseListConfig::from_lookup(&lookup),
        })
    }

    /// Apply command-line overrides on top of environment-derived values.
    ///
    /// `offline` only ever switches the bundled-only mode on.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        license_dir: Option<Utf8PathBuf>,
        offline: bool,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.license_list = self
            .license_list
            .apply_overrides(license_dir, offline.then_some(true));
        self
    }
}
