//! Command line definition.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use crate::config::LogLevel;

/// Parse, verify and compare SPDX license expressions.
#[derive(Parser, Debug)]
#[command(name = "spdx-expr", version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory holding `licenses.json` and `exceptions.json`, tried before
    /// the bundled snapshot.
    #[arg(long, global = true, value_name = "DIR")]
    pub license_dir: Option<Utf8PathBuf>,

    /// Use only the bundled license list snapshot.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the canonical form of an expression.
    Parse {
        /// License expression.
        expression: String,
        /// Print the expression tree as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Report deprecated or malformed identifiers in an expression.
    Verify {
        /// License expression.
        expression: String,
    },
    /// Report whether two expressions are equal and equivalent.
    Compare {
        /// First expression.
        left: String,
        /// Second expression.
        right: String,
    },
    /// List license ids, or exception ids with `--exceptions`.
    Licenses {
        /// List exceptions instead of licenses.
        #[arg(long)]
        exceptions: bool,
        /// Only ids containing this text, ignoring case.
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spdx-expr").chain(args.iter().copied()))
            .unwrap_or_else(|err| panic!("arguments {args:?}: {err}"))
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["parse", "MIT"], Command::Parse { expression: "MIT".into(), json: false })]
    #[case(&["parse", "--json", "MIT"], Command::Parse { expression: "MIT".into(), json: true })]
    #[case(&["verify", "GPL-2.0"], Command::Verify { expression: "GPL-2.0".into() })]
    #[case(
        &["compare", "MIT OR ISC", "ISC OR MIT"],
        Command::Compare { left: "MIT OR ISC".into(), right: "ISC OR MIT".into() }
    )]
    #[case(
        &["licenses", "--exceptions", "--filter", "gcc"],
        Command::Licenses { exceptions: true, filter: Some("gcc".into()) }
    )]
    fn parses_subcommands(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(parse(args).command, expected);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&["licenses", "--offline", "--log-level", "debug", "--license-dir", "/srv"]);
        assert!(cli.offline);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.license_dir.as_deref().map(camino::Utf8Path::as_str), Some("/srv"));
    }

    #[test]
    fn rejects_unknown_log_levels() {
        assert!(Cli::try_parse_from(["spdx-expr", "--log-level", "loud", "licenses"]).is_err());
    }
}
