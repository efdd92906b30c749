//! `spdx-expr`: parse, verify and compare SPDX license expressions.

use clap::Parser;
use eyre::{Context, Result};
use spdx_expr_cli::cli::Cli;
use spdx_expr_cli::commands::run;
use spdx_expr_cli::config::CliConfig;
use spdx_expr_cli::logging::init_logging;
use spdx_license_list::LicenseList;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(&config);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.license_list.source().describe(),
        "starting spdx-expr"
    );

    let registry = LicenseList::from_config(&config.license_list);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &registry, &mut out)
}

fn build_config(cli: &Cli) -> Result<CliConfig> {
    let config = CliConfig::from_env().wrap_err("failed to read configuration")?;
    Ok(config.apply_overrides(cli.log_level, cli.license_dir.clone(), cli.offline))
}
