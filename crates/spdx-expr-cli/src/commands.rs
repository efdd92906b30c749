//! Command implementations.
//!
//! Each command writes its result to the supplied writer; diagnostics go
//! through `tracing`. Expressions are parsed into a scratch document so
//! `LicenseRef-` ids resolve without a real document on disk.

use std::io::Write;

use eyre::{Context, Result};
use spdx_document::{DocumentNamespace, SpdxDocument};
use spdx_expression::{AnyLicenseInfo, LicenseRegistry};
use spdx_license_list::LicenseList;

use crate::cli::Command;

const SCRATCH_NAMESPACE: &str = "https://spdx.org/spdxdocs/spdx-expr-scratch";

/// Run `command` against `registry`, writing results to `out`.
///
/// # Errors
/// Returns an error when an expression does not parse or `out` cannot be
/// written.
pub fn run<W: Write>(command: &Command, registry: &LicenseList, out: &mut W) -> Result<()> {
    let document = SpdxDocument::new(DocumentNamespace::new(SCRATCH_NAMESPACE)?);
    match command {
        Command::Parse { expression, json } => {
            let expr = parse(&document, registry, expression)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&expr)?)?;
            } else {
                writeln!(out, "{expr}")?;
            }
        }
        Command::Verify { expression } => {
            let expr = parse(&document, registry, expression)?;
            let warnings = expr.verify();
            if warnings.is_empty() {
                writeln!(out, "{expr}: valid")?;
            }
            for warning in &warnings {
                tracing::debug!(%expr, %warning, "verification warning");
                writeln!(out, "warning: {warning}")?;
            }
        }
        Command::Compare { left, right } => {
            let left = parse(&document, registry, left)?;
            let right = parse(&document, registry, right)?;
            writeln!(out, "equal: {}", left == right)?;
            writeln!(out, "equivalent: {}", left.equivalent(&right))?;
        }
        Command::Licenses { exceptions, filter } => {
            let ids = if *exceptions {
                registry.exception_ids()
            } else {
                registry.license_ids()
            };
            let needle = filter.as_deref().map(str::to_lowercase);
            for id in ids.iter().filter(|id| {
                needle
                    .as_deref()
                    .is_none_or(|needle| id.to_lowercase().contains(needle))
            }) {
                writeln!(out, "{id}")?;
            }
        }
    }
    Ok(())
}

fn parse<R: LicenseRegistry + ?Sized>(
    document: &SpdxDocument,
    registry: &R,
    expression: &str,
) -> Result<AnyLicenseInfo> {
    document
        .parse_license(expression, registry)
        .wrap_err_with(|| format!("failed to parse license expression `{expression}`"))
}
