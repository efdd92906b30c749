//! Library side of the `spdx-expr` command line tool.
//!
//! The binary wires these pieces together: [`cli`] defines the arguments,
//! [`config`] merges them with environment variables, [`logging`] installs
//! the diagnostics subscriber and [`commands`] runs the chosen command
//! against a [`spdx_license_list::LicenseList`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
