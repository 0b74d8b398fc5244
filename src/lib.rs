//! Core library entry for the `customer-id` CLI.
//!
//! Customer IDs are short digit strings composed from region, category,
//! company serial, extra-region and branch fields. The record table of
//! assigned IDs lives in one of several backends behind the
//! [`ports::RecordStore`] port.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod customer;
pub mod logging;
pub mod ports;
pub mod store;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    logging::init();
    commands::dispatch(&cli)
}
