//! Binary entrypoint for the `customer-id` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match customer_id::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
