//! Entry point for the `redraftd` binary.

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match redraftd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Logging may not be installed yet when bootstrap fails.
            writeln!(io::stderr(), "redraftd: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
