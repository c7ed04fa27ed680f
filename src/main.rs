//! Shuttle binary entry point.

use std::process::ExitCode;

use shuttle::cli;
use shuttle::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
