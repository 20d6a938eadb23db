use std::process::ExitCode;

use featured_cakes::Config;
use featured_cakes::pipeline::run;

fn main() -> ExitCode {
    let config = Config::from_cli();
    match run(&config) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
