use std::process::ExitCode;

use pairplot::error::AppError;

fn main() -> ExitCode {
    env_logger::init();

    match pairplot::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::MissingArgument(e)) => e.exit(),
        Err(err @ AppError::Load(_)) => {
            // Load failures are reported on stdout.
            log::error!("Failed to load file: {err}");
            println!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
