// src/main.rs

use std::process::ExitCode;

use xarmour::errors::XarmourError;
use xarmour::{cli, logging, run};

fn main() -> ExitCode {
    let program = cli::program_name();
    let args = cli::parse();

    if args.version {
        println!("{}", cli::version_string());
        return ExitCode::SUCCESS;
    }

    if let Err(err) = logging::init_logging(args.log_level).map_err(XarmourError::from) {
        eprintln!("{program}: {err:#}");
        return ExitCode::from(err.exit_code());
    }

    match run(args, &program) {
        Ok(end) => ExitCode::from(end.exit_code()),
        Err(err) => {
            eprintln!("{program}: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
