#![forbid(unsafe_code)]

use clap::Parser;
use statcat::app;
use statcat::cli::Cli;
use statcat::config::SearchEnv;
use statcat::error::{AppError, EXIT_SUCCESS};
use statcat::signal::{self, CancelToken};
use std::process;

fn main() {
    // clap exits with 2 on usage errors and 0 for --help / --version
    let cli = Cli::parse();

    let token = CancelToken::new();
    if let Err(e) = signal::install(&token) {
        eprintln!("statcat: warning: cannot install signal handler: {}", e);
    }

    let code = match app::run(&cli, &SearchEnv::from_process(), app::debug_from_env(), &token) {
        Ok(()) => EXIT_SUCCESS,
        Err(AppError::Interrupted) => {
            eprintln!("statcat: interrupted");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("statcat: {}", e);
            e.exit_code()
        }
    };

    process::exit(code);
}
