pub mod cli;
pub mod console;
pub mod write;

use blackjack_lib::BlackjackGameError;
use cli::ConfigError;
use log::error;
use std::process::ExitCode;
use thiserror::Error;

pub mod prelude {
    pub use super::{
        cli::{AutoplayCli, PlayCli, TableArgs},
        console::{ConsoleSink, ConsoleSource},
        finish, init_logging,
        write::{write_summary, JsonSink},
        AppError,
    };
}

/// Everything that can end a binary early.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Game(#[from] BlackjackGameError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Initializes logging from `RUST_LOG`, showing warnings and errors by default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Turns the result of a session into the process exit code. A player quitting is a normal exit.
/// With `json` set stdout only carries JSON lines, so the farewell goes to stderr.
pub fn finish(result: Result<(), AppError>, json: bool) -> ExitCode {
    ExitCode::from(exit_status(result, json))
}

fn exit_status(result: Result<(), AppError>, json: bool) -> u8 {
    match result {
        Ok(()) => 0,
        Err(AppError::Game(BlackjackGameError::SessionAbort)) => {
            if json {
                eprintln!("Quitting...");
            } else {
                println!("Quitting...");
            }
            0
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            1
        }
    }
}
