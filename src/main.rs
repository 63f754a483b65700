//! Dasher entry point
//!
//! Usage: `dasher [settings.json]`. Without an argument the path comes from
//! `DASHER_SETTINGS`, then `dasher.json` in the working directory.

use std::process::ExitCode;

use dasher::Settings;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dasher starting...");

    let path = Settings::resolve_path(std::env::args().nth(1));
    let result = Settings::load(&path).and_then(dasher::app::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
