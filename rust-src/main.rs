//! Subsplit CLI - shared subscription payment tracking.

mod aggregation;
mod auth;
mod cli;
mod commands;
mod config;
mod export;
mod ledger;
mod models;
mod storage;


fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
