mod aggregate;
mod config;
mod db;
mod error;
mod import;
mod models;
mod run;
mod store;
mod tracker;

use std::io::stderr;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() -> Result<()> {
    let config = config::Config::from_env()?;
    setup_logging(config.log_level);

    config.ensure_data_dir()?;
    let db = db::Database::open(&config.db_path)?;

    let args: Vec<String> = std::env::args().collect();
    run::as_cli(&args, db)
}

fn setup_logging(level: LevelFilter) {
    // stdout carries command output; logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
