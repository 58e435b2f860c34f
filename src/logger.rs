//! The terminal belongs to the UI while the app runs, so log records go to a
//! file instead of stderr.

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::config::Config;
use crate::error::AppResult;

pub fn init_logger(config: &Config) -> AppResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .init();

    Ok(())
}
