//! Logger setup for the binary.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::error::{ConfigError, Result};

/// Installs the global logger.
///
/// Terminal only: `env_logger` at `info`, overridable with `RUST_LOG`.
/// With a log file: terminal at `info` plus the file at `debug`.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()?;
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, simplelog::Config::default(), file),
    ])?;
    Ok(())
}
