use std::fs::File;
use std::path::Path;

use anyhow::Context;
use simplelog::{
  ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger,
  TerminalMode, WriteLogger,
};

/// Install the global logger: stderr, plus `file` when given.
pub fn init(level: LevelFilter, file: Option<&Path>) -> anyhow::Result<()> {
  let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
    level,
    Config::default(),
    TerminalMode::Stderr,
    ColorChoice::Auto,
  )];

  if let Some(path) = file {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    loggers.push(WriteLogger::new(level, Config::default(), file));
  }

  CombinedLogger::init(loggers).context("installing logger")
}
