use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context;
use tracing::Level;

/// Sends traces to `path`. The terminal belongs to the game, so without a
/// log file nothing is recorded.
pub fn init(path: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();

    Ok(())
}
