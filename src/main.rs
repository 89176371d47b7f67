mod config;
mod engine;
mod game;
mod input;
mod render;
mod session;
mod snake;
mod term;

use std::{fs::File, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Settings;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(&settings)?;
    info!(seed = ?settings.seed, "starting");

    let mut game = game::SnakeGame::new(settings.rng()).context("could not set up the terminal")?;
    let res = game.play();

    // Restore before reporting, so errors land on a normal screen
    game.restore().context("could not restore the terminal")?;

    if let Err(err) = &res {
        error!(error = %err, "game loop failed");
    }
    res.context("game loop failed")
}

/// Logs go to a file when asked for, never to the terminal the game draws on.
fn init_logging(settings: &Settings) -> Result<()> {
    let path = match &settings.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .with_context(|| format!("invalid log filter {:?}", settings.log_level))?;
    let log_file = File::create(path).with_context(|| format!("could not create {}", path.display()))?;

    // Don't fail if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
