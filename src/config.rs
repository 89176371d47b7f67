use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

/// Distance the snake travels in one tick, and the size of a grid cell.
pub const STEP: i32 = 10;
pub const WINDOW_WIDTH: i32 = 720;
pub const WINDOW_HEIGHT: i32 = 480;

pub const GRID_COLS: i32 = WINDOW_WIDTH / STEP;
pub const GRID_ROWS: i32 = WINDOW_HEIGHT / STEP;

pub const SCORE_INCREMENT: u32 = 10;

pub const INITIAL_HEAD: (i32, i32) = (100, 50);
pub const INITIAL_LENGTH: usize = 4;

pub const RUNNING_TICKS_PER_SEC: u64 = 15;
pub const GAME_OVER_TICKS_PER_SEC: u64 = 10;

/// How long the main loop sleeps between two input polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub const WINDOW_TITLE: &str = "Snake Game";

/// Runtime options. Everything about the board itself is fixed above.
#[derive(Debug, Clone, Parser)]
#[command(name = "snake", version, about = "Classic snake in the terminal")]
pub struct Settings {
    /// Seed for food placement, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
