use std::{thread::sleep, time::{Duration, Instant}};

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::{GAME_OVER_TICKS_PER_SEC, POLL_INTERVAL, RUNNING_TICKS_PER_SEC, WINDOW_TITLE};
use crate::engine;
use crate::input::{self, Command};
use crate::render::Renderer;
use crate::session::{Phase, SessionState};
use crate::term::{TermError, TermManager};

/// How often the session advances in a given phase. Game over still ticks,
/// only slower, so the menu keeps reacting to keys.
pub fn tick_interval(phase: Phase) -> Duration {
    let per_sec = match phase {
        Phase::Running => RUNNING_TICKS_PER_SEC,
        Phase::GameOver(_) => GAME_OVER_TICKS_PER_SEC,
    };
    Duration::from_millis(1000 / per_sec)
}

pub struct SnakeGame {
    term: TermManager,
    renderer: Renderer,
    rng: StdRng,
}

impl SnakeGame {
    /// Grabs the terminal. Fails before touching the screen if the terminal
    /// can't hold the board.
    pub fn new(rng: StdRng) -> Result<Self, TermError> {
        let mut term = TermManager::new()?;
        let renderer = Renderer::new(term.get_terminal_size())?;
        term.setup(WINDOW_TITLE)?;
        Ok(SnakeGame { term, renderer, rng })
    }

    /// Runs sessions back to back until the player quits.
    pub fn play(&mut self) -> Result<(), TermError> {
        let mut state = SessionState::new(&mut self.rng);
        info!(food = %state.food(), "session started");
        self.redraw(&state)?;

        let mut last_step = Instant::now();

        loop {
            sleep(POLL_INTERVAL);

            for key_ev in self.term.read_key_events_queue()? {
                match input::command_for(&key_ev, state.phase()) {
                    Some(Command::Quit) => {
                        info!(score = state.score(), phase = %state.phase(), "quit");
                        return Ok(());
                    }
                    Some(Command::Turn(dir)) => {
                        state.request_direction(dir);
                        debug!(requested = %dir, pending = %state.snake().pending_direction(), "turn");
                    }
                    Some(Command::Restart) => {
                        info!(previous_score = state.score(), "restart");
                        state = state.restart(&mut self.rng);
                        self.term.hide_message()?;
                        self.renderer.draw_frame(&mut self.term, &state)?;
                        last_step = Instant::now();
                    }
                    None => {}
                }
            }

            if last_step.elapsed() < tick_interval(state.phase()) {
                continue;
            }
            last_step = Instant::now();

            match state.phase() {
                Phase::Running => {
                    state = engine::tick(state, &mut self.rng);
                    self.renderer.draw_frame(&mut self.term, &state)?;
                }
                Phase::GameOver(_) => {
                    if !self.term.has_message() {
                        self.renderer.draw_game_over(&mut self.term, &state)?;
                    }
                }
            }
        }
    }

    pub fn restore(&mut self) -> Result<(), TermError> {
        Ok(self.term.restore()?)
    }

    fn redraw(&mut self, state: &SessionState) -> Result<(), TermError> {
        self.term.clear()?;
        self.renderer.draw_board(&mut self.term)?;
        self.renderer.draw_frame(&mut self.term, state)?;
        Ok(())
    }
}
