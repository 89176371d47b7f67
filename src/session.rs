//! Session state: everything one game of snake needs between two ticks.

use derive_more::Display;
use rand::Rng;

use crate::config::{INITIAL_HEAD, INITIAL_LENGTH, STEP, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::snake::{Cell, Direction, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum GameOverCause {
    #[display("hit the wall")]
    Wall,
    #[display("ran into itself")]
    SelfCollision,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Phase {
    #[display("running")]
    Running,
    #[display("game over ({_0})")]
    GameOver(GameOverCause),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) snake: Snake,
    pub(crate) food: Cell,
    pub(crate) score: u32,
    pub(crate) phase: Phase,
}

impl SessionState {
    /// A fresh session: four cells heading right, no score, random food.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let head = Cell::new(INITIAL_HEAD.0, INITIAL_HEAD.1);
        SessionState {
            snake: Snake::new(head, INITIAL_LENGTH, Direction::Right),
            food: random_food(rng),
            score: 0,
            phase: Phase::Running,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    /// Replaces a finished session with a brand new one. A running session
    /// is returned as is.
    pub fn restart<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self.phase {
            Phase::GameOver(_) => SessionState::new(rng),
            Phase::Running => self,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(snake: Snake, food: Cell, score: u32) -> Self {
        SessionState { snake, food, score, phase: Phase::Running }
    }
}

/// Picks a food cell anywhere on the board except the first row and column.
/// The snake's body is not taken into account.
pub fn random_food<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    Cell::new(
        rng.gen_range(1..WINDOW_WIDTH / STEP) * STEP,
        rng.gen_range(1..WINDOW_HEIGHT / STEP) * STEP,
    )
}
