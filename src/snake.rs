use std::collections::VecDeque;

use derive_more::Display;

use crate::config::{STEP, WINDOW_HEIGHT, WINDOW_WIDTH};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -STEP),
            Down => (0, STEP),
            Left => (-STEP, 0),
            Right => (STEP, 0),
        }
    }
}

/// A grid position in board units. Valid cells are multiples of `STEP`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[display("[{x},{y}]")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..=WINDOW_WIDTH - STEP).contains(&self.x) && (0..=WINDOW_HEIGHT - STEP).contains(&self.y)
    }
}

/// The snake's cells, head first, plus its committed and requested headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Lays out `size` cells trailing behind `head`, opposite to `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |cell| Some(cell.step(back))).take(size.max(1));
        Snake::from_cells(body, direction)
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body, direction, pending_direction: direction }
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Queues a turn for the next move. Reversing into the neck is ignored.
    pub fn request_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.pending_direction = new_direction;
        }
    }

    /// Commits the pending turn and prepends the new head. The tail stays
    /// until `retract_tail` is called, so by default the snake grows.
    pub fn advance(&mut self) -> Cell {
        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        new_head
    }

    pub fn retract_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }
}
