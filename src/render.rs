//! Draws a session onto the terminal.
//!
//! Each character cell shows two board rows stacked on top of each other
//! using an upper half block, so the 72x48 board fits in 72x24 characters.

use std::io;

use crossterm::style::Color;

use crate::config::{GRID_COLS, GRID_ROWS, STEP};
use crate::session::SessionState;
use crate::snake::Cell;
use crate::term::{Glyph, TermError, TermManager};
use crate::{Coords, TermInt};

const BOARD_COLS: TermInt = GRID_COLS as TermInt;
const BOARD_ROWS: TermInt = (GRID_ROWS as TermInt + 1) / 2;

/// Board plus its border.
const FRAME_SIZE: Coords = (BOARD_COLS + 2, BOARD_ROWS + 2);
/// Frame plus the score line above it.
const REQUIRED_SIZE: Coords = (FRAME_SIZE.0, FRAME_SIZE.1 + 1);

const HALF_BLOCK: char = '▀';

const BACKGROUND: Color = Color::Rgb { r: 138, g: 43, b: 226 };
const HEAD: Color = Color::Rgb { r: 0, g: 200, b: 0 };
const BODY: Color = Color::Rgb { r: 100, g: 200, b: 100 };
const FOOD: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const BORDER: Color = Color::White;
const SCORE: Color = Color::White;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Head,
    Body,
    Food,
}

impl Tile {
    fn color(self) -> Color {
        match self {
            Tile::Empty => BACKGROUND,
            Tile::Head => HEAD,
            Tile::Body => BODY,
            Tile::Food => FOOD,
        }
    }
}

/// Row-major tiles of the whole board. Cells off the board (a head that
/// went through the wall) are skipped. Food is painted last.
pub fn tiles(state: &SessionState) -> Vec<Tile> {
    let mut tiles = vec![Tile::Empty; (GRID_COLS * GRID_ROWS) as usize];
    let mut paint = |cell: Cell, tile: Tile| {
        if let Some(idx) = tile_index(cell) {
            tiles[idx] = tile;
        }
    };

    for cell in state.snake().cells().skip(1) {
        paint(cell, Tile::Body);
    }
    paint(state.snake().head(), Tile::Head);
    paint(state.food(), Tile::Food);

    tiles
}

fn tile_index(cell: Cell) -> Option<usize> {
    if cell.in_bounds() {
        Some(((cell.y / STEP) * GRID_COLS + cell.x / STEP) as usize)
    } else {
        None
    }
}

fn glyph(top: Tile, bottom: Tile) -> Glyph {
    Glyph::new(HALF_BLOCK, top.color(), bottom.color())
}

pub fn score_line(score: u32) -> String {
    format!("Score: {:<10}", score)
}

pub fn game_over_lines(score: u32) -> Vec<(String, Color)> {
    vec![
        ("GAME OVER!".to_string(), Color::Red),
        (format!("Score: {}", score), Color::Yellow),
        (String::new(), Color::White),
        ("Press R - RESTART".to_string(), Color::Green),
        ("Press Q - QUIT".to_string(), Color::Red),
    ]
}

pub struct Renderer {
    origin: Coords,
}

impl Renderer {
    /// Centers the board in a terminal of `term_size`.
    pub fn new(term_size: Coords) -> Result<Self, TermError> {
        let (width, height) = term_size;
        let (need_width, need_height) = REQUIRED_SIZE;
        if width < need_width || height < need_height {
            return Err(TermError::TooSmall { width, height, need_width, need_height });
        }

        let origin = ((width - need_width) / 2, (height - need_height) / 2);
        Ok(Renderer { origin })
    }

    fn frame_origin(&self) -> Coords {
        (self.origin.0, self.origin.1 + 1)
    }

    /// Terminal position of the character showing board column `col`,
    /// character row `row`.
    fn screen_pos(&self, col: TermInt, row: TermInt) -> Coords {
        let frame = self.frame_origin();
        (frame.0 + 1 + col, frame.1 + 1 + row)
    }

    pub fn draw_board(&self, term: &mut TermManager) -> io::Result<()> {
        term.draw_borders(self.frame_origin(), FRAME_SIZE, BORDER)
    }

    /// Brings the screen up to date with `state`. Only changed characters are
    /// written.
    pub fn draw_frame(&self, term: &mut TermManager, state: &SessionState) -> io::Result<()> {
        term.print_str_at(self.origin, &score_line(state.score()), SCORE)?;

        let tiles = tiles(state);
        let cols = GRID_COLS as usize;
        for row in 0..BOARD_ROWS {
            let top_row = 2 * row as usize;
            let bottom_row = top_row + 1;
            for col in 0..BOARD_COLS {
                let top = tiles[top_row * cols + col as usize];
                let bottom = tiles.get(bottom_row * cols + col as usize).copied().unwrap_or(Tile::Empty);
                term.print_at(self.screen_pos(col, row), glyph(top, bottom))?;
            }
        }

        term.flush()
    }

    pub fn draw_game_over(&self, term: &mut TermManager, state: &SessionState) -> io::Result<()> {
        let lines = game_over_lines(state.score());
        let lines: Vec<(&str, Color)> = lines.iter().map(|(text, color)| (text.as_str(), *color)).collect();
        term.show_message(&lines)
    }
}
