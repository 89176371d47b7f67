use crate::{TermInt, Coords};
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum TermError {
    #[display("terminal I/O failed: {_0}")]
    Io(io::Error),
    #[from(ignore)]
    #[display("terminal is {width}x{height}, the board needs at least {need_width}x{need_height}")]
    TooSmall { width: TermInt, height: TermInt, need_width: TermInt, need_height: TermInt },
}

/// One character cell on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::new(' ', Color::Reset, Color::Reset);

    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self, TermError> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![Glyph::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None, active: false })
    }

    pub fn setup(&mut self, title: &str) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(title))?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
    }

    /// Drains every pending key press without blocking. Releases are dropped.
    pub fn read_key_events_queue(&self) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Release {
                    continue;
                }
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Draws a frame whose outer corners are `top_left` and `top_left + size - 1`.
    pub fn draw_borders(&mut self, top_left: Coords, size: Coords, color: Color) -> io::Result<()> {
        let (width, height) = size;
        let end_x = top_left.0 + width - 1;
        let end_y = top_left.1 + height - 1;

        for x in top_left.0..=end_x {
            let ch = if x == top_left.0 || x == end_x {'+'} else {'-'};
            self.print_at((x, top_left.1), Glyph::new(ch, color, Color::Reset))?;
            self.print_at((x, end_y), Glyph::new(ch, color, Color::Reset))?;
        }

        for y in top_left.1 + 1..end_y {
            self.print_at((top_left.0, y), Glyph::new('|', color, Color::Reset))?;
            self.print_at((end_x, y), Glyph::new('|', color, Color::Reset))?;
        }

        self.flush()
    }

    /// Shows a box of centered lines in the middle of the terminal. Whatever
    /// it covers is kept and comes back on `hide_message`.
    pub fn show_message(&mut self, lines: &[(&str, Color)]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|(line, _)| line.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), Glyph::new(' ', Color::White, Color::Black))?;
            }
        }

        for (i, (line, color)) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), Glyph::new(ch, *color, Color::Black))?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(glyph) = self.saved(pos) {
                    self.print_at_no_save(pos, glyph)?;
                }
            }
        }

        self.flush()
    }

    /// Queues `glyph` at `pos` unless the screen already shows it there.
    pub fn print_at(&mut self, pos: Coords, glyph: Glyph) -> io::Result<()> {
        let idx = match self.index(pos) {
            Some(idx) => idx,
            None => return Ok(()),
        };
        if self.screen[idx] == glyph {
            return Ok(());
        }

        self.screen[idx] = glyph;
        self.print_at_no_save(pos, glyph)
    }

    pub fn print_str_at(&mut self, pos: Coords, text: &str, color: Color) -> io::Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), Glyph::new(ch, color, Color::Reset))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn saved(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|idx| self.screen[idx])
    }

    fn print_at_no_save(&mut self, pos: Coords, glyph: Glyph) -> io::Result<()> {
        // Used for message boxes, so the buffer keeps what lies underneath
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.fg),
            style::SetBackgroundColor(glyph.bg),
            style::Print(glyph.ch)
        )
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}
