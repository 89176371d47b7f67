use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Phase;
use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

/// Maps a key press to what it means in the current phase. Keys that mean
/// nothing right now map to `None`.
pub fn command_for(ev: &KeyEvent, phase: Phase) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match phase {
        Phase::Running => match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            _ => None,
        },
        Phase::GameOver(_) => match ev.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. })
}
