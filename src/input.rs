use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
}

/// Maps a key press during play to a command. Unknown keys map to `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Answer to the "play again?" prompt, `None` while the key means neither.
pub fn restart_answer(ev: &KeyEvent) -> Option<bool> {
    if is_ctrl_c(ev) {
        return Some(false);
    }

    match ev.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(false),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Any key leaves the intro screen and starts playing, except Ctrl+C.
pub fn starts_game(ev: &KeyEvent) -> bool {
    !is_ctrl_c(ev)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
