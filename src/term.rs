use crate::app::Frontend;
use crate::grid::Grid;
use crate::input::{self, Command};
use crate::{Cell, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Terminal columns used by one grid cell, so cells come out roughly square.
const CELL_WIDTH: TermInt = 2;

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const BACKGROUND_COLOR: Color = Color::Black;

pub type Coords = (TermInt, TermInt);

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout(), current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(ev);
            }
        }
    }

    /// Waits up to `timeout` for input, then drains every key event already queued.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        if !poll(timeout).context("Error polling input")? {
            return Ok(events);
        }

        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                events.push(ev);
            }
            if !poll(Duration::from_millis(0)).context("Error polling input")? {
                return Ok(events);
            }
        }
    }

    pub fn draw_borders(
        &mut self,
        top_left: Coords,
        width: TermInt,
        height: TermInt,
    ) -> Result<()> {
        let (x0, y0) = top_left;
        let (end_x, end_y) = (x0 + width - 1, y0 + height - 1);

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.print_at((x, y0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Top and bottom padding lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            self.print_str_at((top_left.0, *y), &" ".repeat(msg_width as usize))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_str_at((top_left.0, top_left.1 + i as TermInt + 1), &padded_line)?;
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    /// Blanks the message box. Whatever was underneath has to be drawn again by the caller.
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let blank = " ".repeat(msg.width as usize);
        for y_diff in 0..msg.height {
            self.print_str_at((msg.top_left.0, msg.top_left.1 + y_diff), &blank)?;
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
            .context("Error printing")?;
        Ok(())
    }

    pub fn print_str_at(&mut self, pos: Coords, s: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s))
            .context("Error printing")?;
        Ok(())
    }

    pub fn fill_at(&mut self, pos: Coords, width: TermInt, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetBackgroundColor(color),
            style::Print(" ".repeat(width as usize)),
            style::ResetColor
        ).context("Error printing")?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }
}

/// Top left corner of a `board` sized box centred in a `term` sized screen.
fn centered_origin(term: Coords, board: Coords) -> Coords {
    ((term.0 - board.0) / 2, (term.1 - board.1) / 2)
}

/// The terminal as seen by the game: a bordered board with a score line above it.
pub struct TermFrontend {
    term: TermManager,
    grid: Grid,
    origin: Coords,
}

impl TermFrontend {
    pub fn new(grid: Grid) -> Result<Self> {
        let term = TermManager::new()?;

        // Border on every side plus the score line
        let board = (grid.width() * CELL_WIDTH + 2, grid.height() + 3);
        let (w, h) = term.size();
        if w < board.0 || h < board.1 {
            bail!("Terminal is {}x{}, the board needs at least {}x{}", w, h, board.0, board.1);
        }

        let origin = centered_origin((w, h), board);
        Ok(TermFrontend { term, grid, origin })
    }

    fn to_screen(&self, cell: Cell) -> Option<Coords> {
        if !self.grid.contains(cell) {
            return None;
        }

        let x = self.origin.0 + 1 + cell.0 as TermInt * CELL_WIDTH;
        let y = self.origin.1 + 2 + cell.1 as TermInt;
        Some((x, y))
    }
}

impl Frontend for TermFrontend {
    fn setup(&mut self) -> Result<()> {
        self.term.setup()
    }

    fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    fn show_intro(&mut self) -> Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        if !input::starts_game(&self.term.read_key_blocking()?) {
            return Ok(false);
        }

        self.term.hide_message()?;
        Ok(true)
    }

    fn draw(&mut self, body: &[Cell], food: Cell, score: u32) -> Result<()> {
        let (x0, y0) = self.origin;
        let board_width = self.grid.width() * CELL_WIDTH + 2;

        let score = format!("Score: {}", score);
        let score_line = format!("{: <width$}", score, width = board_width as usize);
        self.term.print_str_at((x0, y0), &score_line)?;
        self.term.draw_borders((x0, y0 + 1), board_width, self.grid.height() + 2)?;

        for y in 0..self.grid.height() {
            let row = (x0 + 1, y0 + 2 + y);
            self.term.fill_at(row, self.grid.width() * CELL_WIDTH, BACKGROUND_COLOR)?;
        }

        // Cells off the board (a head that just hit the wall) are not drawn
        for pos in body.iter().filter_map(|cell| self.to_screen(*cell)).collect::<Vec<_>>() {
            self.term.fill_at(pos, CELL_WIDTH, SNAKE_COLOR)?;
        }

        if let Some(pos) = self.to_screen(food) {
            self.term.fill_at(pos, CELL_WIDTH, FOOD_COLOR)?;
        }

        self.term.flush()
    }

    fn poll_commands(&mut self, timeout: Duration) -> Result<Vec<Command>> {
        let events = self.term.read_key_events(timeout)?;
        Ok(events.iter().filter_map(input::command_for).collect())
    }

    fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])
        } else {
            self.term.hide_message()
        }
    }

    fn ask_restart(&mut self, score: u32) -> Result<bool> {
        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", score),
            "",
            "Play again? (y/n)"
        ])?;

        loop {
            if let Some(answer) = input::restart_answer(&self.term.read_key_blocking()?) {
                self.term.hide_message()?;
                return Ok(answer);
            }
        }
    }
}
