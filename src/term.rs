use crate::matrix::{Rgb, TermMatrix};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::Context;
use crossterm::{cursor, execute, queue, style::{self, Color}, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(Key),
}

/// Rows of the text panel, mirroring a title / body / footer layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Line {
    Top,
    Center,
    Bottom,
}

/// The auxiliary display the instructions are shown on.
///
/// Drawing calls are buffered until `flip`.
pub trait Surface {
    fn fill(&mut self, color: Rgb) -> anyhow::Result<()>;
    fn draw_text(&mut self, text: &str, line: Line, color: Rgb) -> anyhow::Result<()>;
    fn flip(&mut self) -> anyhow::Result<()>;
}

const PANEL_HEIGHT: u16 = 7;
const MIN_PANEL_WIDTH: u16 = 64;

pub struct TermManager<W: Write = Stdout> {
    width: u16,
    out: W,
    background: Rgb,
}

impl TermManager {
    pub fn new() -> anyhow::Result<Self> {
        let (width, _) = terminal::size().context("reading terminal size")?;
        Ok(TermManager::with_writer(width, stdout()))
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(width: u16, out: W) -> Self {
        TermManager { width: width.max(MIN_PANEL_WIDTH), out, background: (0, 0, 0) }
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        execute!(self.out, EnterAlternateScreen, terminal::Clear(ClearType::All))
            .context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(self.out, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("leaving alternate screen")?;
        Ok(())
    }

    /// Where the simulated LED matrix goes: centered below the text panel.
    pub fn matrix_origin(&self) -> (u16, u16) {
        let (matrix_width, _) = TermMatrix::footprint();
        (self.width.saturating_sub(matrix_width) / 2, PANEL_HEIGHT + 1)
    }

    /// Drains every pending input event without blocking.
    pub fn poll_events(&self) -> anyhow::Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(translate_key(&ev));
            }
        }

        Ok(events)
    }

    fn row(&self, line: Line) -> u16 {
        match line {
            Line::Top => 1,
            Line::Center => PANEL_HEIGHT / 2,
            Line::Bottom => PANEL_HEIGHT - 2,
        }
    }
}

impl<W: Write> Surface for TermManager<W> {
    fn fill(&mut self, color: Rgb) -> anyhow::Result<()> {
        self.background = color;
        let blank = " ".repeat(self.width as usize);

        queue!(self.out, style::SetBackgroundColor(to_color(color)))?;
        for y in 0..PANEL_HEIGHT {
            queue!(self.out, cursor::MoveTo(0, y), style::Print(&blank))?;
        }
        queue!(self.out, style::ResetColor)?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, line: Line, color: Rgb) -> anyhow::Result<()> {
        let len = text.chars().count() as u16;
        let x = self.width.saturating_sub(len) / 2;
        let (row, background) = (self.row(line), self.background);

        queue!(
            self.out,
            cursor::MoveTo(x, row),
            style::SetBackgroundColor(to_color(background)),
            style::SetForegroundColor(to_color(color)),
            style::Print(text),
            style::ResetColor
        )?;
        Ok(())
    }

    fn flip(&mut self) -> anyhow::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn to_color((r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn translate_key(ev: &KeyEvent) -> InputEvent {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => InputEvent::Quit,
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Esc => InputEvent::Quit,
            KeyCode::Left => InputEvent::Key(Key::Left),
            KeyCode::Right => InputEvent::Key(Key::Right),
            KeyCode::Up => InputEvent::Key(Key::Up),
            KeyCode::Down => InputEvent::Key(Key::Down),
            _ => InputEvent::Key(Key::Other),
        }
    }
}
