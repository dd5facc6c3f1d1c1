//! ANSI terminal renderer.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::{Frame, RenderError, Renderer};
use crate::compute::CellColor;

/// Character drawn for border cells.
pub const BORDER_CHAR: char = '#';

/// Terminal color for a cell color.
pub fn palette(color: CellColor) -> Color {
    match color {
        CellColor::Living => Color::White,
        CellColor::Dead => Color::Black,
        CellColor::Old => Color::Cyan,
        CellColor::Elder => Color::Magenta,
    }
}

/// Draws every frame in place: border, interior and a status line.
pub struct TerminalRenderer<W: Write> {
    out: W,
    cleared: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cleared: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if !self.cleared {
            queue!(self.out, Clear(ClearType::All))?;
            self.cleared = true;
        }
        queue!(self.out, cursor::MoveTo(0, 0))?;

        let status_row = (frame.height() + 2) as u16;
        for (point, cell) in frame.iter() {
            // Cells arrive column by column; position each one explicitly.
            queue!(self.out, cursor::MoveTo(point.x as u16, point.y as u16))?;
            if cell.is_border() {
                queue!(
                    self.out,
                    SetForegroundColor(Color::DarkGrey),
                    Print(BORDER_CHAR)
                )?;
            } else if cell.is_alive() {
                queue!(
                    self.out,
                    SetForegroundColor(palette(cell.color())),
                    Print(cell.value())
                )?;
            } else {
                queue!(self.out, Print(' '))?;
            }
        }

        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, status_row),
            Clear(ClearType::CurrentLine),
            Print(format!("Generation {}", frame.generation())),
            Print("\r\n")
        )?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.draw(frame)?;
        Ok(())
    }
}
