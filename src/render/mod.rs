//! Rendering of populations.
//!
//! Renderers receive a read-only [`Frame`] once before the first generation
//! and once after every generation. They never see staging buffers and
//! cannot change the grid.

mod recorder;
mod terminal;

use crate::compute::{Cell, Grid, Point};

pub use recorder::{FrameRecorder, NullRenderer, RecordedFrame};
pub use terminal::{BORDER_CHAR, TerminalRenderer, palette};

/// Character drawn for dead interior cells in plain-text output.
pub const DEAD_CHAR: char = '.';

/// Read-only view of a population at one generation.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    generation: u64,
    grid: &'a Grid,
}

impl<'a> Frame<'a> {
    pub fn new(generation: u64, grid: &'a Grid) -> Self {
        Self { generation, grid }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Committed cell at `point`, if it exists.
    #[inline]
    pub fn get(&self, point: Point) -> Option<&'a Cell> {
        self.grid.get(point)
    }

    /// Every cell, border included, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &'a Cell)> + 'a {
        self.grid.iter()
    }

    /// Plain interior rendering: one line per row, alive cells shown by
    /// their value and dead cells as [`DEAD_CHAR`].
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for y in 1..=self.height() {
            for x in 1..=self.width() {
                let cell = self.grid.cell(Point::new(x as i32, y as i32));
                out.push(if cell.is_alive() { cell.value() } else { DEAD_CHAR });
            }
            out.push('\n');
        }
        out
    }
}

/// Consumer of frames.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// Rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}
