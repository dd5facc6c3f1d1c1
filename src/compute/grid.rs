//! Grid storage for Cell Culture.
//!
//! The grid is a dense, fixed-size mapping from [`Point`] to [`Cell`] that
//! includes a one-cell-thick border. Cells are stored x-major
//! (`index = x * (height + 2) + y`), so index order equals coordinate order.

use rayon::prelude::*;

use super::{Cell, Intent, Point};
use crate::schema::{Dimensions, ExecutionMode, Seed, SeedError};

/// Fixed-size world of cells, border included.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Interior width.
    width: usize,
    /// Interior height.
    height: usize,
    /// All cells, x-major.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every interior cell dead.
    pub fn new(dimensions: Dimensions) -> Self {
        Self::build(dimensions, |_| false)
    }

    /// Create a grid from a seed. Fails if the seed is invalid.
    pub fn from_seed(seed: &Seed) -> Result<Self, SeedError> {
        seed.validate()?;
        Ok(Self::build(seed.dimensions, |p| seed.is_alive(p)))
    }

    fn build(dimensions: Dimensions, alive: impl Fn(Point) -> bool) -> Self {
        let Dimensions { width, height } = dimensions;
        let mut cells = Vec::with_capacity((width + 2) * (height + 2));

        for x in 0..=width + 1 {
            for y in 0..=height + 1 {
                let border = x == 0 || y == 0 || x == width + 1 || y == height + 1;
                let cell = if border {
                    Cell::border()
                } else if alive(Point::new(x as i32, y as i32)) {
                    Cell::living()
                } else {
                    Cell::dead()
                };
                cells.push(cell);
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Interior width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Interior height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interior dimensions.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Total number of cells, border included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn stride(&self) -> usize {
        self.height + 2
    }

    /// Storage index of `point`, or `None` if it lies outside the grid.
    #[inline]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        if x > self.width + 1 || y > self.height + 1 {
            return None;
        }
        Some(x * self.stride() + y)
    }

    /// Coordinate stored at `index`.
    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        let stride = self.stride();
        Point::new((index / stride) as i32, (index % stride) as i32)
    }

    /// Cell at `point`, if it exists.
    #[inline]
    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.index_of(point).map(|i| &self.cells[i])
    }

    /// Mutable cell at `point`, if it exists. Only the staging buffer can be
    /// changed through it; committed state moves on [`Cell::commit`].
    #[inline]
    pub fn get_mut(&mut self, point: Point) -> Option<&mut Cell> {
        self.index_of(point).map(|i| &mut self.cells[i])
    }

    /// Cell at `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point` lies outside the grid.
    pub fn cell(&self, point: Point) -> &Cell {
        match self.get(point) {
            Some(cell) => cell,
            None => panic!(
                "cell lookup at {} outside {}x{} grid",
                point,
                self.width + 2,
                self.height + 2
            ),
        }
    }

    /// True if the cell at `point` exists and is alive.
    #[inline]
    pub fn is_alive(&self, point: Point) -> bool {
        self.get(point).is_some_and(Cell::is_alive)
    }

    /// All cells in coordinate order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells paired with their coordinates, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.point_at(i), cell))
    }

    /// Number of living cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Write intents into the staging buffers. `intents` is indexed like the
    /// cell storage; `None` leaves a cell untouched.
    pub(crate) fn stage(&mut self, intents: &[Option<Intent>], mode: ExecutionMode) {
        debug_assert_eq!(intents.len(), self.cells.len());
        let stage_one = |(cell, intent): (&mut Cell, &Option<Intent>)| {
            if let Some(intent) = intent {
                intent.stage_on(cell);
            }
        };
        match mode {
            ExecutionMode::Sequential => self.cells.iter_mut().zip(intents).for_each(stage_one),
            ExecutionMode::Parallel => self
                .cells
                .par_iter_mut()
                .zip(intents.par_iter())
                .for_each(stage_one),
        }
    }

    /// Commit every cell's staged update.
    pub fn commit_all(&mut self, mode: ExecutionMode) {
        match mode {
            ExecutionMode::Sequential => self.cells.iter_mut().for_each(Cell::commit),
            ExecutionMode::Parallel => self.cells.par_iter_mut().for_each(Cell::commit),
        }
    }
}
