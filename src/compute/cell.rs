//! Cell state machine for Cell Culture.
//!
//! A cell holds its committed state (age, color, value) and a staging
//! buffer written during rule evaluation. Only [`Cell::commit`] moves staged
//! data into the committed state, so rules can read any committed cell while
//! staging updates for others.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. Ordered lexicographically (x first, then y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Symbolic display color of a cell. Renderers map these to real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellColor {
    Living,
    Dead,
    Old,
    Elder,
}

impl CellColor {
    /// Canonical color for a liveness.
    #[inline]
    pub fn for_liveness(alive: bool) -> Self {
        if alive { Self::Living } else { Self::Dead }
    }
}

/// Action staged on a cell for the next commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Age resets to zero.
    Kill,
    /// Alive cells age by one, dead cells stay dead.
    Ignore,
    /// Dead cell comes alive (age 0 -> 1).
    Resurrect,
    /// No age change.
    #[default]
    NoOp,
}

/// Value shown for cells that carry no special marking.
pub const DEFAULT_CELL_VALUE: char = '#';

/// A single grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    age: u32,
    color: CellColor,
    value: char,
    border: bool,
    next: Staged,
}

/// Pending update, applied by [`Cell::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Staged {
    action: Action,
    color: CellColor,
    value: char,
    alive_next: bool,
}

impl Cell {
    /// Create a cell and immediately commit `action` as its initial state.
    ///
    /// A non-border cell created with [`Action::Resurrect`] starts alive with
    /// age 1. Border cells always start (and stay) dead.
    pub fn new(border: bool, action: Action) -> Self {
        let alive = action == Action::Resurrect && !border;
        let mut cell = Self {
            age: 0,
            color: CellColor::Living,
            value: DEFAULT_CELL_VALUE,
            border,
            next: Staged {
                action,
                color: CellColor::for_liveness(alive),
                value: DEFAULT_CELL_VALUE,
                alive_next: alive,
            },
        };
        cell.commit();
        cell
    }

    /// Dead interior cell.
    pub fn dead() -> Self {
        Self::new(false, Action::NoOp)
    }

    /// Living interior cell of age 1.
    pub fn living() -> Self {
        Self::new(false, Action::Resurrect)
    }

    /// Immutable border cell.
    pub fn border() -> Self {
        Self::new(true, Action::NoOp)
    }

    /// Alive iff not a border cell and age > 0.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.border && self.age > 0
    }

    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[inline]
    pub fn color(&self) -> CellColor {
        self.color
    }

    #[inline]
    pub fn value(&self) -> char {
        self.value
    }

    #[inline]
    pub fn is_border(&self) -> bool {
        self.border
    }

    /// Action that the next commit will apply.
    #[inline]
    pub fn next_action(&self) -> Action {
        self.next.action
    }

    /// Staged liveness hint written by rules.
    #[inline]
    pub fn is_alive_next(&self) -> bool {
        self.next.alive_next
    }

    /// Stage the action for the next commit.
    ///
    /// Ignored on border cells, and for [`Action::Resurrect`] on a cell that
    /// is already alive.
    pub fn stage_action(&mut self, action: Action) {
        if self.border {
            return;
        }
        if action == Action::Resurrect && self.is_alive() {
            return;
        }
        self.next.action = action;
    }

    pub fn stage_color(&mut self, color: CellColor) {
        self.next.color = color;
    }

    pub fn stage_value(&mut self, value: char) {
        self.next.value = value;
    }

    pub fn stage_alive_next(&mut self, alive: bool) {
        self.next.alive_next = alive;
    }

    /// Apply the staged update and reset the staged action to `NoOp`.
    pub fn commit(&mut self) {
        match self.next.action {
            Action::Kill => self.age = 0,
            Action::Ignore => {
                if self.is_alive() {
                    self.age += 1;
                }
            }
            Action::Resurrect => {
                if !self.border {
                    self.age += 1;
                }
            }
            Action::NoOp => {}
        }

        if self.border {
            self.age = 0;
            self.color = CellColor::Dead;
        } else {
            if self.color != self.next.color {
                self.color = self.next.color;
            }
            if self.value != self.next.value {
                self.value = self.next.value;
            }
        }

        self.next.action = Action::NoOp;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::dead()
    }
}
