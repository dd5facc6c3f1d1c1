//! Compute module - Cell state machine, rules and the generation driver.

mod cell;
mod erik;
mod grid;
mod population;
mod rule;
mod selector;
mod stats;

pub use cell::*;
pub use erik::*;
pub use grid::*;
pub use population::*;
pub use rule::*;
pub use selector::*;
pub use stats::*;
