//! Cell Culture - Bounded Game of Life with pluggable rules.
//!
//! A population lives on a rectangular grid surrounded by a ring of
//! permanently dead border cells. Each generation runs in two phases: the
//! active rule stages an intent on every interior cell while reading only
//! committed state, then every cell commits at once.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and seed loading
//! - `compute`: Cells, grid, rules and the generation driver
//! - `render`: Read-only frames and the renderers that consume them
//! - `simulation`: Run loop tying a population to a renderer
//!
//! # Example
//!
//! ```rust,no_run
//! use cell_culture::{
//!     compute::{Population, RuleSelector},
//!     render::FrameRecorder,
//!     schema::SimulationConfig,
//!     simulation::Simulation,
//! };
//!
//! let config = SimulationConfig {
//!     even_rule: "erik".to_string(),
//!     ..Default::default()
//! };
//! let selector = RuleSelector::new(config.aging);
//! let population = Population::initiate(&config, &selector).unwrap();
//!
//! let mut simulation = Simulation::new(population, FrameRecorder::new(), 50);
//! let stats = simulation.run().unwrap();
//! println!("{} cells alive after 50 generations", stats.alive);
//! ```

pub mod compute;
pub mod render;
pub mod schema;
pub mod simulation;

// Re-export commonly used types
pub use compute::{Population, PopulationStats, Rule, RuleSelector};
pub use schema::{Seed, SimulationConfig};
pub use simulation::Simulation;
