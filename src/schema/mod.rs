//! Schema module - Configuration and seeding types for Cell Culture simulations.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
