//! Population statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::{CellColor, Point, Population};

/// Snapshot of a population's committed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub generation: u64,
    pub alive: usize,
    /// Dead interior cells.
    pub dead: usize,
    pub border: usize,
    pub oldest_age: u32,
    /// Mean age of living cells (0 if none are alive).
    pub mean_age: f64,
    /// Living cells drawn with the old color.
    pub old: usize,
    pub prime_elder: Option<Point>,
}

impl PopulationStats {
    /// Compute statistics from a population.
    pub fn from_population(population: &Population) -> Self {
        let mut alive = 0usize;
        let mut dead = 0usize;
        let mut border = 0usize;
        let mut oldest_age = 0u32;
        let mut total_age = 0u64;
        let mut old = 0usize;

        for cell in population.grid().cells() {
            if cell.is_border() {
                border += 1;
            } else if cell.is_alive() {
                alive += 1;
                total_age += u64::from(cell.age());
                oldest_age = oldest_age.max(cell.age());
                if cell.color() == CellColor::Old {
                    old += 1;
                }
            } else {
                dead += 1;
            }
        }

        Self {
            generation: population.generation(),
            alive,
            dead,
            border,
            oldest_age,
            mean_age: if alive > 0 {
                total_age as f64 / alive as f64
            } else {
                0.0
            },
            old,
            prime_elder: population.prime_elder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Rule;
    use crate::schema::{Dimensions, Seed};

    #[test]
    fn test_stats_counts() {
        let seed = Seed::new(Dimensions::new(4, 4)).with_alive([
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(2, 1),
            Point::new(2, 2),
        ]);
        let mut population = Population::from_seed(&seed, Rule::conway(), None).unwrap();

        let stats = PopulationStats::from_population(&population);
        assert_eq!(stats.generation, 0);
        assert_eq!(stats.alive, 4);
        assert_eq!(stats.dead, 12);
        assert_eq!(stats.border, 36 - 16);
        assert_eq!(stats.oldest_age, 1);
        assert!((stats.mean_age - 1.0).abs() < 1e-9);

        population.advance_generation();
        population.advance_generation();
        let stats = PopulationStats::from_population(&population);
        assert_eq!(stats.generation, 2);
        assert_eq!(stats.oldest_age, 3);
        assert_eq!(stats.old, 0);
        assert_eq!(stats.prime_elder, None);
    }

    #[test]
    fn test_stats_empty_population() {
        let population =
            Population::from_seed(&Seed::new(Dimensions::new(2, 2)), Rule::conway(), None)
                .unwrap();
        let stats = PopulationStats::from_population(&population);
        assert_eq!(stats.alive, 0);
        assert_eq!(stats.mean_age, 0.0);
    }
}
