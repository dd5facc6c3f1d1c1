//! Population - Generation driver for Cell Culture.
//!
//! Owns the grid and the rules, and advances the world one generation at a
//! time in two phases:
//!
//! 1. **Evaluate**: the rule for the current parity stages an intent on
//!    every interior cell, reading committed state only.
//! 2. **Commit**: every cell applies its staged intent.
//!
//! No commit is visible to any rule decision of the same generation.

use super::{Cell, Evaluation, Grid, Point, Rule, RuleSelector};
use crate::render::Frame;
use crate::schema::{ConfigError, ExecutionMode, Seed, SeedError, SimulationConfig};

/// Grid plus rules and generation counter.
#[derive(Debug, Clone)]
pub struct Population {
    grid: Grid,
    generation: u64,
    even_rule: Rule,
    odd_rule: Option<Rule>,
    execution: ExecutionMode,
}

impl Population {
    /// Build a population from configuration: load the seed file if one is
    /// configured, otherwise fill the interior randomly.
    pub fn initiate(
        config: &SimulationConfig,
        selector: &RuleSelector,
    ) -> Result<Self, PopulationError> {
        config.validate()?;

        let seed = match &config.seed_file {
            Some(path) => Seed::from_file(path)?,
            None => Seed::random(config.dimensions(), &config.random),
        };
        let (even_rule, odd_rule) =
            selector.select_pair(&config.even_rule, config.distinct_odd_rule());

        let population =
            Self::from_seed(&seed, even_rule, odd_rule)?.with_execution(config.execution);
        log::info!(
            "Initiated {} population: {} alive, rules {}/{}",
            population.grid.dimensions(),
            population.grid.alive_count(),
            population.even_rule.name(),
            population.odd_rule().name()
        );
        Ok(population)
    }

    /// Build a population from an explicit seed and rules.
    pub fn from_seed(
        seed: &Seed,
        even_rule: Rule,
        odd_rule: Option<Rule>,
    ) -> Result<Self, PopulationError> {
        let grid = Grid::from_seed(seed)?;
        Ok(Self {
            grid,
            generation: 0,
            even_rule,
            odd_rule,
            execution: ExecutionMode::default(),
        })
    }

    /// Set how evaluation and commit are scheduled.
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Advance one generation and return the new generation counter.
    pub fn advance_generation(&mut self) -> u64 {
        let mode = self.execution;
        let rule = match (self.generation % 2, self.odd_rule.as_mut()) {
            (1, Some(odd)) => odd,
            _ => &mut self.even_rule,
        };

        let evaluation: Evaluation = rule.evaluate(&mut self.grid, mode);
        self.grid.commit_all(mode);
        self.generation += 1;

        log::debug!(
            "Generation {} ({}): {} alive{}",
            self.generation,
            rule.name(),
            evaluation.alive_next,
            evaluation
                .prime_elder
                .map(|p| format!(", prime elder at {}", p))
                .unwrap_or_default()
        );
        self.generation
    }

    /// Number of completed generations.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Cell at `point`.
    ///
    /// # Panics
    ///
    /// Panics if `point` lies outside the grid.
    pub fn cell(&self, point: Point) -> &Cell {
        self.grid.cell(point)
    }

    /// Total number of cells, border included.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.grid.len()
    }

    pub fn even_rule(&self) -> &Rule {
        &self.even_rule
    }

    /// Rule used on odd generations (the even rule if none was given).
    pub fn odd_rule(&self) -> &Rule {
        self.odd_rule.as_ref().unwrap_or(&self.even_rule)
    }

    /// Rule that the next call to [`Population::advance_generation`] uses.
    pub fn current_rule(&self) -> &Rule {
        if self.generation % 2 == 1 {
            self.odd_rule()
        } else {
            &self.even_rule
        }
    }

    /// Prime elder of the most recent generation, if an aging rule chose one.
    pub fn prime_elder(&self) -> Option<Point> {
        if self.generation == 0 {
            return None;
        }
        let last = if (self.generation - 1) % 2 == 1 {
            self.odd_rule()
        } else {
            &self.even_rule
        };
        last.prime_elder()
    }

    /// Read-only view for renderers.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self.generation, &self.grid)
    }
}

/// Population initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid seed: {0}")]
    Seed(#[from] SeedError),
}
