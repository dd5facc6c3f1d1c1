//! Run loop binding a population to a renderer.

use std::thread;
use std::time::{Duration, Instant};

use crate::compute::{Population, PopulationStats};
use crate::render::{RenderError, Renderer};

/// Runs a population for a fixed number of generations, rendering each one.
pub struct Simulation<R: Renderer> {
    population: Population,
    renderer: R,
    generations: u64,
    frame_delay: Duration,
}

impl<R: Renderer> Simulation<R> {
    pub fn new(population: Population, renderer: R, generations: u64) -> Self {
        Self {
            population,
            renderer,
            generations,
            frame_delay: Duration::ZERO,
        }
    }

    /// Pause after every rendered generation.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Render the initial state, then advance and render until the
    /// configured number of generations have completed.
    pub fn run(&mut self) -> Result<PopulationStats, RenderError> {
        let start = Instant::now();
        self.renderer.render(&self.population.frame())?;

        let target = self.population.generation() + self.generations;
        while self.population.generation() < target {
            self.population.advance_generation();
            self.renderer.render(&self.population.frame())?;
            if !self.frame_delay.is_zero() {
                thread::sleep(self.frame_delay);
            }
        }

        let stats = PopulationStats::from_population(&self.population);
        log::info!(
            "Ran {} generations in {:.2?}: {} alive",
            self.generations,
            start.elapsed(),
            stats.alive
        );
        Ok(stats)
    }

    pub fn into_parts(self) -> (Population, R) {
        (self.population, self.renderer)
    }
}
