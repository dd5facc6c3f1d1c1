//! The aging ("erik") rule.
//!
//! Same topology and limits as Conway, followed by a cosmetic pass driven by
//! the committed age each cell has while the generation is evaluated:
//!
//! - surviving cells in the mature band are drawn [`CellColor::Old`];
//! - surviving cells at or above the elder age are also marked with the
//!   elder value and become elder candidates;
//! - the oldest candidate becomes the generation's prime elder and is drawn
//!   [`CellColor::Elder`]. Ties go to the first candidate in coordinate
//!   order.
//!
//! The prime elder is chosen afresh on every evaluation, so at most one cell
//! holds the status per generation.

use rayon::prelude::*;

use super::{CellColor, Grid, Intent, Neighborhood, Point};
use crate::schema::{AgingConfig, ExecutionMode};

/// Conway plus age-based appearance.
#[derive(Debug, Clone)]
pub struct ErikRule {
    neighborhood: Neighborhood,
    aging: AgingConfig,
    prime_elder: Option<Point>,
}

/// Elder candidate found during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    index: usize,
    age: u32,
}

impl Candidate {
    /// Older candidate wins; on equal age the lower index (earlier
    /// coordinate) wins. Associative and commutative, so parallel reduction
    /// picks the same elder as a sequential scan.
    fn older(a: Self, b: Self) -> Self {
        if b.age > a.age || (b.age == a.age && b.index < a.index) {
            b
        } else {
            a
        }
    }
}

impl ErikRule {
    pub fn new(aging: AgingConfig) -> Self {
        Self {
            neighborhood: Neighborhood::moore(),
            aging,
            prime_elder: None,
        }
    }

    #[inline]
    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    #[inline]
    pub fn aging(&self) -> &AgingConfig {
        &self.aging
    }

    /// Prime elder chosen by the most recent [`ErikRule::plan`].
    #[inline]
    pub fn prime_elder(&self) -> Option<Point> {
        self.prime_elder
    }

    /// Intents for every interior cell, with aging cosmetics applied and the
    /// prime elder selected.
    pub fn plan(&mut self, grid: &Grid, mode: ExecutionMode) -> Vec<Option<Intent>> {
        let aging = self.aging;
        let mut intents = self.neighborhood.plan(grid, aging.default_value, mode);

        let candidate = |(index, slot): (usize, &mut Option<Intent>)| {
            let intent = slot.as_mut()?;
            let age = grid.cells()[index].age();
            apply_aging(&aging, intent, age).then_some(Candidate { index, age })
        };
        let elder = match mode {
            ExecutionMode::Sequential => intents
                .iter_mut()
                .enumerate()
                .filter_map(candidate)
                .reduce(Candidate::older),
            ExecutionMode::Parallel => intents
                .par_iter_mut()
                .enumerate()
                .filter_map(candidate)
                .reduce_with(Candidate::older),
        };

        if let Some(intent) = elder.and_then(|c| intents[c.index].as_mut()) {
            intent.color = CellColor::Elder;
        }
        self.prime_elder = elder.map(|c| grid.point_at(c.index));
        if let Some(point) = self.prime_elder {
            log::trace!("Prime elder at {}", point);
        }

        intents
    }
}

/// Adjust color and value of a surviving cell by `age`. Returns true if the
/// cell is an elder candidate.
fn apply_aging(aging: &AgingConfig, intent: &mut Intent, age: u32) -> bool {
    if !intent.alive_next {
        return false;
    }
    if aging.is_elder(age) {
        intent.color = CellColor::Old;
        intent.value = aging.elder_value;
        true
    } else {
        if aging.is_mature(age) {
            intent.color = CellColor::Old;
        }
        false
    }
}
