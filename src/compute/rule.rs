//! Rules of existence for Cell Culture.
//!
//! Every rule shares one algorithm: for each interior cell, count the alive
//! neighbours reachable through the rule's topology, compare the count with
//! the rule's [`PopulationLimits`], and stage the resulting [`Action`].
//! Variants differ in topology and in the cosmetic pass that follows.
//!
//! Evaluation reads committed state only and writes staging buffers only,
//! so the order in which cells are visited never affects the outcome.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Action, Cell, CellColor, ErikRule, Grid, Point};
use crate::schema::{AgingConfig, ExecutionMode};

/// Relative offset to a neighbouring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Neighbour of `point` in this direction.
    #[inline]
    pub fn neighbour_of(self, point: Point) -> Point {
        point.offset(self.dx, self.dy)
    }
}

/// N, E, S, W, NE, SE, SW, NW.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, 0),
    Direction::new(1, -1),
    Direction::new(1, 1),
    Direction::new(-1, 1),
    Direction::new(-1, -1),
];

/// N, E, S, W.
pub const CARDINAL: [Direction; 4] = [
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, 0),
];

/// NE, SE, SW, NW.
pub const DIAGONAL: [Direction; 4] = [
    Direction::new(1, -1),
    Direction::new(1, 1),
    Direction::new(-1, 1),
    Direction::new(-1, -1),
];

/// Neighbour-count thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationLimits {
    /// A living cell with fewer alive neighbours dies.
    pub underpopulation: usize,
    /// A living cell with more alive neighbours dies.
    pub overpopulation: usize,
    /// A dead cell with exactly this many alive neighbours comes alive.
    pub resurrection: usize,
}

impl PopulationLimits {
    /// Conway's B3/S23 limits.
    pub const CONWAY: Self = Self {
        underpopulation: 2,
        overpopulation: 3,
        resurrection: 3,
    };
}

/// Rule name strings accepted from configuration.
pub const CONWAY_NAME: &str = "conway";
pub const VON_NEUMANN_NAME: &str = "von_neumann";
pub const ERIK_NAME: &str = "erik";

/// Identifies a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Conway,
    VonNeumann,
    Erik,
}

impl RuleKind {
    /// Resolve a rule name. Matching is case-sensitive and anything
    /// unrecognized resolves to [`RuleKind::Conway`].
    pub fn from_name(name: &str) -> Self {
        match name {
            VON_NEUMANN_NAME => Self::VonNeumann,
            ERIK_NAME => Self::Erik,
            CONWAY_NAME => Self::Conway,
            other => {
                log::debug!("Unrecognized rule name {:?}, using {}", other, CONWAY_NAME);
                Self::Conway
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Conway => CONWAY_NAME,
            Self::VonNeumann => VON_NEUMANN_NAME,
            Self::Erik => ERIK_NAME,
        }
    }
}

/// Update staged on one cell by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub action: Action,
    pub alive_next: bool,
    pub color: CellColor,
    pub value: char,
}

impl Intent {
    /// Intent for `action` with the canonical color for the resulting
    /// liveness.
    pub fn canonical(action: Action, alive_now: bool, value: char) -> Self {
        let alive_next = match action {
            Action::Kill => false,
            Action::Resurrect => true,
            Action::Ignore | Action::NoOp => alive_now,
        };
        Self {
            action,
            alive_next,
            color: CellColor::for_liveness(alive_next),
            value,
        }
    }

    /// Write this intent into `cell`'s staging buffer.
    pub fn stage_on(&self, cell: &mut Cell) {
        cell.stage_action(self.action);
        cell.stage_alive_next(self.alive_next);
        cell.stage_color(self.color);
        cell.stage_value(self.value);
    }
}

/// Topology and thresholds shared by every rule variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    limits: PopulationLimits,
    directions: &'static [Direction],
}

impl Neighborhood {
    pub const fn new(limits: PopulationLimits, directions: &'static [Direction]) -> Self {
        Self { limits, directions }
    }

    /// All eight neighbours, Conway limits.
    pub const fn moore() -> Self {
        Self::new(PopulationLimits::CONWAY, &ALL_DIRECTIONS)
    }

    /// Four cardinal neighbours, Conway limits.
    pub const fn von_neumann() -> Self {
        Self::new(PopulationLimits::CONWAY, &CARDINAL)
    }

    #[inline]
    pub fn limits(&self) -> PopulationLimits {
        self.limits
    }

    #[inline]
    pub fn directions(&self) -> &'static [Direction] {
        self.directions
    }

    /// Alive neighbours of `point`. Offsets that leave the grid count as
    /// dead.
    pub fn count_alive_neighbours(&self, grid: &Grid, point: Point) -> usize {
        self.directions
            .iter()
            .filter(|d| grid.is_alive(d.neighbour_of(point)))
            .count()
    }

    /// Action for a cell with `alive_neighbours` alive neighbours.
    pub fn decide_action(&self, alive_neighbours: usize, is_alive: bool) -> Action {
        let limits = &self.limits;
        if is_alive
            && (alive_neighbours < limits.underpopulation
                || alive_neighbours > limits.overpopulation)
        {
            Action::Kill
        } else if !is_alive && alive_neighbours == limits.resurrection {
            Action::Resurrect
        } else {
            Action::Ignore
        }
    }

    /// Canonical intents for every interior cell, indexed like the grid's
    /// storage. Border cells map to `None`.
    pub fn plan(&self, grid: &Grid, value: char, mode: ExecutionMode) -> Vec<Option<Intent>> {
        let plan_one = |(index, cell): (usize, &Cell)| {
            if cell.is_border() {
                return None;
            }
            let point = grid.point_at(index);
            let alive = cell.is_alive();
            let action = self.decide_action(self.count_alive_neighbours(grid, point), alive);
            Some(Intent::canonical(action, alive, value))
        };
        match mode {
            ExecutionMode::Sequential => grid.cells().iter().enumerate().map(plan_one).collect(),
            ExecutionMode::Parallel => grid
                .cells()
                .par_iter()
                .enumerate()
                .map(plan_one)
                .collect(),
        }
    }
}

/// Summary of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Interior cells that received an intent.
    pub staged: usize,
    /// Cells that will be alive after commit.
    pub alive_next: usize,
    /// Prime elder chosen in this pass (aging rule only).
    pub prime_elder: Option<Point>,
}

impl Evaluation {
    fn from_intents(intents: &[Option<Intent>], prime_elder: Option<Point>) -> Self {
        let (staged, alive_next) = intents
            .iter()
            .flatten()
            .fold((0, 0), |(s, a), i| (s + 1, a + usize::from(i.alive_next)));
        Self {
            staged,
            alive_next,
            prime_elder,
        }
    }
}

/// A built-in rule of existence.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Eight neighbours, B3/S23.
    Conway(Neighborhood),
    /// Four cardinal neighbours, B3/S23.
    VonNeumann(Neighborhood),
    /// Conway plus age-based coloring and a single prime elder.
    Erik(ErikRule),
}

impl Rule {
    pub fn conway() -> Self {
        Self::Conway(Neighborhood::moore())
    }

    pub fn von_neumann() -> Self {
        Self::VonNeumann(Neighborhood::von_neumann())
    }

    pub fn erik(aging: AgingConfig) -> Self {
        Self::Erik(ErikRule::new(aging))
    }

    /// Construct the rule of `kind`.
    pub fn of_kind(kind: RuleKind, aging: AgingConfig) -> Self {
        match kind {
            RuleKind::Conway => Self::conway(),
            RuleKind::VonNeumann => Self::von_neumann(),
            RuleKind::Erik => Self::erik(aging),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Conway(_) => RuleKind::Conway,
            Self::VonNeumann(_) => RuleKind::VonNeumann,
            Self::Erik(_) => RuleKind::Erik,
        }
    }

    /// Configuration name of this rule.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn neighborhood(&self) -> &Neighborhood {
        match self {
            Self::Conway(n) | Self::VonNeumann(n) => n,
            Self::Erik(erik) => erik.neighborhood(),
        }
    }

    /// Prime elder from the most recent evaluation (aging rule only).
    pub fn prime_elder(&self) -> Option<Point> {
        match self {
            Self::Erik(erik) => erik.prime_elder(),
            _ => None,
        }
    }

    /// Stage the next generation on every interior cell of `grid`.
    ///
    /// Nothing is committed; call [`Grid::commit_all`] afterwards.
    pub fn evaluate(&mut self, grid: &mut Grid, mode: ExecutionMode) -> Evaluation {
        let (intents, prime_elder) = match self {
            Self::Conway(n) | Self::VonNeumann(n) => {
                (n.plan(grid, super::DEFAULT_CELL_VALUE, mode), None)
            }
            Self::Erik(erik) => {
                let intents = erik.plan(grid, mode);
                (intents, erik.prime_elder())
            }
        };
        grid.stage(&intents, mode);
        let evaluation = Evaluation::from_intents(&intents, prime_elder);
        log::trace!(
            "{} staged {} cells ({} alive next)",
            self.name(),
            evaluation.staged,
            evaluation.alive_next
        );
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Dimensions, Seed};

    fn grid_with(width: usize, height: usize, alive: &[(i32, i32)]) -> Grid {
        let seed = Seed::new(Dimensions::new(width, height))
            .with_alive(alive.iter().map(|&(x, y)| Point::new(x, y)));
        Grid::from_seed(&seed).unwrap()
    }

    fn step(rule: &mut Rule, grid: &mut Grid) {
        rule.evaluate(grid, ExecutionMode::Sequential);
        grid.commit_all(ExecutionMode::Sequential);
    }

    #[test]
    fn test_direction_tables() {
        assert_eq!(ALL_DIRECTIONS.len(), 8);
        for d in CARDINAL.iter().chain(DIAGONAL.iter()) {
            assert!(ALL_DIRECTIONS.contains(d));
        }
        assert!(CARDINAL.iter().all(|d| d.dx == 0 || d.dy == 0));
        assert!(DIAGONAL.iter().all(|d| d.dx != 0 && d.dy != 0));
    }

    #[test]
    fn test_decide_action_thresholds() {
        let n = Neighborhood::moore();
        assert_eq!(n.decide_action(0, true), Action::Kill);
        assert_eq!(n.decide_action(1, true), Action::Kill);
        assert_eq!(n.decide_action(2, true), Action::Ignore);
        assert_eq!(n.decide_action(3, true), Action::Ignore);
        assert_eq!(n.decide_action(4, true), Action::Kill);
        assert_eq!(n.decide_action(8, true), Action::Kill);
        assert_eq!(n.decide_action(2, false), Action::Ignore);
        assert_eq!(n.decide_action(3, false), Action::Resurrect);
        assert_eq!(n.decide_action(4, false), Action::Ignore);
    }

    #[test]
    fn test_count_at_interior_corner_never_wraps() {
        // Everything alive in a 3x3 interior.
        let all: Vec<(i32, i32)> = (1..=3)
            .flat_map(|x| (1..=3).map(move |y| (x, y)))
            .collect();
        let grid = grid_with(3, 3, &all);
        let n = Neighborhood::moore();

        assert_eq!(n.count_alive_neighbours(&grid, Point::new(1, 1)), 3);
        assert_eq!(n.count_alive_neighbours(&grid, Point::new(3, 3)), 3);
        assert_eq!(n.count_alive_neighbours(&grid, Point::new(2, 2)), 8);
        // Border corner: neighbours beyond the grid are absent, not alive.
        assert_eq!(n.count_alive_neighbours(&grid, Point::new(0, 0)), 1);
    }

    #[test]
    fn test_von_neumann_ignores_diagonals() {
        let grid = grid_with(3, 3, &[(1, 1), (3, 1), (1, 3), (3, 3)]);
        assert_eq!(
            Neighborhood::von_neumann().count_alive_neighbours(&grid, Point::new(2, 2)),
            0
        );
        assert_eq!(
            Neighborhood::moore().count_alive_neighbours(&grid, Point::new(2, 2)),
            4
        );
    }

    #[test]
    fn test_von_neumann_generation() {
        // Diagonal corners around a dead centre: nothing is born under the
        // cardinal topology, and every corner dies of loneliness.
        let mut grid = grid_with(3, 3, &[(1, 1), (3, 1), (1, 3), (3, 3)]);
        let mut rule = Rule::von_neumann();
        step(&mut rule, &mut grid);
        assert_eq!(grid.alive_count(), 0);

        // Plus shape: the centre has four cardinal neighbours and each arm
        // has one, so all of them die.
        let mut grid = grid_with(3, 3, &[(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
        step(&mut rule, &mut grid);
        assert!(!grid.is_alive(Point::new(2, 2)));
        assert!(!grid.is_alive(Point::new(2, 1)));
        // Corners have exactly two cardinal alive neighbours: no birth (needs 3).
        assert!(!grid.is_alive(Point::new(1, 1)));
    }

    #[test]
    fn test_conway_survival_and_death() {
        // Blinker: centre survives and ages, ends die, sides are born.
        let mut grid = grid_with(5, 5, &[(2, 3), (3, 3), (4, 3)]);
        let mut rule = Rule::conway();
        step(&mut rule, &mut grid);

        assert!(grid.is_alive(Point::new(3, 3)));
        assert_eq!(grid.cell(Point::new(3, 3)).age(), 2);
        assert!(!grid.is_alive(Point::new(2, 3)));
        assert_eq!(grid.cell(Point::new(2, 3)).age(), 0);
        assert!(grid.is_alive(Point::new(3, 2)));
        assert_eq!(grid.cell(Point::new(3, 2)).age(), 1);
        assert!(grid.is_alive(Point::new(3, 4)));
        assert_eq!(grid.cell(Point::new(3, 2)).color(), CellColor::Living);
        assert_eq!(grid.cell(Point::new(2, 3)).color(), CellColor::Dead);
    }

    #[test]
    fn test_conway_overpopulation() {
        // Centre of a plus has four neighbours and dies.
        let mut grid = grid_with(3, 3, &[(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
        step(&mut Rule::conway(), &mut grid);
        assert!(!grid.is_alive(Point::new(2, 2)));
        assert!(grid.is_alive(Point::new(2, 1)));
    }

    #[test]
    fn test_evaluate_does_not_commit() {
        let mut grid = grid_with(3, 3, &[(2, 2)]);
        let evaluation = Rule::conway().evaluate(&mut grid, ExecutionMode::Sequential);
        assert_eq!(evaluation.staged, 9);
        assert_eq!(evaluation.alive_next, 0);
        assert!(grid.is_alive(Point::new(2, 2)));
        assert_eq!(grid.cell(Point::new(2, 2)).next_action(), Action::Kill);

        grid.commit_all(ExecutionMode::Sequential);
        assert!(!grid.is_alive(Point::new(2, 2)));
    }

    #[test]
    fn test_parallel_plan_matches_sequential() {
        let seed = Seed::random(
            Dimensions::new(40, 30),
            &crate::schema::RandomFill {
                alive_probability: 0.4,
                rng_seed: Some(7),
            },
        );
        let grid = Grid::from_seed(&seed).unwrap();
        let n = Neighborhood::moore();
        assert_eq!(
            n.plan(&grid, '#', ExecutionMode::Sequential),
            n.plan(&grid, '#', ExecutionMode::Parallel)
        );
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::conway().name(), "conway");
        assert_eq!(Rule::von_neumann().name(), "von_neumann");
        assert_eq!(Rule::erik(AgingConfig::default()).name(), "erik");
        assert_eq!(RuleKind::from_name("erik"), RuleKind::Erik);
        assert_eq!(RuleKind::from_name("von_neumann"), RuleKind::VonNeumann);
        assert_eq!(RuleKind::from_name(""), RuleKind::Conway);
        assert_eq!(RuleKind::from_name("Erik"), RuleKind::Conway);
        assert_eq!(RuleKind::from_name("highlife"), RuleKind::Conway);
    }
}
