//! Configuration types for Cell Culture simulation parameters.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level simulation configuration.
///
/// Missing JSON fields take their default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interior grid width in cells (border excluded).
    pub width: usize,
    /// Interior grid height in cells (border excluded).
    pub height: usize,
    /// Number of generations to simulate.
    pub generations: u64,
    /// Rule applied on even generations.
    pub even_rule: String,
    /// Rule applied on odd generations. `None` reuses the even rule.
    pub odd_rule: Option<String>,
    /// Seed file to load. Its declared dimensions override `width`/`height`.
    pub seed_file: Option<PathBuf>,
    /// Random fill used when no seed file is given.
    pub random: RandomFill,
    /// Age thresholds for the aging rule.
    pub aging: AgingConfig,
    /// How evaluation and commit are scheduled.
    pub execution: ExecutionMode,
    /// Pause between rendered generations, in milliseconds.
    pub frame_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            generations: 100,
            even_rule: "conway".to_string(),
            odd_rule: None,
            seed_file: None,
            random: RandomFill::default(),
            aging: AgingConfig::default(),
            execution: ExecutionMode::default(),
            frame_delay_ms: 100,
        }
    }
}

/// Random initial population parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomFill {
    /// Probability that an interior cell starts alive.
    pub alive_probability: f64,
    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for RandomFill {
    fn default() -> Self {
        Self {
            alive_probability: 1.0 / 3.0,
            rng_seed: None,
        }
    }
}

/// Age thresholds and display values used by the aging ("erik") rule.
///
/// A surviving cell whose age is in `mature_age..elder_age` is drawn as old;
/// at `elder_age` or above it becomes an elder candidate and is marked with
/// `elder_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingConfig {
    /// First age drawn with the old color.
    pub mature_age: u32,
    /// First age marked as an elder candidate.
    pub elder_age: u32,
    /// Display value for elder candidates.
    pub elder_value: char,
    /// Display value for every other cell.
    pub default_value: char,
}

impl Default for AgingConfig {
    fn default() -> Self {
        Self {
            mature_age: 5,
            elder_age: 10,
            elder_value: 'E',
            default_value: '#',
        }
    }
}

impl AgingConfig {
    /// True if `age` falls in the mature band.
    #[inline]
    pub fn is_mature(&self, age: u32) -> bool {
        age >= self.mature_age && age < self.elder_age
    }

    /// True if `age` qualifies a surviving cell as an elder candidate.
    #[inline]
    pub fn is_elder(&self, age: u32) -> bool {
        age >= self.elder_age
    }
}

/// Scheduling of the evaluation and commit phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Single-threaded, in coordinate order.
    #[default]
    Sequential,
    /// Data-parallel across cells (rayon).
    Parallel,
}

/// Interior grid dimensions, written as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedDimensions(s.to_string());
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(malformed)?;
        let width: usize = width.trim().parse().map_err(|_| malformed())?;
        let height: usize = height.trim().parse().map_err(|_| malformed())?;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }
}

impl SimulationConfig {
    /// Interior dimensions requested by this configuration.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Odd-generation rule name, if one distinct from the even rule was given.
    pub fn distinct_odd_rule(&self) -> Option<&str> {
        self.odd_rule
            .as_deref()
            .filter(|name| !name.is_empty() && *name != self.even_rule)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        let p = self.random.alive_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        if self.aging.mature_age == 0 || self.aging.mature_age >= self.aging.elder_age {
            return Err(ConfigError::InvalidAgeThresholds {
                mature: self.aging.mature_age,
                elder: self.aging.elder_age,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Dimensions must be written as WIDTHxHEIGHT, got {0:?}")]
    MalformedDimensions(String),
    #[error("Alive probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("Age thresholds must satisfy 0 < mature ({mature}) < elder ({elder})")]
    InvalidAgeThresholds { mature: u32, elder: u32 },
}
