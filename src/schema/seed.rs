//! Seed types for initializing Cell Culture populations.
//!
//! A seed declares the interior dimensions of the world and the set of
//! interior coordinates that start alive. Seeds come from a text file, from
//! a random fill, or are built directly.
//!
//! # File format
//!
//! ```text
//! 5x5
//! 00000
//! 01000
//! 00100
//! 11100
//! 00000
//! ```
//!
//! The header is `WIDTHxHEIGHT`, followed by exactly `HEIGHT` rows of
//! exactly `WIDTH` characters (`1` alive, `0` dead). Row `r`, column `c`
//! maps to the interior coordinate `(c + 1, r + 1)`; row and column zero
//! belong to the border.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::prelude::*;

use super::{Dimensions, RandomFill};
use crate::compute::Point;

/// Initial population: declared interior size plus the alive coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Interior dimensions.
    pub dimensions: Dimensions,
    /// Interior coordinates that start alive.
    pub alive: BTreeSet<Point>,
}

impl Seed {
    /// Empty seed (everything dead).
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            alive: BTreeSet::new(),
        }
    }

    /// Add alive coordinates.
    pub fn with_alive<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        self.alive.extend(points);
        self
    }

    /// True if `point` starts alive.
    #[inline]
    pub fn is_alive(&self, point: Point) -> bool {
        self.alive.contains(&point)
    }

    /// True if `point` lies inside the declared interior.
    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 1
            && point.y >= 1
            && point.x as usize <= self.dimensions.width
            && point.y as usize <= self.dimensions.height
    }

    /// Check dimensions and that every alive coordinate is interior.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.dimensions.width == 0 || self.dimensions.height == 0 {
            return Err(SeedError::ZeroDimensions);
        }
        match self.alive.iter().find(|p| !self.in_bounds(**p)) {
            Some(&point) => Err(SeedError::OutOfBounds {
                point,
                dimensions: self.dimensions,
            }),
            None => Ok(()),
        }
    }

    /// Load a seed from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = Self::parse(&text)?;
        log::debug!(
            "Loaded seed {} ({} alive) from {}",
            seed.dimensions,
            seed.alive.len(),
            path.display()
        );
        Ok(seed)
    }

    /// Parse the textual seed format.
    pub fn parse(text: &str) -> Result<Self, SeedError> {
        let mut lines = text.lines().map(str::trim_end).skip_while(|l| l.is_empty());

        let header = lines.next().ok_or(SeedError::Empty)?;
        let dimensions: Dimensions = header
            .parse()
            .map_err(|_| SeedError::MalformedHeader(header.to_string()))?;

        let mut rows: Vec<&str> = lines.collect();
        while rows.last().is_some_and(|l| l.is_empty()) {
            rows.pop();
        }
        if rows.len() != dimensions.height {
            return Err(SeedError::RowCount {
                expected: dimensions.height,
                found: rows.len(),
            });
        }

        let mut seed = Self::new(dimensions);
        for (r, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != dimensions.width {
                return Err(SeedError::RowLength {
                    row: r + 1,
                    expected: dimensions.width,
                    found,
                });
            }
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    '1' => {
                        seed.alive.insert(Point::new(c as i32 + 1, r as i32 + 1));
                    }
                    '0' => {}
                    other => {
                        return Err(SeedError::InvalidCharacter {
                            row: r + 1,
                            column: c + 1,
                            found: other,
                        });
                    }
                }
            }
        }

        Ok(seed)
    }

    /// Random interior fill.
    pub fn random(dimensions: Dimensions, fill: &RandomFill) -> Self {
        let mut rng = match fill.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let p = if fill.alive_probability.is_nan() {
            0.0
        } else {
            fill.alive_probability.clamp(0.0, 1.0)
        };
        if p == 0.0 {
            log::warn!("Random fill probability is zero, population starts empty");
        }

        let mut seed = Self::new(dimensions);
        for x in 1..=dimensions.width {
            for y in 1..=dimensions.height {
                if rng.gen_bool(p) {
                    seed.alive.insert(Point::new(x as i32, y as i32));
                }
            }
        }
        seed
    }
}

/// Seed loading failures.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Seed source is empty")]
    Empty,
    #[error("Seed header must be WIDTHxHEIGHT, got {0:?}")]
    MalformedHeader(String),
    #[error("Seed dimensions must be non-zero")]
    ZeroDimensions,
    #[error("Seed declares {expected} rows but contains {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Seed row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Seed row {row}, column {column}: invalid cell {found:?} (expected '0' or '1')")]
    InvalidCharacter {
        row: usize,
        column: usize,
        found: char,
    },
    #[error("Seed coordinate {point} lies outside the {dimensions} interior")]
    OutOfBounds { point: Point, dimensions: Dimensions },
}
