#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Conway's Game of Life engine consumed by the playback controller.
//!
//! The controller only sees the narrow [`Universe`] contract: dimensions, a
//! borrowed cell view, `tick` and `toggle_cell`.

mod conway;
mod grid;

pub use conway::ConwayUniverse;
pub use grid::{GridCell, Loc, Neighborhood, WorldGrid, WorldGridCells};

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;

pub trait Universe {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Row-major view of `width * height` cells. The borrow ends before the
    /// next `tick` or `toggle_cell`, so it never outlives the data it shows.
    fn cells(&self) -> &[Cell];

    /// Advances the automaton one generation.
    fn tick(&mut self);

    /// Flips one cell. Panics when `row >= height` or `col >= width`.
    fn toggle_cell(&mut self, row: u32, col: u32);
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn toggle(&mut self) {
        *self = match *self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        };
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
