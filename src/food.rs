use log::warn;
use rand::{seq::IteratorRandom, Rng};
use thiserror::Error;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

/// Random draws tried before falling back to scanning the board for free cells.
const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on a {width}x{height} grid")]
    GridFull { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Unconditional; callers pick a valid cell with [`place`] first.
    pub fn relocate(&mut self, candidate: Cell) {
        self.position = candidate;
    }
}

/// Picks a uniformly random cell of `grid` not covered by `snake`.
pub fn place<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Result<Cell, PlacementError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = (
            rng.gen_range(0..grid.width()) as i32,
            rng.gen_range(0..grid.height()) as i32,
        );

        if !snake.contains(candidate) {
            return Ok(candidate);
        }
    }

    warn!(
        "Food placement gave up sampling after {} attempts, scanning free cells",
        MAX_PLACEMENT_ATTEMPTS
    );

    grid.cells()
        .filter(|cell| !snake.contains(*cell))
        .choose(rng)
        .ok_or(PlacementError::GridFull { width: grid.width(), height: grid.height() })
}
