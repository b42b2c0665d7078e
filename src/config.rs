use std::time::Duration;

use crate::grid::Grid;
use crate::{Cell, TermInt};

pub const GRID_WIDTH: TermInt = 20;
pub const GRID_HEIGHT: TermInt = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 1;
pub const TICK_INTERVAL_MS: u64 = 150;
pub const SCORE_PER_FOOD: u32 = 10;

/// Game settings. Everything is fixed at build time through [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: TermInt,
    pub grid_height: TermInt,
    pub initial_snake_length: usize,
    pub tick_interval: Duration,
    pub score_per_food: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            score_per_food: SCORE_PER_FOOD,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Where a fresh snake's head starts.
    pub fn start_cell(&self) -> Cell {
        ((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }
}
