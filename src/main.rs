mod app;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::GameConfig;
use crate::game::SnakeGame;
use crate::term::TermFrontend;

pub type TermInt = u16;

/// Grid coordinate `(x, y)`. Signed so a head that left the board is still representable.
pub type Cell = (i32, i32);

fn main() -> Result<()> {
    // Logs go to stderr; run with `RUST_LOG=debug ... 2>snake.log` to keep them off the board
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = GameConfig::default();
    let mut game = SnakeGame::new(config, StdRng::from_entropy())?;

    let mut frontend = TermFrontend::new(config.grid())?;
    app::session(&mut frontend, &mut game, config.tick_interval)
}
