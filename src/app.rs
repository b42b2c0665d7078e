use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::game::{GameState, SnakeGame};
use crate::input::Command;
use crate::Cell;

/// Everything the tick driver needs from the outside world: a surface to draw on,
/// a source of commands and a way to ask the player whether to play again.
pub trait Frontend {
    fn setup(&mut self) -> Result<()>;

    /// Undoes `setup`. Also called when `setup` failed halfway.
    fn restore(&mut self) -> Result<()>;

    /// Returns `false` if the player quit before the first round.
    fn show_intro(&mut self) -> Result<bool>;

    fn draw(&mut self, body: &[Cell], food: Cell, score: u32) -> Result<()>;

    /// Waits at most `timeout` and returns the commands received meanwhile, oldest first.
    fn poll_commands(&mut self, timeout: Duration) -> Result<Vec<Command>>;

    fn set_paused(&mut self, paused: bool) -> Result<()>;

    fn ask_restart(&mut self, score: u32) -> Result<bool>;
}

enum RoundEnd {
    GameOver,
    Quit,
}

/// Sets the frontend up, plays, and always restores it before reporting an error.
pub fn session<F, R>(
    frontend: &mut F,
    game: &mut SnakeGame<R>,
    tick_interval: Duration,
) -> Result<()>
where
    F: Frontend,
    R: Rng,
{
    let res = frontend.setup().and_then(|()| {
        if frontend.show_intro()? {
            run(frontend, game, tick_interval)
        } else {
            Ok(())
        }
    });

    let restored = frontend.restore();
    res?;
    restored
}

/// Runs rounds until the player quits or declines to play again.
pub fn run<F, R>(frontend: &mut F, game: &mut SnakeGame<R>, tick_interval: Duration) -> Result<()>
where
    F: Frontend,
    R: Rng,
{
    loop {
        match play_round(frontend, game, tick_interval)? {
            RoundEnd::Quit => {
                info!("Quit with score {}", game.score());
                return Ok(());
            }
            RoundEnd::GameOver => {
                if !frontend.ask_restart(game.score())? {
                    info!("Restart declined, final score {}", game.score());
                    return Ok(());
                }
                game.restart()?;
            }
        }
    }
}

fn play_round<F, R>(
    frontend: &mut F,
    game: &mut SnakeGame<R>,
    tick_interval: Duration,
) -> Result<RoundEnd>
where
    F: Frontend,
    R: Rng,
{
    let mut paused = false;
    let mut next_tick = Instant::now() + tick_interval;

    draw(frontend, game)?;

    loop {
        // While paused the deadline is stale, so wait a whole interval for input instead
        let timeout = if paused {
            tick_interval
        } else {
            next_tick.saturating_duration_since(Instant::now())
        };

        for cmd in frontend.poll_commands(timeout)? {
            match cmd {
                Command::Quit => return Ok(RoundEnd::Quit),
                Command::Turn(dir) if !paused => game.request_direction(dir),
                Command::Turn(_) => {}
                Command::TogglePause => {
                    paused = !paused;
                    debug!("Paused: {}", paused);
                    frontend.set_paused(paused)?;

                    if !paused {
                        draw(frontend, game)?;
                        next_tick = Instant::now() + tick_interval;
                    }
                }
            }
        }

        let now = Instant::now();
        if paused || now < next_tick {
            continue;
        }

        next_tick = next_deadline(next_tick, now, tick_interval);
        game.tick();
        draw(frontend, game)?;

        if game.state() == GameState::GameOver {
            return Ok(RoundEnd::GameOver);
        }
    }
}

/// Keeps a steady cadence, but after a stall restarts the schedule from `now`
/// rather than firing the missed ticks back to back.
fn next_deadline(previous: Instant, now: Instant, tick_interval: Duration) -> Instant {
    let scheduled = previous + tick_interval;
    if scheduled <= now {
        now + tick_interval
    } else {
        scheduled
    }
}

fn draw<F: Frontend, R: Rng>(frontend: &mut F, game: &SnakeGame<R>) -> Result<()> {
    frontend.draw(game.snake().body(), game.food().position(), game.score())
}
