use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::food::{self, Food, PlacementError};
use crate::grid::Grid;
use crate::snake::{Direction, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// What a single call to [`SnakeGame::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over, nothing was simulated.
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
    /// Food was eaten but no free cell is left for the next one.
    Filled,
}

/// All state of one game session. Rendering and input live elsewhere and only
/// talk to the simulation through `request_direction`, `tick` and `restart`.
pub struct SnakeGame<R> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    state: GameState,
    pending_direction: Option<Direction>,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, PlacementError> {
        let grid = config.grid();
        let snake = Snake::new(config.start_cell(), config.initial_snake_length, Direction::Right);
        let mut game = SnakeGame {
            config,
            grid,
            snake,
            food: Food::new((0, 0)),
            score: 0,
            state: GameState::Running,
            pending_direction: None,
            rng,
        };

        game.restart()?;
        Ok(game)
    }

    /// Throws away the current session: fresh snake, fresh food, zero score.
    pub fn restart(&mut self) -> Result<(), PlacementError> {
        let start = self.config.start_cell();
        self.snake = Snake::new(start, self.config.initial_snake_length, Direction::Right);
        self.food.relocate(food::place(&self.grid, &self.snake, &mut self.rng)?);
        self.score = 0;
        self.state = GameState::Running;
        self.pending_direction = None;

        info!(
            "New game on a {}x{} grid, food at {:?}",
            self.grid.width(),
            self.grid.height(),
            self.food.position()
        );
        Ok(())
    }

    /// Queues a heading change for the next tick. Later requests replace earlier ones.
    pub fn request_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Running {
            return TickOutcome::Idle;
        }

        if let Some(dir) = self.pending_direction.take() {
            if !self.snake.change_direction(dir) {
                debug!("Ignored reversal from {:?} to {:?}", self.snake.direction(), dir);
            }
        }

        self.snake.move_step();

        let collision = if self.snake.collides_with_wall(&self.grid) {
            Some(Collision::Wall)
        } else if self.snake.collides_with_itself() {
            Some(Collision::SelfBite)
        } else {
            None
        };

        if let Some(collision) = collision {
            self.state = GameState::GameOver;
            info!("Game over ({:?}) at {:?}, score {}", collision, self.snake.head(), self.score);
            return TickOutcome::Crashed(collision);
        }

        if self.snake.head() != self.food.position() {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        self.score += self.config.score_per_food;

        match food::place(&self.grid, &self.snake, &mut self.rng) {
            Ok(cell) => {
                self.food.relocate(cell);
                debug!(
                    "Food eaten, length {}, score {}, next food at {:?}",
                    self.snake.len(),
                    self.score,
                    cell
                );
                TickOutcome::Ate
            }
            Err(e) => {
                self.state = GameState::GameOver;
                info!("Game over ({}), score {}", e, self.score);
                TickOutcome::Filled
            }
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn new_game(seed: u64) -> SnakeGame<StdRng> {
        SnakeGame::new(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_fresh_game() {
        let game = new_game(1);

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().body(), &[(10, 10)]);
        assert_eq!(game.snake().direction(), Right);
        assert!(!game.snake().contains(game.food().position()));
    }

    #[test]
    fn test_first_tick_moves_right() {
        let mut game = new_game(2);
        game.food.relocate((0, 0));

        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().head(), (11, 10));
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn test_eating_grows_scores_and_relocates() {
        let mut game = new_game(3);
        game.food.relocate((11, 10));

        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(game.snake().head(), (11, 10));
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.score(), 10);
        assert!(!game.snake().contains(game.food().position()));

        // The extra cell stays after the next move
        game.food.relocate((0, 0));
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().body(), &[(12, 10), (11, 10)]);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut game = new_game(4);
        game.snake = Snake::new((15, 10), 5, Right);
        game.food.relocate((0, 0));
        game.score = 30;

        for _ in 0..4 {
            assert_eq!(game.tick(), TickOutcome::Moved);
        }
        assert_eq!(game.snake().head(), (19, 10));

        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 30);

        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.snake().head(), (20, 10));
        assert_eq!(game.score(), 30);
    }

    #[test]
    fn test_collision_wins_over_food() {
        let mut game = new_game(5);
        // (5,5) (4,5) (3,5) (2,5) (1,5), curling back into (4,5)
        game.snake = Snake::new((5, 5), 5, Right);
        game.food.relocate((0, 0));

        game.request_direction(Down);
        game.tick();
        game.request_direction(Left);
        game.tick();

        game.food.relocate((4, 5));
        game.request_direction(Up);

        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::SelfBite));
        assert_eq!(game.score(), 0);
        assert_eq!(game.food().position(), (4, 5));
        assert_eq!(game.snake().len(), 5);
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut game = new_game(6);
        game.snake = Snake::new((10, 10), 4, Up);
        game.food.relocate((0, 0));

        game.request_direction(Down);
        game.tick();

        assert_eq!(game.snake().direction(), Up);
        assert_eq!(game.snake().head(), (10, 9));
    }

    #[test]
    fn test_latest_request_before_tick_wins() {
        let mut game = new_game(7);
        game.food.relocate((0, 0));

        game.request_direction(Up);
        game.request_direction(Down);
        game.tick();

        assert_eq!(game.snake().direction(), Down);
        assert_eq!(game.snake().head(), (10, 11));

        // Heading Down, so only the last request counts: Left is taken
        game.request_direction(Up);
        game.request_direction(Left);
        game.tick();
        assert_eq!(game.snake().head(), (9, 11));
    }

    #[test]
    fn test_fill_the_grid() {
        let config = GameConfig { grid_width: 2, grid_height: 1, ..GameConfig::default() };
        let mut game = SnakeGame::new(config, StdRng::seed_from_u64(8)).unwrap();
        // Stacked growth keeps (0,0) covered after the move, so eating fills the board
        game.snake = Snake::new((0, 0), 1, Right);
        game.snake.grow();
        game.snake.grow();
        game.food.relocate((1, 0));

        assert_eq!(game.tick(), TickOutcome::Filled);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = new_game(9);
        game.food.relocate((11, 10));
        game.tick();
        game.snake = Snake::new((19, 0), 1, Right);
        game.tick();
        assert_eq!(game.state(), GameState::GameOver);

        game.request_direction(Up);
        game.restart().unwrap();

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().body(), &[(10, 10)]);
        assert!(!game.snake().contains(game.food().position()));

        game.food.relocate((0, 0));
        game.tick();
        assert_eq!(game.snake().head(), (11, 10));
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Up), Just(Down), Just(Left), Just(Right)]
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            turns in prop::collection::vec(prop::option::of(any_direction()), 1..60)
        ) {
            let mut game = new_game(seed);

            for turn in turns {
                if let Some(dir) = turn {
                    game.request_direction(dir);
                }

                let (score, len) = (game.score(), game.snake().len());
                let outcome = game.tick();

                match outcome {
                    TickOutcome::Ate => {
                        prop_assert_eq!(game.score(), score + 10);
                        prop_assert_eq!(game.snake().len(), len + 1);
                        prop_assert!(!game.snake().contains(game.food().position()));
                    }
                    TickOutcome::Moved | TickOutcome::Crashed(_) => {
                        prop_assert_eq!(game.score(), score);
                        prop_assert_eq!(game.snake().len(), len);
                    }
                    TickOutcome::Idle => {
                        prop_assert_eq!(game.score(), score);
                        prop_assert_eq!(game.state(), GameState::GameOver);
                    }
                    TickOutcome::Filled => {
                        prop_assert!(false, "eating always frees the old tail cell")
                    }
                }
            }
        }
    }
}
