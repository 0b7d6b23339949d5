// tests/snake_invariants_prop.rs

/**
 * Property tests for the snake step controller.
 *
 * Invariants covered:
 * - Every segment stays inside the grid across wraparound.
 * - Consecutive segments are one cell apart, modulo wrap.
 * - Length always equals initial length plus score.
 * - The score block never sits on the snake while the game runs.
 * - A reversal request never changes the direction.
 */
use proptest::prelude::*;
use termgrid::config::SnakeConfig;
use termgrid::core::grid::{Grid, Vec2};
use termgrid::games::snake::{Direction, Snake, SnakeGame, SnakeStatus};
use termgrid::Context;

fn unit_apart(a: Vec2, b: Vec2, grid: Grid) -> bool {
    let d = (a - b).warp(grid);
    let (w, h) = (grid.width as i32, grid.height as i32);
    matches!((d.x, d.y), (1, 0) | (0, 1)) || d == Vec2::new(w - 1, 0) || d == Vec2::new(0, h - 1)
}

fn assert_invariants(game: &SnakeGame, config: &SnakeConfig) {
    let grid = game.grid();
    let segments = game.snake().segments();

    for pos in segments {
        assert!(grid.contains(*pos), "segment {pos:?} escaped the grid");
    }
    for pair in segments.windows(2) {
        assert!(unit_apart(pair[0], pair[1], grid), "{:?} and {:?} not adjacent", pair[0], pair[1]);
    }
    assert_eq!(segments.len(), config.initial_length + game.score() as usize);

    if game.status() == SnakeStatus::Running {
        let block = game.score_block().expect("running game has a score block");
        assert!(!game.snake().contains(block));
    }
}

fn direction(i: u8) -> Direction {
    Direction::ALL[(i % 4) as usize]
}

#[test]
fn scenario_a_growth_on_first_tick() {
    let config = SnakeConfig::default();
    let snake = Snake::new(Vec2::new(10, 10), Direction::Up, 3, config.grid());
    let mut game = SnakeGame::with_layout(&config, snake, Vec2::new(10, 9), 2024);
    let (ctx, _rx) = Context::new();

    game.step(&ctx);

    assert_eq!(game.snake().head(), Vec2::new(10, 9));
    assert_eq!(game.snake().len(), 4);
    assert_eq!(game.score(), 1);
    assert_eq!(
        game.snake().segments(),
        &[Vec2::new(10, 9), Vec2::new(10, 10), Vec2::new(10, 11), Vec2::new(10, 12)]
    );
    let block = game.score_block().unwrap();
    assert!(!game.snake().contains(block));
    assert_eq!(game.status(), SnakeStatus::Running);
}

#[test]
fn no_reversal_when_moving_right() {
    let config = SnakeConfig::default();
    let snake = Snake::new(Vec2::new(5, 5), Direction::Right, 3, config.grid());
    let mut game = SnakeGame::with_layout(&config, snake, Vec2::new(0, 0), 1);

    assert!(!game.steer(Direction::Left));
    assert_eq!(game.snake().direction(), Direction::Right);
}

#[test]
fn head_wraps_across_every_edge() {
    let config = SnakeConfig::default();
    let (ctx, _rx) = Context::new();
    for (start, dir, expected) in [
        (Vec2::new(0, 5), Direction::Left, Vec2::new(19, 5)),
        (Vec2::new(19, 5), Direction::Right, Vec2::new(0, 5)),
        (Vec2::new(5, 0), Direction::Up, Vec2::new(5, 19)),
        (Vec2::new(5, 19), Direction::Down, Vec2::new(5, 0)),
    ] {
        let snake = Snake::new(start, dir, 3, config.grid());
        let mut game = SnakeGame::with_layout(&config, snake, Vec2::new(10, 10), 1);
        game.step(&ctx);
        assert_eq!(game.snake().head(), expected);
        assert_invariants(&game, &config);
    }
}

proptest! {
    #[test]
    fn random_play_respects_invariants(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(proptest::option::of(any::<u8>()), 1..300),
    ) {
        let config = SnakeConfig { width: 8, height: 8, ..SnakeConfig::default() };
        let mut game = SnakeGame::new(&config, seed);
        let (ctx, _rx) = Context::new();

        for input in inputs {
            if let Some(i) = input {
                let before = game.snake().direction();
                let requested = direction(i);
                let blocked = game.snake().blocked_direction(game.grid());
                game.steer(requested);
                if blocked == Some(requested) {
                    prop_assert_eq!(game.snake().direction(), before);
                }
            }

            let score_before = game.score();
            let len_before = game.snake().len();
            game.step(&ctx);
            assert_invariants(&game, &config);

            if game.score() > score_before {
                prop_assert_eq!(game.score(), score_before + 1);
                prop_assert_eq!(game.snake().len(), len_before + 1);
            }
            if game.status() == SnakeStatus::GameOver {
                break;
            }
        }
    }
}
