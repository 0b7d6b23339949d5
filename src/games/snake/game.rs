use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SnakeConfig;
use crate::core::board::{Board, CellColor, CellShape};
use crate::core::game::{Context, Game};
use crate::core::grid::{Grid, Topology, Vec2};
use crate::core::renderer::GameRenderer;
use crate::games::snake::renderer::SnakeRenderer;
use crate::games::snake::state::{Direction, Snake};

pub const SNAKE_COLOR: CellColor = CellColor::Green;
pub const SCORE_BLOCK_COLOR: CellColor = CellColor::Yellow;
pub const GAME_OVER_COLOR: CellColor = CellColor::Red;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeStatus {
    Running,
    /// Terminal, every further tick is ignored
    GameOver,
}

/// Arrow keys or WASD
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Draw a random cell, then scan forward row-major until one is off the snake.
/// `None` once the snake covers the whole grid.
pub fn spawn_score_block(snake: &Snake, grid: Grid, rng: &mut impl Rng) -> Option<Vec2> {
    let total = grid.cell_count();
    let start = rng.random_range(0..total);
    (0..total)
        .map(|k| grid.position((start + k) % total))
        .find(|pos| !snake.contains(*pos))
}

pub struct SnakeGame {
    config: SnakeConfig,
    board: Board,
    snake: Snake,
    score_block: Option<Vec2>,
    score: u32,
    status: SnakeStatus,
    rng: StdRng,
    renderer: SnakeRenderer,
}

impl SnakeGame {
    /// Snake of the configured length at the grid center, facing up
    pub fn new(config: &SnakeConfig, seed: u64) -> Self {
        let grid = config.grid();
        let head = Vec2::new((grid.width / 2) as i32, (grid.height / 2) as i32);
        let snake = Snake::new(head, Direction::Up, config.initial_length, grid);
        let mut rng = StdRng::seed_from_u64(seed);
        let score_block = spawn_score_block(&snake, grid, &mut rng);
        Self::assemble(config, snake, score_block, rng)
    }

    /// Start from an explicit layout. `score_block` must not lie on the snake.
    pub fn with_layout(config: &SnakeConfig, snake: Snake, score_block: Vec2, seed: u64) -> Self {
        debug_assert!(!snake.contains(score_block));
        Self::assemble(config, snake, Some(score_block), StdRng::seed_from_u64(seed))
    }

    fn assemble(config: &SnakeConfig, snake: Snake, score_block: Option<Vec2>, rng: StdRng) -> Self {
        let mut game = Self {
            config: config.clone(),
            board: Board::new(config.grid()),
            snake,
            score_block,
            score: 0,
            status: SnakeStatus::Running,
            rng,
            renderer: SnakeRenderer,
        };
        game.paint();
        game
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    pub fn score_block(&self) -> Option<Vec2> {
        self.score_block
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> Grid {
        self.board.grid()
    }

    /// Change direction unless it would reverse into the neck.
    /// Ignored once the game is over.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status == SnakeStatus::GameOver {
            return false;
        }
        let grid = self.grid();
        self.snake.steer(direction, grid)
    }

    pub fn step(&mut self, ctx: &Context) {
        if self.status == SnakeStatus::GameOver {
            return;
        }
        let grid = self.grid();

        self.board.hide(self.snake.segments().iter().copied());

        let next = self.snake.next_head(grid);
        if self.score_block == Some(next) {
            self.snake.grow(next);
            self.score += 1;
            self.score_block = spawn_score_block(&self.snake, grid, &mut self.rng);
            debug!(score = self.score, length = self.snake.len(), "score block eaten");
        } else {
            self.snake.advance(grid);
        }

        self.paint();

        if self.snake.bites_itself() {
            self.game_over(ctx, "self collision");
        } else if self.score_block.is_none() {
            self.game_over(ctx, "board full");
        }
    }

    fn paint(&mut self) {
        let cells: Vec<Vec2> = self
            .board
            .project(self.snake.segments().iter().copied(), Topology::Torus)
            .positions()
            .collect();
        self.board.paint(cells, SNAKE_COLOR, CellShape::Square);
        if let Some(block) = self.score_block {
            self.board.paint([block], SCORE_BLOCK_COLOR, CellShape::Round);
        }
    }

    fn game_over(&mut self, ctx: &Context, reason: &str) {
        self.status = SnakeStatus::GameOver;
        self.board.recolor_visible(GAME_OVER_COLOR);
        ctx.stop_ticks();
        info!(score = self.score, length = self.snake.len(), reason, "snake game over");
    }
}

impl Game for SnakeGame {
    fn tick_rate(&self) -> Duration {
        self.config.tick_rate()
    }

    fn on_tick(&mut self, ctx: &Context) {
        self.step(ctx);
    }

    fn handle_input(&mut self, key: KeyEvent, _ctx: &Context) {
        if let Some(direction) = direction_for_key(key.code) {
            self.steer(direction);
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        self.renderer.render(frame, self);
    }

    fn is_over(&self) -> bool {
        self.status == SnakeStatus::GameOver
    }
}
