use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::TetrisConfig;
use crate::core::board::{Board, CellShape};
use crate::core::game::{Context, Game};
use crate::core::grid::{Grid, Topology, Vec2};
use crate::core::renderer::GameRenderer;
use crate::games::tetris::elimination::collapse_full_rows;
use crate::games::tetris::piece::Tetromino;
use crate::games::tetris::renderer::TetrisRenderer;

const DOWN: Vec2 = Vec2::new(0, 1);
const LEFT: Vec2 = Vec2::new(-1, 0);
const RIGHT: Vec2 = Vec2::new(1, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisStatus {
    /// A piece is on the board and falling
    Falling,
    /// Terminal, every further operation is ignored
    GameOver,
}

/// Player operations on the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisAction {
    MoveLeft,
    MoveRight,
    Rotate,
    Fall,
    HardDrop,
}

pub fn action_for_key(code: KeyCode) -> Option<TetrisAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(TetrisAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(TetrisAction::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(TetrisAction::Rotate),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(TetrisAction::Fall),
        KeyCode::Char(' ') => Some(TetrisAction::HardDrop),
        _ => None,
    }
}

/// Result of a fall or hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    Moved,
    /// Committed to the board, `rows` were collapsed, a new piece spawned
    Landed { rows: usize },
    GameOver,
    Ignored,
}

pub struct TetrisGame {
    config: TetrisConfig,
    board: Board,
    piece: Tetromino,
    status: TetrisStatus,
    rows_cleared: usize,
    pieces_landed: usize,
    rng: StdRng,
    renderer: TetrisRenderer,
}

impl TetrisGame {
    pub fn new(config: &TetrisConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let piece = Tetromino::random(config.grid(), &mut rng);
        Self::assemble(config, piece, rng)
    }

    /// Start with a chosen first piece; later pieces are random
    pub fn with_piece(config: &TetrisConfig, piece: Tetromino, seed: u64) -> Self {
        Self::assemble(config, piece, StdRng::seed_from_u64(seed))
    }

    fn assemble(config: &TetrisConfig, piece: Tetromino, rng: StdRng) -> Self {
        let mut game = Self {
            config: config.clone(),
            board: Board::new(config.grid()),
            piece,
            status: TetrisStatus::Falling,
            rows_cleared: 0,
            pieces_landed: 0,
            rng,
            renderer: TetrisRenderer,
        };
        game.paint_piece();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access to the pile, for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn grid(&self) -> Grid {
        self.board.grid()
    }

    pub fn piece(&self) -> &Tetromino {
        &self.piece
    }

    pub fn status(&self) -> TetrisStatus {
        self.status
    }

    pub fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    pub fn pieces_landed(&self) -> usize {
        self.pieces_landed
    }

    pub fn apply(&mut self, action: TetrisAction, ctx: &Context) {
        match action {
            TetrisAction::MoveLeft => {
                self.move_left();
            }
            TetrisAction::MoveRight => {
                self.move_right();
            }
            TetrisAction::Rotate => {
                self.rotate();
            }
            TetrisAction::Fall => {
                self.fall(ctx);
            }
            TetrisAction::HardDrop => {
                self.hard_drop(ctx);
            }
        }
    }

    pub fn rotate(&mut self) -> bool {
        self.try_transform(Tetromino::rotated)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_transform(|p| p.shifted(LEFT))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_transform(|p| p.shifted(RIGHT))
    }

    /// One row down, landing the piece when it cannot move
    pub fn fall(&mut self, ctx: &Context) -> FallOutcome {
        if self.status == TetrisStatus::GameOver {
            return FallOutcome::Ignored;
        }
        self.hide_piece();
        let trial = self.piece.shifted(DOWN);
        if !self.collides(&trial) {
            self.piece = trial;
            self.paint_piece();
            return FallOutcome::Moved;
        }
        self.paint_piece();
        self.land(ctx)
    }

    /// Drop straight to the last free row and land there
    pub fn hard_drop(&mut self, ctx: &Context) -> FallOutcome {
        if self.status == TetrisStatus::GameOver {
            return FallOutcome::Ignored;
        }
        self.hide_piece();
        let mut trial = self.piece;
        loop {
            let next = trial.shifted(DOWN);
            if self.collides(&next) {
                break;
            }
            trial = next;
        }
        self.piece = trial;
        self.paint_piece();
        ctx.reset_tick();
        self.land(ctx)
    }

    /// Hide, build the trial, then commit it or repaint the original
    fn try_transform(&mut self, op: impl FnOnce(&Tetromino) -> Tetromino) -> bool {
        if self.status == TetrisStatus::GameOver {
            return false;
        }
        self.hide_piece();
        let trial = op(&self.piece);
        let accepted = !self.collides(&trial);
        if accepted {
            self.piece = trial;
        }
        self.paint_piece();
        accepted
    }

    fn collides(&self, piece: &Tetromino) -> bool {
        self.board
            .check_collision(piece.cells(), Topology::Cylinder)
            .blocked
    }

    /// Lands the piece at its last valid position, the one just repainted,
    /// not at the blocked trial one row lower. The overflow check counts
    /// in-bounds cells of that position: fewer than four means part of the
    /// piece is still above the grid and the pile has reached the top.
    /// A piece resting on the floor always counts four.
    fn land(&mut self, ctx: &Context) -> FallOutcome {
        let projection = self.board.project(self.piece.cells(), Topology::Cylinder);
        if projection.in_bounds() < Tetromino::CELLS {
            self.game_over(ctx);
            return FallOutcome::GameOver;
        }

        let cells: Vec<Vec2> = projection.positions().collect();
        self.board.occupy(cells, self.piece.color);
        let rows = collapse_full_rows(&mut self.board);
        self.rows_cleared += rows;
        self.pieces_landed += 1;
        debug!(shape = ?self.piece.shape, x = self.piece.pos.x, y = self.piece.pos.y, rows, "piece landed");

        self.piece = Tetromino::random(self.grid(), &mut self.rng);
        self.paint_piece();
        FallOutcome::Landed { rows }
    }

    fn game_over(&mut self, ctx: &Context) {
        self.status = TetrisStatus::GameOver;
        ctx.stop_ticks();
        info!(
            rows_cleared = self.rows_cleared,
            pieces = self.pieces_landed,
            "tetris game over"
        );
    }

    fn piece_cells(&self) -> Vec<Vec2> {
        self.board
            .project(self.piece.cells(), Topology::Cylinder)
            .positions()
            .collect()
    }

    fn paint_piece(&mut self) {
        let cells = self.piece_cells();
        self.board.paint(cells, self.piece.color, CellShape::Square);
    }

    fn hide_piece(&mut self) {
        let cells: Vec<Vec2> = self
            .piece_cells()
            .into_iter()
            .filter(|pos| !self.board.is_occupied(*pos))
            .collect();
        self.board.hide(cells);
    }
}

impl Game for TetrisGame {
    fn tick_rate(&self) -> Duration {
        self.config.tick_rate()
    }

    fn on_tick(&mut self, ctx: &Context) {
        self.fall(ctx);
    }

    fn handle_input(&mut self, key: KeyEvent, ctx: &Context) {
        if let Some(action) = action_for_key(key.code) {
            self.apply(action, ctx);
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        self.renderer.render(frame, self);
    }

    fn is_over(&self) -> bool {
        self.status == TetrisStatus::GameOver
    }
}
