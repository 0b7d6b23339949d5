use rand::Rng;

use crate::core::board::CellColor;
use crate::core::grid::{Grid, Vec2};

/// Canonical tetromino shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Shape {
    pub fn all() -> &'static [Shape] {
        use Shape::*;
        &[I, O, T, S, Z, J, L]
    }

    /// Offsets around the pivot (0, 0), y grows downwards
    pub fn offsets(self) -> [Vec2; 4] {
        use Shape::*;
        let cells: [(i32, i32); 4] = match self {
            I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            S => [(0, 0), (1, 0), (-1, 1), (0, 1)],
            Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            J => [(-1, 0), (0, 0), (1, 0), (1, 1)],
            L => [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        };
        cells.map(|(x, y)| Vec2::new(x, y))
    }

    /// The square is left as is; every other shape turns about its pivot.
    pub fn rotates(self) -> bool {
        self != Shape::O
    }
}

pub const PALETTE: [CellColor; 6] = [
    CellColor::Red,
    CellColor::Green,
    CellColor::Blue,
    CellColor::Yellow,
    CellColor::Cyan,
    CellColor::Magenta,
];

/// Anchor plus four relative cells. A plain value: every trial is a new piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tetromino {
    pub pos: Vec2,
    pub shape: Shape,
    pub offsets: [Vec2; 4],
    pub color: CellColor,
}

impl Tetromino {
    pub const CELLS: usize = 4;

    pub fn new(shape: Shape, pos: Vec2, color: CellColor) -> Self {
        Self {
            pos,
            shape,
            offsets: shape.offsets(),
            color,
        }
    }

    /// Centered above the visible grid, anchor row -1
    pub fn spawn_point(grid: Grid) -> Vec2 {
        Vec2::new((grid.width / 2) as i32, -1)
    }

    pub fn random(grid: Grid, rng: &mut impl Rng) -> Self {
        let shapes = Shape::all();
        let shape = shapes[rng.random_range(0..shapes.len())];
        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        Self::new(shape, Self::spawn_point(grid), color)
    }

    /// Absolute cells, before any wrapping
    pub fn cells(&self) -> [Vec2; 4] {
        self.offsets.map(|o| self.pos + o)
    }

    /// Quarter turn: (dx, dy) becomes (dy, -dx). The anchor stays put.
    pub fn rotated(&self) -> Self {
        if !self.shape.rotates() {
            return *self;
        }
        Self {
            offsets: self.offsets.map(|o| Vec2::new(o.y, -o.x)),
            ..*self
        }
    }

    pub fn shifted(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            ..*self
        }
    }
}
