/// Occupancy board shared by every game, plus the collision checker
use crate::core::grid::{Grid, Topology, Vec2};

/// Fill color of a cell, mapped to a terminal color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
    #[default]
    Default,
}

/// Shape primitive used to draw a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellShape {
    #[default]
    Square,
    Round,
}

/// One cell record: occupancy plus paint attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    pub occupied: bool,
    pub visible: bool,
    pub color: CellColor,
    pub shape: CellShape,
}

impl Block {
    pub const EMPTY: Block = Block {
        occupied: false,
        visible: false,
        color: CellColor::Default,
        shape: CellShape::Square,
    };
}

/// Where a candidate cell lands once projected onto the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    InBounds(Vec2),
    /// Above row 0. Legal while a piece is still entering the grid.
    OffTop,
    /// Below the last row, i.e. the ground
    OffBottom,
}

impl Resolved {
    pub fn in_bounds(&self) -> Option<Vec2> {
        match self {
            Resolved::InBounds(pos) => Some(*pos),
            _ => None,
        }
    }
}

/// Resolved cells of one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub cells: Vec<Resolved>,
}

impl Projection {
    /// Number of cells that resolved inside the grid
    pub fn in_bounds(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Resolved::InBounds(_)))
            .count()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cells.iter().filter_map(Resolved::in_bounds)
    }
}

/// Outcome of a collision check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub blocked: bool,
    pub projection: Projection,
}

/// Dense row-major grid of blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    blocks: Vec<Block>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            blocks: vec![Block::EMPTY; grid.cell_count()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn get(&self, pos: Vec2) -> Option<&Block> {
        self.grid.index(pos).map(|i| &self.blocks[i])
    }

    pub fn get_mut(&mut self, pos: Vec2) -> Option<&mut Block> {
        let i = self.grid.index(pos)?;
        Some(&mut self.blocks[i])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.blocks.chunks(self.grid.width)
    }

    pub fn is_occupied(&self, pos: Vec2) -> bool {
        self.get(pos).is_some_and(|b| b.occupied)
    }

    /// Map one cell onto the board under the given topology
    pub fn resolve(&self, pos: Vec2, topology: Topology) -> Resolved {
        match topology {
            Topology::Torus => Resolved::InBounds(pos.warp(self.grid)),
            Topology::Cylinder => {
                let pos = pos.warp_x(self.grid);
                if pos.y < 0 {
                    Resolved::OffTop
                } else if pos.y as usize >= self.grid.height {
                    Resolved::OffBottom
                } else {
                    Resolved::InBounds(pos)
                }
            }
        }
    }

    pub fn project<I>(&self, cells: I, topology: Topology) -> Projection
    where
        I: IntoIterator<Item = Vec2>,
    {
        Projection {
            cells: cells
                .into_iter()
                .map(|pos| self.resolve(pos, topology))
                .collect(),
        }
    }

    /// Blocked iff a cell hits the ground or an occupied block.
    /// Cells above the grid never block on their own.
    pub fn check_collision<I>(&self, cells: I, topology: Topology) -> Collision
    where
        I: IntoIterator<Item = Vec2>,
    {
        let projection = self.project(cells, topology);
        let blocked = projection.cells.iter().any(|cell| match cell {
            Resolved::OffBottom => true,
            Resolved::OffTop => false,
            Resolved::InBounds(pos) => self.is_occupied(*pos),
        });
        Collision { blocked, projection }
    }

    pub fn paint<I>(&mut self, cells: I, color: CellColor, shape: CellShape)
    where
        I: IntoIterator<Item = Vec2>,
    {
        for pos in cells {
            if let Some(block) = self.get_mut(pos) {
                block.visible = true;
                block.color = color;
                block.shape = shape;
            }
        }
    }

    pub fn hide<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        for pos in cells {
            if let Some(block) = self.get_mut(pos) {
                block.visible = false;
            }
        }
    }

    /// Permanently mark cells as occupied and visible
    pub fn occupy<I>(&mut self, cells: I, color: CellColor)
    where
        I: IntoIterator<Item = Vec2>,
    {
        for pos in cells {
            if let Some(block) = self.get_mut(pos) {
                *block = Block {
                    occupied: true,
                    visible: true,
                    color,
                    shape: CellShape::Square,
                };
            }
        }
    }

    pub fn recolor_visible(&mut self, color: CellColor) {
        for block in self.blocks.iter_mut().filter(|b| b.visible) {
            block.color = color;
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|b| b.occupied)
    }

    pub fn row(&self, y: usize) -> &[Block] {
        let w = self.grid.width;
        &self.blocks[y * w..(y + 1) * w]
    }

    /// Overwrite row `to` with the contents of row `from`
    pub fn copy_row(&mut self, from: usize, to: usize) {
        let w = self.grid.width;
        self.blocks.copy_within(from * w..(from + 1) * w, to * w);
    }

    pub fn clear_row(&mut self, y: usize) {
        let w = self.grid.width;
        self.blocks[y * w..(y + 1) * w].fill(Block::EMPTY);
    }
}
