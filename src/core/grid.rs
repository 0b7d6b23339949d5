/// Grid coordinates and the 2D vector type every entity is built from
use std::ops::{Add, Mul, Neg, Sub};

/// Integer position or offset on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wrap both axes into `[0, width) x [0, height)`
    pub fn warp(self, grid: Grid) -> Self {
        Self {
            x: self.x.rem_euclid(grid.width as i32),
            y: self.y.rem_euclid(grid.height as i32),
        }
    }

    /// Wrap only the x axis, leaving y untouched
    pub fn warp_x(self, grid: Grid) -> Self {
        Self {
            x: self.x.rem_euclid(grid.width as i32),
            y: self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: i32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// How coordinates outside the grid are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Both axes wrap
    Torus,
    /// x wraps, y is bounded (top and bottom are open edges)
    Cylinder,
}

/// Fixed-size cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major index, `None` outside the grid
    pub fn index(&self, pos: Vec2) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Inverse of `index`
    pub fn position(&self, index: usize) -> Vec2 {
        Vec2::new((index % self.width) as i32, (index / self.width) as i32)
    }
}
