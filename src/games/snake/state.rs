use crate::core::grid::{Grid, Vec2};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit vector, y grows downwards
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0, -1),
            Direction::Left => Vec2::new(-1, 0),
            Direction::Right => Vec2::new(1, 0),
            Direction::Down => Vec2::new(0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

/// Ordered segments, head at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Vec2>,
    direction: Direction,
}

impl Snake {
    /// Lay `length` segments out behind `head`, wrapped into the grid
    pub fn new(head: Vec2, direction: Direction, length: usize, grid: Grid) -> Self {
        let back = -direction.vector();
        let segments = (0..length.max(1) as i32)
            .map(|i| (head + back * i).warp(grid))
            .collect();
        Self {
            segments,
            direction,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    pub fn neck(&self) -> Option<Vec2> {
        self.segments.get(1).copied()
    }

    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.segments.contains(&pos)
    }

    /// Direction leading from the head into the neck. Derived from the
    /// current segments each time it is asked for.
    pub fn blocked_direction(&self, grid: Grid) -> Option<Direction> {
        let neck = self.neck()?;
        let head = self.head();
        Direction::ALL
            .into_iter()
            .find(|d| (head + d.vector()).warp(grid) == neck)
    }

    /// Returns false when the request would turn the head into its neck
    pub fn steer(&mut self, direction: Direction, grid: Grid) -> bool {
        if self.blocked_direction(grid) == Some(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn next_head(&self, grid: Grid) -> Vec2 {
        (self.head() + self.direction.vector()).warp(grid)
    }

    /// Insert a new head and keep every existing segment
    pub fn grow(&mut self, new_head: Vec2) {
        self.segments.insert(0, new_head);
    }

    /// Shift every segment into its predecessor, then move the head
    pub fn advance(&mut self, grid: Grid) {
        let next = self.next_head(grid);
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = next;
    }

    pub fn bites_itself(&self) -> bool {
        self.segments[1..].contains(&self.head())
    }
}
