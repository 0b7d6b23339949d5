/// Falling-block game module
pub mod elimination;
pub mod game;
pub mod piece;
pub mod renderer;

pub use game::{FallOutcome, TetrisAction, TetrisGame, TetrisStatus};
pub use piece::{Shape, Tetromino};
pub use renderer::TetrisRenderer;
