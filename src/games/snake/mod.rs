/// Snake game module
pub mod game;
pub mod renderer;
pub mod state;

pub use game::{SnakeGame, SnakeStatus};
pub use renderer::SnakeRenderer;
pub use state::{Direction, Snake};
