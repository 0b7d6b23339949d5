pub mod board;
pub mod engine;
pub mod game;
pub mod grid;
pub mod menu;
pub mod renderer;
