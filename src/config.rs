use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::engine::{checked_period, MAX_TICK_PERIOD, MIN_TICK_PERIOD};
use crate::core::grid::Grid;

const MIN_SIDE: usize = 4;
const MAX_SIDE: usize = 256;

/// Configuration for the snake game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub width: usize,
    pub height: usize,
    /// Initial length of the snake
    pub initial_length: usize,
    /// Base tick period in milliseconds
    pub tick_ms: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            initial_length: 3,
            tick_ms: 150,
        }
    }
}

impl SnakeConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Configuration for the falling-block game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    pub tick_ms: u64,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            tick_ms: 500,
        }
    }
}

impl TetrisConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Constant multiplier applied to every tick rate
    pub speed: f64,
    /// Fixed RNG seed, random when absent
    pub seed: Option<u64>,
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            seed: None,
            snake: SnakeConfig::default(),
            tetris: TetrisConfig::default(),
        }
    }
}

impl ArcadeConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to load config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.speed.is_finite() && self.speed > 0.0,
            "speed must be a positive number, got {}",
            self.speed
        );
        for (name, w, h) in [
            ("snake", self.snake.width, self.snake.height),
            ("tetris", self.tetris.width, self.tetris.height),
        ] {
            ensure!(
                (MIN_SIDE..=MAX_SIDE).contains(&w) && (MIN_SIDE..=MAX_SIDE).contains(&h),
                "{name} grid sides must be within {MIN_SIDE}..={MAX_SIDE}, got {w}x{h}"
            );
        }
        ensure!(
            (1..=self.snake.height).contains(&self.snake.initial_length),
            "snake initial_length must be within 1..={}, got {}",
            self.snake.height,
            self.snake.initial_length
        );
        ensure!(
            self.snake.tick_ms > 0 && self.tetris.tick_ms > 0,
            "tick_ms must be positive"
        );
        for (name, base) in [
            ("snake", self.snake.tick_rate()),
            ("tetris", self.tetris.tick_rate()),
        ] {
            ensure!(
                checked_period(base, self.speed).is_some(),
                "speed {} puts the {name} tick outside {MIN_TICK_PERIOD:?}..={MAX_TICK_PERIOD:?}",
                self.speed
            );
        }
        Ok(())
    }
}
