pub mod macros;
pub mod snake;
pub mod tetris;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use ratatui::DefaultTerminal;

use crate::config::ArcadeConfig;
use crate::register_games;

/// Metadata about a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Game initializer function - builds the game from config and runs it
pub type GameInitializer =
    fn(ArcadeConfig, u64, DefaultTerminal) -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// Registry entry containing metadata and initializer
pub struct GameRegistry {
    pub info: GameInfo,
    pub initializer: GameInitializer,
}

// Register all games here - a new game only needs a new entry
register_games! {
    snake => {
        game: SnakeGame,
        config: snake,
        id: "snake",
        name: "Snake",
        description: "Eat the score block, grow, and never bite your own tail"
    },
    tetris => {
        game: TetrisGame,
        config: tetris,
        id: "tetris",
        name: "Tetris",
        description: "Rotate falling blocks and fill rows to clear them"
    }
}

/// Ids of every registered game, in menu order
pub fn game_ids() -> Vec<&'static str> {
    get_all_games().iter().map(|g| g.info.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lists_both_games() {
        assert_eq!(game_ids(), vec!["snake", "tetris"]);
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(get_game("tetris").map(|g| g.info.name), Some("Tetris"));
        assert!(get_game("pong").is_none());
    }
}
