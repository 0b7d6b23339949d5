/// Macro to register games in the registry with automatic initializer generation
///
/// Usage in games/mod.rs:
/// ```ignore
/// register_games! {
///     snake => {
///         game: SnakeGame,
///         config: snake,
///         id: "snake",
///         name: "Snake",
///         description: "Eat, grow, don't bite yourself"
///     }
/// }
/// ```
/// `config` names the `ArcadeConfig` field handed to `Game::new`.
#[macro_export]
macro_rules! register_games {
    (
        $(
            $module:ident => {
                game: $game:ident,
                config: $field:ident,
                id: $id:expr,
                name: $name:expr,
                description: $desc:expr
            }
        ),* $(,)?
    ) => {
        /// Get all available games with their metadata and initializers
        pub fn get_all_games() -> Vec<GameRegistry> {
            vec![
                $(
                    GameRegistry {
                        info: GameInfo {
                            id: $id,
                            name: $name,
                            description: $desc,
                        },
                        initializer: |config, seed, terminal| {
                            Box::pin(async move {
                                use $crate::core::engine::Engine;
                                use $crate::games::$module::$game;

                                ::tracing::info!(game = $id, seed, speed = config.speed, "starting game");
                                let game = $game::new(&config.$field, seed);
                                Engine::new(game, config.speed).run(terminal).await
                            })
                        },
                    }
                ),*
            ]
        }

        /// Get a game by ID
        pub fn get_game(id: &str) -> Option<GameRegistry> {
            get_all_games().into_iter().find(|g| g.info.id == id)
        }
    };
}
