use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::Level;

use crate::config::ArcadeConfig;
use crate::core::menu::{MenuManager, MenuResult};
use crate::games::{game_ids, get_all_games, get_game, GameRegistry};
use crate::logging;

#[derive(Parser, Debug)]
#[command(name = "termgrid")]
#[command(about = "🕹️ Grid arcade games for the terminal")]
#[command(version)]
pub struct Cli {
    /// Game to play (if not specified, will show selection)
    pub game: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Constant speed multiplier applied to every tick rate
    #[arg(long)]
    pub speed: Option<f64>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is owned by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: Level,

    /// List available games and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Config file first, then command line overrides
    pub fn resolve_config(&self) -> Result<ArcadeConfig> {
        let mut config = match &self.config {
            Some(path) => ArcadeConfig::load(path)?,
            None => ArcadeConfig::default(),
        };
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    logging::init(cli.log_file.as_deref(), cli.log_level)?;

    if cli.list {
        println!("🎮 Available games:");
        println!();
        for entry in get_all_games() {
            println!("📦 {} ({})", entry.info.name, entry.info.id);
            println!("   {}", entry.info.description);
            println!();
        }
        return Ok(());
    }

    let chosen = match cli.game.as_deref() {
        Some(id) => Some(get_game(id).ok_or_else(|| {
            anyhow!("Game '{}' not found. Available games: {}", id, game_ids().join(", "))
        })?),
        None => None,
    };

    let mut terminal = ratatui::init();
    let entry = match chosen {
        Some(entry) => Ok(Some(entry)),
        None => pick_from_menu(&mut terminal),
    };

    let result = match entry {
        Ok(Some(entry)) => {
            let seed = config.seed.unwrap_or_else(rand::random);
            (entry.initializer)(config, seed, terminal).await
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };

    ratatui::restore();
    result
}

fn pick_from_menu(terminal: &mut DefaultTerminal) -> Result<Option<GameRegistry>> {
    let games: Vec<_> = get_all_games().into_iter().map(|g| g.info).collect();
    match MenuManager::new().run(terminal, &games)? {
        MenuResult::Play(id) => Ok(get_game(id)),
        MenuResult::Quit => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["termgrid", "tetris", "--speed", "1.5", "--seed", "9"]);
        assert_eq!(cli.game.as_deref(), Some("tetris"));
        assert_eq!(cli.log_level, Level::INFO);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.speed, 1.5);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_invalid_speed_is_rejected() {
        let cli = Cli::parse_from(["termgrid", "--speed", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}
