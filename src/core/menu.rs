use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Alignment, Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    Frame,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;
use anyhow::{Context, Result};

use crate::games::GameInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuResult {
    Play(&'static str), // Game ID
    Quit,
}

pub struct MenuManager {
    pub selected_game_index: usize,
}

impl MenuManager {
    pub fn new() -> Self {
        Self { selected_game_index: 0 }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal, games: &[GameInfo]) -> Result<MenuResult> {
        loop {
            terminal.draw(|f| self.render(f, games)).context("failed to draw menu")?;

            if event::poll(Duration::from_millis(16)).context("failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(result) = self.handle_key(key.code, games) {
                        return Ok(result);
                    }
                }
            }
        }
    }

    /// `Some` once the user has picked a game or asked to leave
    pub fn handle_key(&mut self, code: KeyCode, games: &[GameInfo]) -> Option<MenuResult> {
        match code {
            KeyCode::Up => self.selected_game_index = self.selected_game_index.saturating_sub(1),
            KeyCode::Down => {
                self.selected_game_index = (self.selected_game_index + 1).min(games.len().saturating_sub(1))
            }
            KeyCode::Enter => return games.get(self.selected_game_index).map(|g| MenuResult::Play(g.id)),
            KeyCode::Char('q') | KeyCode::Esc => return Some(MenuResult::Quit),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, games: &[GameInfo]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        f.render_widget(
            Paragraph::new(" TERMGRID ARCADE ")
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            chunks[0]
        );

        let items: Vec<ListItem> = games.iter().enumerate().map(|(i, g)| {
            let style = if i == self.selected_game_index {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" » {} : {}", g.name, g.description)).style(style)
        }).collect();

        f.render_widget(
            List::new(items).block(Block::default().title(" AVAILABLE GAMES ").borders(Borders::ALL)),
            chunks[1]
        );

        f.render_widget(
            Paragraph::new("[↑/↓] Navigate  [Enter] Play  [Q] Quit")
                .alignment(Alignment::Center),
            chunks[2]
        );
    }
}

impl Default for MenuManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games() -> Vec<GameInfo> {
        crate::games::get_all_games().into_iter().map(|g| g.info).collect()
    }

    #[test]
    fn test_navigation_is_clamped() {
        let games = games();
        let mut menu = MenuManager::new();
        assert_eq!(menu.handle_key(KeyCode::Up, &games), None);
        assert_eq!(menu.selected_game_index, 0);

        for _ in 0..5 {
            menu.handle_key(KeyCode::Down, &games);
        }
        assert_eq!(menu.selected_game_index, games.len() - 1);
    }

    #[test]
    fn test_enter_picks_selected_game() {
        let games = games();
        let mut menu = MenuManager::new();
        menu.handle_key(KeyCode::Down, &games);
        assert_eq!(menu.handle_key(KeyCode::Enter, &games), Some(MenuResult::Play("tetris")));
        assert_eq!(menu.handle_key(KeyCode::Esc, &games), Some(MenuResult::Quit));
    }
}
