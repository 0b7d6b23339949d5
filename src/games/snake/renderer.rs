/// Snake-specific renderer
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::renderer::{centered, BoardView, GameRenderer};
use crate::games::snake::game::{SnakeGame, SnakeStatus};

pub struct SnakeRenderer;

impl GameRenderer<SnakeGame> for SnakeRenderer {
    fn render(&self, frame: &mut Frame, state: &SnakeGame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        let mut header = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score_text(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.snake().len().to_string()),
        ];
        if state.status() == SnakeStatus::GameOver {
            header.push(Span::raw("    "));
            header.push(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(header)).alignment(Alignment::Center),
            chunks[0],
        );

        let border = match state.status() {
            SnakeStatus::Running => Color::White,
            SnakeStatus::GameOver => Color::Red,
        };
        let view = BoardView::new(state.board(), "Snake").border(border);
        let (w, h) = view.size();
        frame.render_widget(view, centered(chunks[1], w, h));

        let controls = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        frame.render_widget(
            Paragraph::new(controls).alignment(Alignment::Center),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnakeConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_score_and_board() {
        let game = SnakeGame::new(&SnakeConfig::default(), 5);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| SnakeRenderer.render(f, &game)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Snake"));
        assert!(text.contains("██"));
        assert!(!text.contains("GAME OVER"));
    }
}
