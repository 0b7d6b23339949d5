/// Tetris-specific renderer
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::renderer::{centered, BoardView, GameRenderer};
use crate::games::tetris::game::{TetrisGame, TetrisStatus};

pub struct TetrisRenderer;

impl GameRenderer<TetrisGame> for TetrisRenderer {
    fn render(&self, frame: &mut Frame, state: &TetrisGame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(frame.area());

        let mut header = vec![
            Span::styled("Rows: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.rows_cleared().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Pieces: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.pieces_landed().to_string()),
        ];
        if state.status() == TetrisStatus::GameOver {
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
            TetrisStatus::Falling => Color::White,
            TetrisStatus::GameOver => Color::Red,
        };
        let view = BoardView::new(state.board(), "Tetris").border(border);
        let (w, h) = view.size();
        frame.render_widget(view, centered(chunks[1], w, h));

        let controls = Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("↑", Style::default().fg(Color::Cyan)),
            Span::raw(" rotate | "),
            Span::styled("↓", Style::default().fg(Color::Cyan)),
            Span::raw(" fall | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" drop | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
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
    use crate::config::TetrisConfig;
    use crate::core::board::CellColor;
    use crate::core::game::Context;
    use crate::core::grid::Vec2;
    use crate::games::tetris::piece::{Shape, Tetromino};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_game_over_banner() {
        let (ctx, _rx) = Context::new();
        let piece = Tetromino::new(Shape::T, Vec2::new(5, -1), CellColor::Red);
        let mut game = TetrisGame::with_piece(&TetrisConfig::default(), piece, 1);
        game.board_mut().occupy([Vec2::new(5, 1)], CellColor::Blue);
        game.fall(&ctx);

        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        terminal.draw(|f| TetrisRenderer.render(f, &game)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Rows: 0"));
    }
}
