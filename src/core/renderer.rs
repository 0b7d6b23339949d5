/// Board drawing shared by all games
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use crate::core::board::{Board, CellColor, CellShape};

/// Per-game renderer, reads state and never mutates it
pub trait GameRenderer<State> {
    fn render(&self, frame: &mut Frame, state: &State);
}

impl From<CellColor> for Color {
    fn from(color: CellColor) -> Self {
        match color {
            CellColor::Red => Color::Red,
            CellColor::Green => Color::Green,
            CellColor::Blue => Color::Blue,
            CellColor::Yellow => Color::Yellow,
            CellColor::Cyan => Color::Cyan,
            CellColor::Magenta => Color::Magenta,
            CellColor::White => Color::White,
            CellColor::Default => Color::Reset,
        }
    }
}

/// Two terminal columns per cell so cells look square
pub struct BoardView<'a> {
    board: &'a Board,
    title: &'a str,
    border: Color,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, title: &'a str) -> Self {
        Self {
            board,
            title,
            border: Color::White,
        }
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }

    /// Outer size including the border
    pub fn size(&self) -> (u16, u16) {
        let grid = self.board.grid();
        (grid.width as u16 * 2 + 2, grid.height as u16 + 2)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.board
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|block| {
                        if !block.visible {
                            return Span::styled("· ", Style::default().fg(Color::DarkGray));
                        }
                        let glyph = match block.shape {
                            CellShape::Square => "██",
                            CellShape::Round => "()",
                        };
                        Span::styled(glyph, Style::default().fg(block.color.into()))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(self.border))
            .title(format!(" {} ", self.title));
        Paragraph::new(self.lines())
            .block(block)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

/// Center a `width` x `height` box inside `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
