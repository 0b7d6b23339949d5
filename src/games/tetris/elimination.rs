use crate::core::board::Board;

/// Collapse every full row, scanning top to bottom.
///
/// Each full row `y` is overwritten by the row above it, and so on up to row
/// 0, which is cleared. Rows found later in the scan see the board as already
/// collapsed by earlier ones. Returns the number of rows removed.
pub fn collapse_full_rows(board: &mut Board) -> usize {
    let height = board.grid().height;
    let mut collapsed = 0;
    for y in 0..height {
        if board.is_row_full(y) {
            collapse_row(board, y);
            collapsed += 1;
        }
    }
    collapsed
}

fn collapse_row(board: &mut Board, y: usize) {
    for r in (1..=y).rev() {
        board.copy_row(r - 1, r);
    }
    board.clear_row(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::{Block, CellColor};
    use crate::core::grid::{Grid, Vec2};

    fn fill_row(board: &mut Board, y: i32) {
        let w = board.grid().width as i32;
        board.occupy((0..w).map(|x| Vec2::new(x, y)), CellColor::Blue);
    }

    #[test]
    fn test_no_full_rows_is_a_no_op() {
        let mut board = Board::new(Grid::new(10, 20));
        board.occupy([Vec2::new(0, 19)], CellColor::Red);
        let before = board.clone();
        assert_eq!(collapse_full_rows(&mut board), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_row_collapse() {
        let mut board = Board::new(Grid::new(10, 20));
        fill_row(&mut board, 5);
        board.occupy([Vec2::new(3, 4)], CellColor::Red);
        board.occupy([Vec2::new(7, 3)], CellColor::Green);
        let before = board.clone();

        assert_eq!(collapse_full_rows(&mut board), 1);

        assert_eq!(board.row(5), before.row(4));
        assert_eq!(board.row(4), before.row(3));
        assert!(board.get(Vec2::new(3, 5)).is_some_and(|b| b.occupied));
        assert!(board.get(Vec2::new(7, 4)).is_some_and(|b| b.occupied));
        assert!(board.row(0).iter().all(|b| *b == Block::EMPTY));
        assert_eq!(board.row(6), before.row(6));
    }

    #[test]
    fn test_bottom_row_on_floor() {
        let mut board = Board::new(Grid::new(4, 4));
        fill_row(&mut board, 3);
        board.occupy([Vec2::new(1, 2)], CellColor::Red);

        assert_eq!(collapse_full_rows(&mut board), 1);
        assert!(board.is_occupied(Vec2::new(1, 3)));
        assert_eq!(board.rows().flatten().filter(|b| b.occupied).count(), 1);
    }

    #[test]
    fn test_spaced_rows_cascade() {
        let mut board = Board::new(Grid::new(4, 6));
        fill_row(&mut board, 2);
        fill_row(&mut board, 4);
        board.occupy([Vec2::new(0, 1)], CellColor::Red);
        board.occupy([Vec2::new(2, 3)], CellColor::Green);
        board.occupy([Vec2::new(3, 5)], CellColor::Yellow);

        assert_eq!(collapse_full_rows(&mut board), 2);

        // (0,1) fell through both gaps, (2,3) through the lower one.
        assert!(board.is_occupied(Vec2::new(0, 3)));
        assert!(board.is_occupied(Vec2::new(2, 4)));
        assert!(board.is_occupied(Vec2::new(3, 5)));
        assert_eq!(board.rows().flatten().filter(|b| b.occupied).count(), 3);
        assert!(board.row(0).iter().all(|b| !b.occupied));
        assert!(board.row(1).iter().all(|b| !b.occupied));
    }
}
