use std::iter;

use gridfall_engine::{ActivePiece, Board};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Renders the playfield grid with the falling piece overlaid.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active: None,
            block: None,
        }
    }

    pub fn active(self, piece: &'a ActivePiece) -> Self {
        Self {
            active: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        self.board.width() as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.board.height() as u16 * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Cells of the falling piece that are inside the visible grid.
        let active_cells: Vec<(usize, usize)> = self
            .active
            .into_iter()
            .flat_map(ActivePiece::cells)
            .filter_map(|cell| {
                Some((usize::try_from(cell.x).ok()?, usize::try_from(cell.y).ok()?))
            })
            .collect();

        let col_constraints =
            (0..self.board.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.board.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let row_areas = Layout::vertical(row_constraints).split(area);

        for (y, (row_area, row)) in iter::zip(row_areas.iter(), self.board.rows()).enumerate() {
            let cell_areas = horizontal.split(*row_area);
            for (x, (cell_area, cell)) in iter::zip(cell_areas.iter(), row).enumerate() {
                let display = if active_cells.contains(&(x, y)) {
                    CellDisplay::active()
                } else if cell.is_locked() {
                    CellDisplay::locked()
                } else {
                    CellDisplay::empty()
                };
                display.render(*cell_area, buf);
            }
        }
    }
}
