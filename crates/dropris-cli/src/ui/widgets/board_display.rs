use std::iter;

use dropris_engine::{CellPosition, Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{BlockDisplay, CellKind};

/// Draws the locked cells of a grid with the active piece on top.
///
/// Active cells above the visible field are not drawn.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    active_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: &'a Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells(self.grid.columns(), BlockDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::cells(self.grid.rows(), BlockDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    fn cell_kind(&self, x: usize, y: usize, locked: bool) -> CellKind {
        let pos = i32::try_from(x)
            .ok()
            .zip(i32::try_from(y).ok())
            .map(|(x, y)| CellPosition::new(x, y));
        let is_active = self
            .active_piece
            .zip(pos)
            .is_some_and(|(piece, pos)| piece.contains(pos));
        if is_active {
            CellKind::Active
        } else if locked {
            CellKind::Locked
        } else {
            CellKind::Empty
        }
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

        let col_constraints =
            (0..self.grid.columns()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let row_areas = vertical.split(area);
        for (y, (row_area, row)) in iter::zip(row_areas.iter(), self.grid.iter_rows()).enumerate() {
            let cell_areas = horizontal.split(*row_area);
            for (x, (cell_area, &locked)) in iter::zip(cell_areas.iter(), row).enumerate() {
                BlockDisplay::from_cell(self.cell_kind(x, y, locked), true).render(*cell_area, buf);
            }
        }
    }
}
