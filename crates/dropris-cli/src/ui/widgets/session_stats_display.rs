use std::iter;

use dropris_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(ROWS.len(), 1) + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = &'static dyn Fn(&GameSession) -> String;

const ROWS: &[(&str, Value)] = &[
    ("SHAPE:", &|session| session.active_kind().to_string()),
    ("LINES:", &|session| session.stats().cleared_rows().to_string()),
    ("PIECES:", &|session| session.stats().locked_pieces().to_string()),
    ("TICKS:", &|session| session.stats().ticks().to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for ((label, value), area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            let [label_area, value_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Fill(1),
            ]));
            Line::styled(label, style)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(self.session), style)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
