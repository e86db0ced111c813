use dropris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, KeyBinding, KeyBindingDisplay, SessionStatsDisplay, color, style,
};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Drop"),
    (&["q", "Esc"], "Quit"),
];

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_style = match self.session.state() {
            SessionState::Playing => color::BLUE,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.session.grid())
            .active_piece(self.session.active_piece())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(session_stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [board_area] = Layout::vertical([Constraint::Length(game_board.height())])
            .flex(Flex::Center)
            .areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(session_stats.height())])
            .flex(Flex::Center)
            .areas(stats_column);

        game_board.render(board_area, buf);
        session_stats.render(stats_area, buf);
        KeyBindingDisplay::new(KEY_BINDINGS)
            .block(Block::new().style(Style::new().bg(color::BLACK)))
            .render(help_area, buf);
    }
}
