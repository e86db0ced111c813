use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, session_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(255, 32, 32);
    pub const BLUE: Color = Color::Rgb(32, 32, 255);
    pub const LIGHT_GRAY: Color = Color::Rgb(200, 200, 200);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::BLACK, color::WHITE);
    pub const EMPTY: Style = bg_only(color::WHITE);
    pub const EMPTY_DOT: Style = fg_bg(color::LIGHT_GRAY, color::WHITE);
    pub const LOCKED: Style = bg_only(color::BLUE);
    pub const ACTIVE: Style = bg_only(color::RED);
}

/// Converts a grid dimension into terminal cells, saturating on overflow.
fn cells(n: usize, per_cell: u16) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX).saturating_mul(per_cell)
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
