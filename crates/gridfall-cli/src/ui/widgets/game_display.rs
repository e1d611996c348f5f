use gridfall_engine::{Game, GamePhase};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    prelude::Buffer,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// The full game screen: board, stats panel, and the game-over banner.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    game: &'a Game,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.game.phase() {
            GamePhase::Playing => color::WHITE,
            GamePhase::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.game.board())
                .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
            if let Some(piece) = self.game.active() {
                widget.active(piece)
            } else {
                widget
            }
        };
        let stats = StatsDisplay::new(self.game).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        stats.render(stats_area, buf);

        if self.game.phase().is_game_over() {
            let banner_style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(banner_style);
            let text = Text::styled("GAME OVER", banner_style).centered();
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(3),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
