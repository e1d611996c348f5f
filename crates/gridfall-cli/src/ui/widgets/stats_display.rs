use gridfall_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

const INNER_WIDTH: u16 = 14;

/// Score, best score, and level panel.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    score: u64,
    high_score: u64,
    level: u32,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(game: &Game) -> Self {
        Self {
            score: game.score(),
            high_score: game.high_score(),
            level: game.level(),
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
        INNER_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        3 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let lines = vec![
            Line::from(format!("{:<6}{:>8}", "Score", self.score)),
            Line::from(format!("{:<6}{:>8}", "Best", self.high_score)),
            Line::from(format!("{:<6}{:>8}", "Level", self.level)),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
