//! Response display region.

use crate::app::ResponseRegion;
use crate::theme::{Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Panel showing the generated model response, a loading indicator, or
/// an inline error.
pub struct ResponsePanel<'a> {
    region: &'a ResponseRegion,
    tick: usize,
}

impl<'a> ResponsePanel<'a> {
    /// Create a new response panel.
    pub fn new(region: &'a ResponseRegion, tick: usize) -> Self {
        Self { region, tick }
    }
}

impl Widget for ResponsePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(" Model Response ");

        let paragraph = match self.region {
            ResponseRegion::Empty => {
                Paragraph::new("Generate a response to see it here").style(Styles::dim())
            }
            ResponseRegion::Loading => {
                let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
                Paragraph::new(format!("{frame} Generating response...")).style(Styles::active())
            }
            ResponseRegion::Content(text) => Paragraph::new(text.as_str())
                .style(Styles::default())
                .wrap(Wrap { trim: false }),
            ResponseRegion::Error(msg) => Paragraph::new(msg.as_str())
                .style(Styles::error())
                .wrap(Wrap { trim: false }),
        };

        paragraph.block(block).render(area, buf);
    }
}
