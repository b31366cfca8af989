//! Evaluation display region.

use crate::app::EvaluationRegion;
use crate::theme::{Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Panel showing the bias verdict for the current response.
pub struct EvaluationPanel<'a> {
    region: &'a EvaluationRegion,
    tick: usize,
}

impl<'a> EvaluationPanel<'a> {
    /// Create a new evaluation panel.
    pub fn new(region: &'a EvaluationRegion, tick: usize) -> Self {
        Self { region, tick }
    }
}

impl Widget for EvaluationPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(" Bias Evaluation ");

        let paragraph = match self.region {
            EvaluationRegion::Empty => {
                Paragraph::new("Evaluate the response to see the verdict").style(Styles::dim())
            }
            EvaluationRegion::Loading => {
                let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
                Paragraph::new(format!("{frame} Evaluating bias...")).style(Styles::active())
            }
            EvaluationRegion::Result(evaluation) => {
                let verdict = Line::from(vec![
                    Span::styled(
                        Symbols::verdict_icon(evaluation.label),
                        Styles::badge(evaluation.label),
                    ),
                    Span::raw(" "),
                    Span::styled(evaluation.label.to_string(), Styles::badge(evaluation.label)),
                ]);
                let saved = Line::from(Span::styled(
                    format!("Saved to: {}", evaluation.saved_to),
                    Styles::dim(),
                ));
                Paragraph::new(vec![verdict, saved]).wrap(Wrap { trim: false })
            }
            EvaluationRegion::Error(msg) => Paragraph::new(msg.as_str())
                .style(Styles::error())
                .wrap(Wrap { trim: false }),
        };

        paragraph.block(block).render(area, buf);
    }
}
