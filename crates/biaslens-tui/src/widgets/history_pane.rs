//! History pane.
//!
//! Renders the full interaction history most-recent-first on every
//! frame: badge and localized timestamp, then the wrapped prompt and
//! response. Scrolling is by line offset.

use crate::theme::Styles;
use biaslens_engine::History;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Scrollable list of completed interactions.
pub struct HistoryPane<'a> {
    history: &'a History,
    scroll: usize,
}

impl<'a> HistoryPane<'a> {
    /// Create a new history pane.
    pub fn new(history: &'a History, scroll: usize) -> Self {
        Self { history, scroll }
    }
}

/// Render `label: text` with the text wrapped and continuation lines
/// indented under the value column.
fn field_lines(label: &str, text: &str, width: usize) -> Vec<Line<'static>> {
    let wrap_width = width.saturating_sub(label.len()).max(10);
    let pieces = textwrap::wrap(text, wrap_width);

    if pieces.is_empty() {
        return vec![Line::from(Span::styled(label.to_string(), Styles::dim()))];
    }

    pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| {
            if i == 0 {
                Line::from(vec![
                    Span::styled(label.to_string(), Styles::dim()),
                    Span::raw(piece.to_string()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(" ".repeat(label.len())),
                    Span::raw(piece.to_string()),
                ])
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for HistoryPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .title(format!(" History ({}) ", self.history.len()));

        if self.history.is_empty() {
            Paragraph::new("No interactions yet")
                .style(Styles::dim())
                .block(block)
                .render(area, buf);
            return;
        }

        let width = block.inner(area).width as usize;
        let mut lines: Vec<Line<'static>> = Vec::new();

        for record in self.history.iter() {
            let timestamp = record
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", record.evaluation),
                    Styles::badge(record.evaluation),
                ),
                Span::raw("  "),
                Span::styled(timestamp, Styles::dim()),
            ]));
            lines.extend(field_lines("Prompt: ", &record.prompt, width));
            lines.extend(field_lines("Response: ", &record.response, width));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .style(Styles::default())
            .block(block)
            .scroll((self.scroll as u16, 0))
            .render(area, buf);
    }
}
