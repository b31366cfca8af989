//! Prompt input widget.
//!
//! Renders the editable prompt field with a cursor marker and a
//! character counter in the title. Long content is chunked across the
//! inner lines, scrolled so the cursor stays visible.

use crate::input::PromptInputState;
use crate::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PREFIX: &str = "> ";

/// Editable prompt field.
pub struct PromptBar<'a> {
    state: &'a PromptInputState,
    busy: bool,
}

impl<'a> PromptBar<'a> {
    /// Create a new prompt bar widget.
    pub fn new(state: &'a PromptInputState) -> Self {
        Self { state, busy: false }
    }

    /// Set whether a request is in flight (dims the border).
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for PromptBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.busy {
            Styles::border()
        } else {
            Styles::border_active()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(
                " Prompt ({}/{}) ",
                self.state.char_count(),
                self.state.max_chars()
            ));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 1 || inner.width < 3 {
            return;
        }

        if self.state.is_empty() {
            let line = Line::from(vec![
                Span::styled(PREFIX, Styles::active()),
                Span::styled("_", Styles::active()),
                Span::styled("Enter your prompt here...", Styles::dim()),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        // Insert the cursor marker, then chunk into rows of inner width
        let mut display: Vec<char> = PREFIX.chars().collect();
        let cursor_pos = PREFIX.chars().count() + self.state.cursor();
        display.extend(self.state.content().chars());
        if cursor_pos < display.len() {
            display[cursor_pos] = '█';
        } else {
            display.push('█');
        }

        let width = inner.width as usize;
        let lines: Vec<Line<'_>> = display
            .chunks(width)
            .map(|row| Line::from(row.iter().collect::<String>()))
            .collect();

        let cursor_row = cursor_pos / width;
        let scroll = cursor_row.saturating_sub(inner.height.saturating_sub(1) as usize);

        Paragraph::new(lines)
            .style(Styles::default())
            .scroll((scroll as u16, 0))
            .render(inner, buf);
    }
}
