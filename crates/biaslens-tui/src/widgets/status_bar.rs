//! Bottom status bar.
//!
//! Shows a transient notification when one is set, the in-flight
//! operation while a request is outstanding, and key hints otherwise.

use crate::app::PendingRequest;
use crate::theme::{Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

const HINTS: &str =
    " Enter generate  |  ^B evaluate  |  ^N clear  |  ^S export  |  ^H help  |  Esc quit";

/// One-line status bar.
pub struct StatusBar<'a> {
    pending: Option<PendingRequest>,
    notification: Option<&'a str>,
    tick: usize,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(pending: Option<PendingRequest>, notification: Option<&'a str>, tick: usize) -> Self {
        Self {
            pending,
            notification,
            tick,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = if let Some(notification) = self.notification {
            format!(" {notification}")
        } else if let Some(pending) = self.pending {
            let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
            match pending {
                PendingRequest::Generate => format!(" {frame} Generating response..."),
                PendingRequest::Evaluate => format!(" {frame} Evaluating bias..."),
            }
        } else {
            HINTS.to_string()
        };

        Paragraph::new(text)
            .style(Styles::status_bar())
            .render(area, buf);
    }
}
