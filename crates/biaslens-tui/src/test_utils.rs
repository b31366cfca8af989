//! Test utilities for biaslens-tui rendering tests.
//!
//! Helpers for rendering the app into a ratatui `TestBackend` and
//! converting the buffer to a string for content assertions.

use crate::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 100;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 30;

/// Render the full app screen and return it as a string.
pub fn render_app_to_string(app: &App) -> String {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    let mut terminal = Terminal::new(backend).expect("Failed to create test terminal");
    terminal
        .draw(|frame| crate::draw(frame, app))
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

/// Convert a buffer to a newline-joined string of its rows.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
