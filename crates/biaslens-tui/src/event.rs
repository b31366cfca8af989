//! Event handling for the biaslens TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Spawn blocking thread for event polling (crossterm uses blocking I/O)
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else {
                    // No event, send tick
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Generate,
    Evaluate,
    Reset,
    Export,
    ScrollUp,
    ScrollDown,
    None,
}

/// Convert a key event to an action.
///
/// Plain characters never reach this function; they are consumed by the
/// prompt input first.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('h') => Action::Help,
            KeyCode::Char('b') => Action::Evaluate,
            KeyCode::Char('n') => Action::Reset,
            KeyCode::Char('s') => Action::Export,
            // Ctrl+Enter triggers generation, same as a bare Enter
            KeyCode::Enter => Action::Generate,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Generate,
        KeyCode::Esc => Action::Quit,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_generates() {
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Generate
        );
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::CONTROL)),
            Action::Generate
        );
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('b'), KeyModifiers::CONTROL)),
            Action::Evaluate
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Action::Export
        );
    }

    #[test]
    fn test_plain_chars_are_not_actions() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('b'), KeyModifiers::NONE)),
            Action::None
        );
    }
}
