//! biaslens-tui: Terminal UI for the biaslens client
//!
//! This crate provides the interactive front end for biaslens:
//! - A prompt field with character limit and recall
//! - Response and evaluation display regions with loading indicators
//! - A most-recent-first history pane
//! - The event loop driving requests against the bias-detection API

mod app;
mod event;
mod input;
#[cfg(test)]
mod test_utils;
mod theme;
mod widgets;

pub use app::{
    App, EvaluateJob, EvaluationRegion, GenerateJob, PendingRequest, ResponseRegion,
};
pub use event::{Action, Event, EventHandler};
pub use input::PromptInputState;

pub use biaslens_engine;

use biaslens_engine::{ApiClient, ApiError, Config, Evaluation};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::{self, stdout};
use tokio::task::JoinHandle;
use widgets::{EvaluationPanel, HistoryPane, PromptBar, ResponsePanel, StatusBar};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Outcome of a spawned request task.
enum RequestOutcome {
    Generate(Result<String, ApiError>),
    Evaluate(EvaluateJob, Result<Evaluation, ApiError>),
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&config)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &client, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one request task is in flight; its completion is observed
    // here and applied back to the app state.
    let mut request: Option<JoinHandle<RequestOutcome>> = None;

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Check for a completed request (non-blocking)
        if request.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = request.take() {
                match handle.await {
                    Ok(RequestOutcome::Generate(result)) => app.finish_generate(result),
                    Ok(RequestOutcome::Evaluate(job, result)) => app.finish_evaluate(job, result),
                    Err(_) => app.abort_pending(),
                }
            }
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if !handle_input_key(app, key) {
                        let action = event::key_to_action(key);
                        if app.show_help {
                            // Any action closes the overlay instead of firing
                            app.handle_action(action);
                        } else {
                            match action {
                                Action::Generate => start_generate(app, client, &mut request),
                                Action::Evaluate => start_evaluate(app, client, &mut request),
                                action => app.handle_action(action),
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                        MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                        _ => {}
                    }
                }
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = request {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Spawn a generation request if the trigger is accepted.
fn start_generate(app: &mut App, client: &ApiClient, slot: &mut Option<JoinHandle<RequestOutcome>>) {
    let Some(job) = app.begin_generate() else {
        return;
    };
    app.input.remember();

    let client = client.clone();
    *slot = Some(tokio::spawn(async move {
        RequestOutcome::Generate(client.generate(&job.prompt).await)
    }));
}

/// Spawn an evaluation request if the trigger is accepted.
fn start_evaluate(app: &mut App, client: &ApiClient, slot: &mut Option<JoinHandle<RequestOutcome>>) {
    let Some(job) = app.begin_evaluate() else {
        return;
    };

    let client = client.clone();
    *slot = Some(tokio::spawn(async move {
        let result = client.evaluate(&job.prompt, &job.response).await;
        RequestOutcome::Evaluate(job, result)
    }));
}

/// Handle key input destined for the prompt field.
/// Returns true if the key was handled (should not be processed as action).
fn handle_input_key(app: &mut App, key: KeyEvent) -> bool {
    // Control-modified keys are actions (Ctrl+Enter, Ctrl+B, ...)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    // Any key closes the help overlay before reaching the input
    if app.show_help {
        return false;
    }

    match key.code {
        KeyCode::Char(c) => {
            app.input.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input.backspace();
            true
        }
        KeyCode::Delete => {
            app.input.delete();
            true
        }
        KeyCode::Left => {
            app.input.move_left();
            true
        }
        KeyCode::Right => {
            app.input.move_right();
            true
        }
        KeyCode::Home => {
            app.input.move_home();
            true
        }
        KeyCode::End => {
            app.input.move_end();
            true
        }
        KeyCode::Up => {
            app.input.recall_prev();
            true
        }
        KeyCode::Down => {
            app.input.recall_next();
            true
        }
        _ => false,
    }
}

/// Render the whole screen.
pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(main);
    let [prompt, response, evaluation] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(6),
        Constraint::Length(6),
    ])
    .areas(left);

    frame.render_widget(PromptBar::new(&app.input).busy(app.is_busy()), prompt);
    frame.render_widget(ResponsePanel::new(&app.response, app.tick), response);
    frame.render_widget(EvaluationPanel::new(&app.evaluation, app.tick), evaluation);
    frame.render_widget(HistoryPane::new(&app.history, app.history_scroll), right);
    frame.render_widget(
        StatusBar::new(app.pending, app.notification.as_deref(), app.tick),
        status,
    );

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

const HELP_TEXT: &str = "\
 Enter / Ctrl+Enter   generate a response
 Ctrl+B               evaluate bias of the response
 Ctrl+N               clear the session
 Ctrl+S               export history to JSONL
 Up / Down            recall previous prompts
 PgUp / PgDn          scroll history
 Ctrl+H               toggle this help
 Esc / Ctrl+C         quit";

/// Render the help overlay centered over the screen.
fn render_help_overlay(frame: &mut Frame<'_>, area: Rect) {
    let width = 52.min(area.width);
    let height = 12.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .style(theme::Styles::default())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::Styles::border_active())
                    .title(" Help "),
            ),
        popup,
    );
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
