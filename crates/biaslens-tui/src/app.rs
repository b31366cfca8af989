//! Application state and update logic for the biaslens TUI.
//!
//! `App` is the interaction controller: it owns the session state
//! (current response, history, request-in-flight token) and the two
//! display regions. Network requests run on spawned tasks; the event
//! loop calls `begin_*` to obtain a request job and `finish_*` with its
//! result. The in-flight token is released on every completion path.

use crate::event::Action;
use crate::input::PromptInputState;
use biaslens_engine::{ApiError, Config, Evaluation, History, InteractionRecord, CONFIG_DIR};
use std::path::{Path, PathBuf};

/// Contents of the response display region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseRegion {
    /// Nothing generated yet.
    #[default]
    Empty,
    /// A generation request is in flight.
    Loading,
    /// A generated response.
    Content(String),
    /// A validation or request error.
    Error(String),
}

/// Contents of the evaluation display region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EvaluationRegion {
    /// Nothing evaluated yet.
    #[default]
    Empty,
    /// An evaluation request is in flight.
    Loading,
    /// A completed evaluation.
    Result(Evaluation),
    /// A validation or request error.
    Error(String),
}

/// Which request is outstanding. At most one exists at a time; triggers
/// while one is pending are dropped, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Generate,
    Evaluate,
}

/// Inputs for a generation request.
#[derive(Debug, Clone)]
pub struct GenerateJob {
    pub prompt: String,
}

/// Inputs for an evaluation request. On success the record is built from
/// this exact pair, not from whatever the input field holds by then.
#[derive(Debug, Clone)]
pub struct EvaluateJob {
    pub prompt: String,
    pub response: String,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Client configuration.
    pub config: Config,

    /// Prompt input field.
    pub input: PromptInputState,

    /// Response display region.
    pub response: ResponseRegion,

    /// Evaluation display region.
    pub evaluation: EvaluationRegion,

    /// Last successfully generated response.
    pub current_response: Option<String>,

    /// Completed interactions, most recent first.
    pub history: History,

    /// Request-in-flight token.
    pub pending: Option<PendingRequest>,

    /// Scroll offset for the history pane, in lines.
    pub history_scroll: usize,

    /// Directory history exports are written to.
    pub export_dir: PathBuf,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config) -> Self {
        let history = History::new(config.history_limit);
        let input = PromptInputState::new(config.prompt_max_chars);
        Self {
            should_quit: false,
            show_help: false,
            config,
            input,
            response: ResponseRegion::Empty,
            evaluation: EvaluationRegion::Empty,
            current_response: None,
            history,
            pending: None,
            history_scroll: 0,
            export_dir: Path::new(CONFIG_DIR).join("exports"),
            notification: None,
            notification_ttl: 0,
            tick: 0,
        }
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a generation request.
    ///
    /// Returns the job to run, or `None` when the trigger was dropped
    /// (request already pending) or failed validation (empty prompt).
    pub fn begin_generate(&mut self) -> Option<GenerateJob> {
        if self.is_busy() {
            return None;
        }

        let prompt = self.input.content().trim().to_string();
        if prompt.is_empty() {
            self.response = ResponseRegion::Error("Please enter a prompt".into());
            return None;
        }

        self.pending = Some(PendingRequest::Generate);
        self.response = ResponseRegion::Loading;
        Some(GenerateJob { prompt })
    }

    /// Apply the outcome of a generation request.
    pub fn finish_generate(&mut self, result: Result<String, ApiError>) {
        self.pending = None;
        match result {
            Ok(text) => {
                self.current_response = Some(text.clone());
                self.response = ResponseRegion::Content(text);
            }
            Err(e) => {
                self.response = ResponseRegion::Error(format!("Error generating response: {e}"));
            }
        }
    }

    /// Start an evaluation request for the current response.
    ///
    /// Returns `None` when the trigger was dropped (request pending) or
    /// no response has been generated since the last reset.
    pub fn begin_evaluate(&mut self) -> Option<EvaluateJob> {
        if self.is_busy() {
            return None;
        }

        let Some(response) = self.current_response.clone() else {
            self.evaluation =
                EvaluationRegion::Error("Please generate a response first".into());
            return None;
        };

        let prompt = self.input.content().trim().to_string();
        self.pending = Some(PendingRequest::Evaluate);
        self.evaluation = EvaluationRegion::Loading;
        Some(EvaluateJob { prompt, response })
    }

    /// Apply the outcome of an evaluation request. On success the
    /// evaluated pair is appended to history.
    pub fn finish_evaluate(&mut self, job: EvaluateJob, result: Result<Evaluation, ApiError>) {
        self.pending = None;
        match result {
            Ok(evaluation) => {
                self.history.record(InteractionRecord::new(
                    job.prompt,
                    job.response,
                    evaluation.label,
                ));
                self.history_scroll = 0;
                self.evaluation = EvaluationRegion::Result(evaluation);
            }
            Err(e) => {
                self.evaluation =
                    EvaluationRegion::Error(format!("Error evaluating bias: {e}"));
            }
        }
    }

    /// Release the in-flight token after a request task died without a
    /// result (panic or abort).
    pub fn abort_pending(&mut self) {
        match self.pending.take() {
            Some(PendingRequest::Generate) => {
                self.response =
                    ResponseRegion::Error("Error generating response: request aborted".into());
            }
            Some(PendingRequest::Evaluate) => {
                self.evaluation =
                    EvaluationRegion::Error("Error evaluating bias: request aborted".into());
            }
            None => {}
        }
    }

    /// Restore the initial session state.
    pub fn reset(&mut self) {
        self.current_response = None;
        self.response = ResponseRegion::Empty;
        self.evaluation = EvaluationRegion::Empty;
        self.history.clear();
        self.history_scroll = 0;
        self.input.clear();
        self.set_notification("Session cleared".to_string());
    }

    /// Export history to a timestamped JSONL file under `export_dir`.
    pub fn export_history(&mut self) {
        if self.history.is_empty() {
            self.set_notification("History is empty, nothing to export".to_string());
            return;
        }

        let filename = format!(
            "history_{}.jsonl",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.export_dir.join(filename);
        match self.history.save(&path) {
            Ok(()) => self.set_notification(format!("Exported history to {}", path.display())),
            Err(e) => self.set_notification(format!("Export failed: {e}")),
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Any action while the help overlay is open just closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = true,
            Action::Reset => self.reset(),
            Action::Export => self.export_history(),
            Action::ScrollUp => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                if self.history_scroll < self.max_history_scroll() {
                    self.history_scroll += 1;
                }
            }
            // Generate/Evaluate spawn requests and are handled by the
            // event loop, which owns the API client
            Action::Generate | Action::Evaluate | Action::None => {}
        }
    }

    /// Upper bound for the history scroll offset. Each record renders as
    /// at least four lines; overshoot past the real end just shows blank
    /// space until the next record lands.
    fn max_history_scroll(&self) -> usize {
        self.history.len().saturating_mul(4).saturating_sub(1)
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        // Display for ~3 seconds at 4 Hz tick rate (250ms) = 12 ticks
        self.notification_ttl = 12;
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_engine::BiasLabel;

    fn app() -> App {
        App::new(Config::default())
    }

    fn generated(app: &mut App, prompt: &str, response: &str) {
        app.input.clear();
        app.input.insert_str(prompt);
        let job = app.begin_generate().expect("generate should start");
        assert_eq!(job.prompt, prompt);
        app.finish_generate(Ok(response.to_string()));
    }

    fn evaluation(label: BiasLabel, saved_to: &str) -> Evaluation {
        Evaluation {
            label,
            saved_to: saved_to.to_string(),
        }
    }

    #[test]
    fn test_empty_prompt_is_validation_error() {
        let mut app = app();
        assert!(app.begin_generate().is_none());
        assert!(matches!(app.response, ResponseRegion::Error(_)));
        assert!(!app.is_busy());

        app.input.insert_str("   ");
        assert!(app.begin_generate().is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_generate_success_sets_current_response() {
        let mut app = app();
        app.input.insert_str("  Is the Earth flat?  ");

        let job = app.begin_generate().unwrap();
        assert_eq!(job.prompt, "Is the Earth flat?");
        assert!(app.is_busy());
        assert_eq!(app.response, ResponseRegion::Loading);

        app.finish_generate(Ok("It is not.".to_string()));
        assert!(!app.is_busy());
        assert_eq!(app.current_response.as_deref(), Some("It is not."));
        assert_eq!(app.response, ResponseRegion::Content("It is not.".into()));
    }

    #[test]
    fn test_generate_failure_shows_error_and_releases_token() {
        let mut app = app();
        app.input.insert_str("prompt");
        app.begin_generate().unwrap();

        app.finish_generate(Err(ApiError::Http { status: 500 }));
        assert!(!app.is_busy());
        match &app.response {
            ResponseRegion::Error(msg) => {
                assert!(msg.starts_with("Error generating response:"));
                assert!(msg.contains("500"));
            }
            other => panic!("expected error region, got {other:?}"),
        }
        assert!(app.current_response.is_none());
    }

    #[test]
    fn test_trigger_while_busy_is_dropped() {
        let mut app = app();
        app.input.insert_str("prompt");
        assert!(app.begin_generate().is_some());
        assert!(app.begin_generate().is_none());
        assert!(app.begin_evaluate().is_none());
        // Still the original pending request
        assert_eq!(app.pending, Some(PendingRequest::Generate));
    }

    #[test]
    fn test_evaluate_without_response_is_validation_error() {
        let mut app = app();
        app.input.insert_str("prompt");
        assert!(app.begin_evaluate().is_none());
        assert!(matches!(app.evaluation, EvaluationRegion::Error(_)));
        assert!(!app.is_busy());
    }

    #[test]
    fn test_evaluate_success_appends_record() {
        let mut app = app();
        generated(&mut app, "The Earth is flat.", "It is not.");

        let job = app.begin_evaluate().unwrap();
        assert_eq!(job.prompt, "The Earth is flat.");
        assert_eq!(job.response, "It is not.");
        assert_eq!(app.evaluation, EvaluationRegion::Loading);

        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Biased, "loc1")));
        assert!(!app.is_busy());
        assert_eq!(
            app.evaluation,
            EvaluationRegion::Result(evaluation(BiasLabel::Biased, "loc1"))
        );

        assert_eq!(app.history.len(), 1);
        let record = app.history.iter().next().unwrap();
        assert_eq!(record.prompt, "The Earth is flat.");
        assert_eq!(record.response, "It is not.");
        assert_eq!(record.evaluation, BiasLabel::Biased);
    }

    #[test]
    fn test_two_cycles_order_most_recent_first() {
        let mut app = app();

        generated(&mut app, "A", "resp A");
        let job = app.begin_evaluate().unwrap();
        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Unbiased, "loc1")));

        generated(&mut app, "B", "resp B");
        let job = app.begin_evaluate().unwrap();
        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Biased, "loc2")));

        let prompts: Vec<&str> = app.history.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["B", "A"]);
    }

    #[test]
    fn test_evaluate_failure_keeps_history_unchanged() {
        let mut app = app();
        generated(&mut app, "prompt", "resp");

        let job = app.begin_evaluate().unwrap();
        app.finish_evaluate(job, Err(ApiError::Http { status: 500 }));

        assert!(!app.is_busy());
        assert!(app.history.is_empty());
        match &app.evaluation {
            EvaluationRegion::Error(msg) => {
                assert!(msg.starts_with("Error evaluating bias:"));
                assert!(msg.contains("500"));
            }
            other => panic!("expected error region, got {other:?}"),
        }
    }

    #[test]
    fn test_record_uses_evaluated_pair_not_live_input() {
        let mut app = app();
        generated(&mut app, "original prompt", "resp");

        let job = app.begin_evaluate().unwrap();
        // User edits the field while the request is in flight
        app.input.clear();
        app.input.insert_str("edited while pending");

        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Unbiased, "loc")));
        let record = app.history.iter().next().unwrap();
        assert_eq!(record.prompt, "original prompt");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut app = app();
        generated(&mut app, "A", "resp A");
        let job = app.begin_evaluate().unwrap();
        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Biased, "loc")));

        app.reset();
        assert!(app.current_response.is_none());
        assert_eq!(app.response, ResponseRegion::Empty);
        assert_eq!(app.evaluation, EvaluationRegion::Empty);
        assert!(app.history.is_empty());
        assert!(app.input.is_empty());

        // Evaluation now requires a fresh generation
        assert!(app.begin_evaluate().is_none());
    }

    #[test]
    fn test_abort_pending_releases_token() {
        let mut app = app();
        app.input.insert_str("prompt");
        app.begin_generate().unwrap();

        app.abort_pending();
        assert!(!app.is_busy());
        assert!(matches!(app.response, ResponseRegion::Error(_)));
    }

    #[test]
    fn test_export_history_writes_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.export_dir = dir.path().to_path_buf();

        generated(&mut app, "A", "resp A");
        let job = app.begin_evaluate().unwrap();
        app.finish_evaluate(job, Ok(evaluation(BiasLabel::Unbiased, "loc")));

        app.export_history();
        let exported: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(exported.len(), 1);
        assert!(app
            .notification
            .as_deref()
            .is_some_and(|n| n.contains("Exported history")));
    }

    #[test]
    fn test_export_empty_history_is_a_notification_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.export_dir = dir.path().to_path_buf();

        app.export_history();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(app.notification.is_some());
    }

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut app = app();
        app.reset();
        assert!(app.notification.is_some());
        for _ in 0..12 {
            app.tick();
        }
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_any_action_closes_help_first() {
        let mut app = app();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
