use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::{validate_thought, AnalysisResult, JournalEntry, ThoughtRecord};
use crate::api::WebhookClient;
use crate::config::Config;
use crate::error::ReframeError;
use crate::journal::JournalStore;
use crate::mock::MockAnalyzer;
use crate::status::{StatusKind, StatusReporter};
use crate::transport::ThoughtAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// An analysis request in flight. The sequence number ties the eventual
/// completion back to the dispatch that created it; completions from an
/// older dispatch are discarded.
pub struct PendingAnalysis {
    seq: u64,
    thought: String,
    task: tokio::task::JoinHandle<Result<crate::analysis::AnalysisPayload, ReframeError>>,
}

/// How many animation ticks the "Saved!" confirmation stays visible.
const SAVE_FLASH_TICKS: u8 = 7;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Thought input
    pub thought_input: String,
    pub input_cursor: usize, // cursor position in thought_input, in chars

    // Transport selection and believability rating
    pub use_mock: bool,
    pub belief_rating: u8, // 0..=100

    // Display state
    pub reporter: StatusReporter,
    pub current_result: Option<AnalysisResult>,
    pub debug_value: Option<serde_json::Value>,
    pub show_dev_panel: bool,
    pub save_flash_ticks: u8,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Submission state
    submit_seq: u64,
    pub pending: Option<PendingAnalysis>,
    current_record: Option<ThoughtRecord>,

    // Collaborators
    webhook: WebhookClient,
    mock: MockAnalyzer,
    journal: JournalStore,
}

impl App {
    pub fn new(config: &Config, journal: JournalStore) -> Self {
        let webhook = WebhookClient::new(&config.webhook_url());
        if webhook.is_placeholder_endpoint() {
            warn!(
                endpoint = webhook.endpoint(),
                "webhook endpoint is a placeholder; set webhook_url in the config file"
            );
        }

        let use_mock = config.use_mock.unwrap_or(true);
        let mut reporter = StatusReporter::new();
        reporter.set_status(
            if use_mock { "Mock API Enabled" } else { "Real API Active" },
            if use_mock { StatusKind::Success } else { StatusKind::Idle },
        );

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,

            thought_input: String::new(),
            input_cursor: 0,

            use_mock,
            belief_rating: 50,

            reporter,
            current_result: None,
            debug_value: None,
            show_dev_panel: false,
            save_flash_ticks: 0,

            animation_frame: 0,

            submit_seq: 0,
            pending: None,
            current_record: None,

            webhook,
            mock: MockAnalyzer::new(),
            journal,
        }
    }

    /// Submit the current input. Validation failures never dispatch a
    /// request; a submission already in flight makes this a no-op.
    pub fn submit(&mut self) {
        if self.reporter.is_loading() || self.pending.is_some() {
            return;
        }

        let thought = match validate_thought(&self.thought_input) {
            Ok(thought) => thought,
            Err(err) => {
                info!(error = %err, "submission rejected before dispatch");
                self.reporter.show_error(&err.to_string());
                // Focus stays on the input so the user can fix it.
                self.input_mode = InputMode::Editing;
                return;
            }
        };

        self.clear_result();
        self.reporter.set_loading(
            true,
            Some(if self.use_mock {
                "Processing with Mock AI..."
            } else {
                "Analyzing your thought..."
            }),
        );
        self.reporter.set_status(
            if self.use_mock { "Using Mock API" } else { "Using Real API" },
            StatusKind::Loading,
        );

        self.submit_seq += 1;
        let analyzer: Arc<dyn ThoughtAnalyzer> = if self.use_mock {
            Arc::new(self.mock.clone())
        } else {
            Arc::new(self.webhook.clone())
        };
        info!(seq = self.submit_seq, backend = analyzer.name(), "dispatching analysis");

        let task_thought = thought.clone();
        let task = tokio::spawn(async move { analyzer.analyze(&task_thought).await });
        self.pending = Some(PendingAnalysis {
            seq: self.submit_seq,
            thought,
            task,
        });
        self.input_mode = InputMode::Normal;
    }

    /// Consume the pending analysis if its task has finished.
    pub async fn poll_pending(&mut self) {
        if self.pending.as_ref().is_some_and(|p| p.task.is_finished()) {
            self.finish_pending().await;
        }
    }

    async fn finish_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let outcome = match pending.task.await {
            Ok(outcome) => outcome,
            Err(err) => Err(ReframeError::Transport(format!(
                "Analysis task failed: {}",
                err
            ))),
        };
        self.complete(pending.seq, &pending.thought, outcome);
    }

    fn complete(
        &mut self,
        seq: u64,
        thought: &str,
        outcome: Result<crate::analysis::AnalysisPayload, ReframeError>,
    ) {
        if seq != self.submit_seq {
            warn!(seq, latest = self.submit_seq, "discarding stale analysis completion");
            return;
        }

        // Loading always ends here, success or failure.
        self.reporter.set_loading(false, None);

        let validated = match outcome {
            Ok(payload) => {
                // Raw body goes to the developer panel before the shape
                // check so malformed responses can be inspected.
                self.debug_value = serde_json::to_value(&payload).ok();
                payload.validate()
            }
            Err(err) => Err(err),
        };

        match validated {
            Ok(result) => {
                info!(seq, distortions = result.distortions.len(), "analysis succeeded");
                self.current_result = Some(result.clone());
                self.current_record = Some(ThoughtRecord::new(thought, result));
                self.reporter
                    .set_status("Successfully processed thought.", StatusKind::Success);
            }
            Err(err) => {
                warn!(seq, kind = err.kind(), error = %err, "analysis failed");
                // The malformed-mock path already put the raw body here;
                // everything else shows the structured error instead.
                if self.debug_value.is_none() {
                    self.debug_value = Some(err.debug_value());
                }
                self.reporter
                    .show_error(&format!("Failed to get analysis: {}", err));
            }
        }
    }

    /// Reset all display state from a previous analysis.
    pub fn clear_result(&mut self) {
        self.current_result = None;
        self.debug_value = None;
        self.save_flash_ticks = 0;
        self.reporter.clear_error();
    }

    /// The most recent successful submission, as journal save sees it.
    pub fn current_record(&self) -> Option<&ThoughtRecord> {
        self.current_record.as_ref()
    }

    /// Save the cached record plus the current belief rating to the journal.
    pub fn save_to_journal(&mut self) {
        let Some(record) = self.current_record.as_ref() else {
            self.reporter
                .show_error("No analysis data to save. Please submit a thought first.");
            return;
        };

        let entry = JournalEntry::from_record(record, Some(self.belief_rating.to_string()));
        match self.journal.prepend(entry) {
            Ok(()) => {
                self.save_flash_ticks = SAVE_FLASH_TICKS;
                self.reporter
                    .set_status("Entry saved to journal.", StatusKind::Success);
            }
            Err(err) => {
                warn!(error = %err, "journal save failed");
                self.reporter.show_error(&err.to_string());
                self.reporter
                    .set_status("Error saving to journal.", StatusKind::Error);
            }
        }
    }

    pub fn toggle_mock(&mut self) {
        self.use_mock = !self.use_mock;
        self.reporter.set_status(
            if self.use_mock { "Mock API Enabled" } else { "Real API Active" },
            if self.use_mock { StatusKind::Success } else { StatusKind::Idle },
        );
        info!(use_mock = self.use_mock, "transport toggled");
        if let Err(err) = Config::save_use_mock(self.use_mock) {
            warn!(error = %err, "could not persist transport selection");
        }
    }

    pub fn rating_up(&mut self) {
        self.belief_rating = (self.belief_rating + 5).min(100);
    }

    pub fn rating_down(&mut self) {
        self.belief_rating = self.belief_rating.saturating_sub(5);
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % 3;
        self.save_flash_ticks = self.save_flash_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusKind;

    fn test_app(use_mock: bool) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            webhook_url: Some("https://hook.eu1.make.com/x9f2".to_string()),
            use_mock: Some(use_mock),
        };
        let journal = JournalStore::at_path(dir.path().join("journal.json"));
        (App::new(&config, journal), dir)
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_rejected_without_dispatch() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "   ".to_string();
        app.submit();

        assert!(app.pending.is_none());
        assert!(!app.reporter.is_loading());
        assert_eq!(
            app.reporter.error(),
            Some("Please enter your negative thought before submitting.")
        );
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_over_length_input_rejected_without_dispatch() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "x".repeat(501);
        app.submit();

        assert!(app.pending.is_none());
        let banner = app.reporter.error().unwrap();
        assert!(banner.contains("500"));
        assert!(banner.contains("501"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_mock_submission_end_to_end() {
        let (mut app, _dir) = test_app(true);
        // 42 chars, no trigger words
        app.thought_input = "I will definitely fail this presentation".to_string();
        app.submit();

        assert!(app.reporter.is_loading());
        assert!(app.pending.is_some());
        let (status, kind) = app.reporter.status();
        assert_eq!(status, "Using Mock API");
        assert_eq!(kind, StatusKind::Loading);

        app.finish_pending().await;

        assert!(!app.reporter.is_loading());
        assert!(app.reporter.error().is_none());
        let result = app.current_result.as_ref().unwrap();
        assert!(result
            .encouragement
            .ends_with(crate::mock::SHORT_THOUGHT_SUFFIX));
        let record = app.current_record().unwrap();
        assert_eq!(
            record.original_thought,
            "I will definitely fail this presentation"
        );
        assert!(app.debug_value.is_some());
        let (status, kind) = app.reporter.status();
        assert_eq!(status, "Successfully processed thought.");
        assert_eq!(kind, StatusKind::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mockerror_reaches_error_banner() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "this will mockerror for sure".to_string();
        app.submit();
        app.finish_pending().await;

        assert!(!app.reporter.is_loading());
        assert_eq!(
            app.reporter.error(),
            Some("Failed to get analysis: Mock API Error: Simulated server failure.")
        );
        assert!(app.current_result.is_none());
        assert!(app.current_record().is_none());
        // The raw error is available for the developer panel.
        assert_eq!(app.debug_value.as_ref().unwrap()["kind"], "transport");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mockmalformed_fails_defensive_shape_check() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "trigger mockmalformed".to_string();
        app.submit();
        app.finish_pending().await;

        assert_eq!(
            app.reporter.error(),
            Some("Failed to get analysis: Received incomplete or malformed data from the AI service.")
        );
        assert!(app.current_result.is_none());
        // The incomplete raw body stays visible for diagnosis.
        let debug = app.debug_value.as_ref().unwrap();
        assert_eq!(debug["distortions"][0], "Partial Data");
        assert!(debug["alternative"].is_null());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_ignored_while_in_flight() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "first thought".to_string();
        app.submit();
        let seq_before = app.submit_seq;

        app.thought_input = "second thought".to_string();
        app.submit();
        assert_eq!(app.submit_seq, seq_before);

        app.finish_pending().await;
        assert_eq!(
            app.current_record().unwrap().original_thought,
            "first thought"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_is_discarded() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "stale thought".to_string();
        app.submit();

        // A newer dispatch supersedes the one in flight.
        app.submit_seq += 1;
        app.finish_pending().await;

        assert!(app.current_result.is_none());
        assert!(app.current_record().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_result_round_trip_and_idempotence() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "a perfectly ordinary worry".to_string();
        app.submit();
        app.finish_pending().await;
        assert!(app.current_result.is_some());

        app.clear_result();
        assert!(app.current_result.is_none());
        assert!(app.debug_value.is_none());
        assert!(app.reporter.error().is_none());
        assert_eq!(app.save_flash_ticks, 0);

        // Clearing twice leaves the same state as clearing once.
        app.clear_result();
        assert!(app.current_result.is_none());
        assert!(app.debug_value.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_without_analysis_reports_and_skips_store() {
        let (mut app, dir) = test_app(true);
        app.save_to_journal();

        assert_eq!(
            app.reporter.error(),
            Some("No analysis data to save. Please submit a thought first.")
        );
        assert!(!dir.path().join("journal.json").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_after_success_prepends_entry_with_rating() {
        let (mut app, dir) = test_app(true);
        app.thought_input = "worth writing down".to_string();
        app.submit();
        app.finish_pending().await;

        app.belief_rating = 70;
        app.save_to_journal();
        assert!(app.save_flash_ticks > 0);
        let (status, kind) = app.reporter.status();
        assert_eq!(status, "Entry saved to journal.");
        assert_eq!(kind, StatusKind::Success);

        let store = JournalStore::at_path(dir.path().join("journal.json"));
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original_thought, "worth writing down");
        assert_eq!(entries[0].belief_rating.as_deref(), Some("70"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_survives_display_clear() {
        let (mut app, _dir) = test_app(true);
        app.thought_input = "keep me for the journal".to_string();
        app.submit();
        app.finish_pending().await;

        app.clear_result();
        assert!(app.current_record().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rating_bounds() {
        let (mut app, _dir) = test_app(true);
        app.belief_rating = 98;
        app.rating_up();
        assert_eq!(app.belief_rating, 100);
        app.belief_rating = 3;
        app.rating_down();
        assert_eq!(app.belief_rating, 0);
    }
}
