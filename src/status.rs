/// Status indicator kind, mirrored by the developer-panel status colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Idle => "idle",
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

const DEFAULT_LOADING_MESSAGE: &str = "Analyzing your thought...";

/// Tracks the single loading flag, the error banner, and the compact status
/// line shown in the developer panel. One instance lives on the app state;
/// loading and the error banner are mutually exclusive.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    loading: bool,
    loading_message: String,
    error: Option<String>,
    status: String,
    kind: StatusKind,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self {
            loading: false,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            error: None,
            status: "Idle".to_string(),
            kind: StatusKind::Idle,
        }
    }
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter or leave the loading state. Entering clears any visible error.
    pub fn set_loading(&mut self, loading: bool, message: Option<&str>) {
        self.loading = loading;
        self.loading_message = message.unwrap_or(DEFAULT_LOADING_MESSAGE).to_string();
        if loading {
            self.clear_error();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loading_message(&self) -> &str {
        &self.loading_message
    }

    /// Show the error banner and push a truncated summary to the status line.
    pub fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        let summary: String = message.chars().take(50).collect();
        self.set_status(&format!("Error: {}...", summary), StatusKind::Error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_status(&mut self, message: &str, kind: StatusKind) {
        self.status = message.to_string();
        self.kind = kind;
    }

    pub fn status(&self) -> (&str, StatusKind) {
        (&self.status, self.kind)
    }
}
