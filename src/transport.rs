use async_trait::async_trait;

use crate::analysis::AnalysisPayload;
use crate::error::ReframeError;

/// Backend that turns a negative thought into a structured analysis.
///
/// Two implementations exist: the real webhook client and a local mock.
/// Which one a submission uses is decided once at dispatch, not at the
/// individual call sites.
#[async_trait]
pub trait ThoughtAnalyzer: Send + Sync {
    async fn analyze(&self, thought: &str) -> Result<AnalysisPayload, ReframeError>;

    /// Short name for the status line and the log.
    fn name(&self) -> &'static str;
}
