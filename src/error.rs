use thiserror::Error;

/// Failures that can surface anywhere in the submit/save flow.
///
/// Every variant maps to a short user-facing message via `Display`; the
/// structured detail (e.g. which response fields were missing) is kept for
/// the log and the developer panel.
#[derive(Debug, Error)]
pub enum ReframeError {
    /// Local input rejection; the request is never dispatched.
    #[error("{0}")]
    Validation(String),

    /// Network or HTTP failure talking to the analysis service.
    #[error("{0}")]
    Transport(String),

    /// A response arrived but is missing required fields.
    #[error("Received incomplete or malformed data from the AI service.")]
    MalformedResponse { missing: Vec<&'static str> },

    /// Journal storage failure; never affects the in-memory record.
    #[error("{0}")]
    Persistence(String),
}

impl ReframeError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReframeError::Validation(_) => "validation",
            ReframeError::Transport(_) => "transport",
            ReframeError::MalformedResponse { .. } => "malformed_response",
            ReframeError::Persistence(_) => "persistence",
        }
    }

    /// JSON rendering of the failure for the developer panel.
    pub fn debug_value(&self) -> serde_json::Value {
        match self {
            ReframeError::MalformedResponse { missing } => serde_json::json!({
                "error": self.to_string(),
                "kind": self.kind(),
                "missing": missing,
            }),
            _ => serde_json::json!({
                "error": self.to_string(),
                "kind": self.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_response_message_is_fixed() {
        let err = ReframeError::MalformedResponse {
            missing: vec!["alternative", "encouragement"],
        };
        assert_eq!(
            err.to_string(),
            "Received incomplete or malformed data from the AI service."
        );
    }

    #[test]
    fn test_debug_value_includes_missing_fields() {
        let err = ReframeError::MalformedResponse {
            missing: vec!["encouragement"],
        };
        let value = err.debug_value();
        assert_eq!(value["kind"], "malformed_response");
        assert_eq!(value["missing"][0], "encouragement");
    }
}
