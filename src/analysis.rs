use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ReframeError;

/// Maximum accepted thought length in characters, after trimming.
pub const MAX_THOUGHT_LENGTH: usize = 500;

/// Raw analysis body as it comes off the wire (or out of the mock).
///
/// All fields are optional so an incomplete response can travel to the
/// controller's defensive shape check instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub distortions: Option<Vec<String>>,
    pub alternative: Option<String>,
    pub encouragement: Option<String>,
}

impl AnalysisPayload {
    /// Names of the required fields that are absent, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.distortions.is_none() {
            missing.push("distortions");
        }
        if self.alternative.is_none() {
            missing.push("alternative");
        }
        if self.encouragement.is_none() {
            missing.push("encouragement");
        }
        missing
    }

    /// Presence check for the three required fields.
    pub fn validate(self) -> Result<AnalysisResult, ReframeError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ReframeError::MalformedResponse { missing });
        }
        Ok(AnalysisResult {
            distortions: self.distortions.unwrap_or_default(),
            alternative: self.alternative.unwrap_or_default(),
            encouragement: self.encouragement.unwrap_or_default(),
        })
    }
}

/// A complete, shape-checked analysis from the AI service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub distortions: Vec<String>,
    pub alternative: String,
    pub encouragement: String,
}

/// The single most-recent accepted submission and its analysis.
///
/// Overwritten on every successful submission; read by the journal save
/// action. Serialized camelCase to match the journal's stored shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRecord {
    pub original_thought: String,
    pub analysis: AnalysisResult,
    pub timestamp: String,
}

impl ThoughtRecord {
    pub fn new(thought: &str, analysis: AnalysisResult) -> Self {
        Self {
            original_thought: thought.to_string(),
            analysis,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// A persisted journal record: the cached record plus the belief rating
/// captured at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub original_thought: String,
    pub analysis: AnalysisResult,
    pub timestamp: String,
    pub belief_rating: Option<String>,
    pub saved_at: String,
}

impl JournalEntry {
    pub fn from_record(record: &ThoughtRecord, belief_rating: Option<String>) -> Self {
        Self {
            original_thought: record.original_thought.clone(),
            analysis: record.analysis.clone(),
            timestamp: record.timestamp.clone(),
            belief_rating,
            saved_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Validate a raw submission, returning the trimmed thought text.
pub fn validate_thought(input: &str) -> Result<String, ReframeError> {
    let thought = input.trim();
    if thought.is_empty() {
        return Err(ReframeError::Validation(
            "Please enter your negative thought before submitting.".to_string(),
        ));
    }
    let len = thought.chars().count();
    if len > MAX_THOUGHT_LENGTH {
        return Err(ReframeError::Validation(format!(
            "Thought is too long. Please keep it under {} characters. Current: {}",
            MAX_THOUGHT_LENGTH, len
        )));
    }
    Ok(thought.to_string())
}

/// Human-readable description for a known cognitive distortion.
pub fn distortion_description(name: &str) -> &'static str {
    match name {
        "Catastrophizing" => {
            "Exaggerating the potential negative consequences of a situation, imagining the worst-case scenario."
        }
        "Mind Reading" => {
            "Assuming you know what others are thinking, often negatively, without concrete evidence."
        }
        "Overgeneralization" => {
            "Drawing broad conclusions based on a single event or piece of evidence."
        }
        "Labeling" => {
            "Assigning global, negative traits to yourself or others based on specific behaviors or events."
        }
        "Emotional Reasoning" => {
            "Believing something is true because it 'feels' true, ignoring or discounting evidence to the contrary."
        }
        "Should Statements" => {
            "Having rigid rules about how you or others 'should' behave, leading to guilt or resentment."
        }
        "Personalization" => {
            "Taking responsibility or blame for events that are not entirely within your control."
        }
        "Filtering" => {
            "Focusing on the negative details while ignoring the positive ones."
        }
        "All-or-Nothing Thinking" => {
            "Seeing things in black-and-white categories, with no middle ground."
        }
        "Discounting the Positive" => {
            "Rejecting positive experiences by insisting they 'don't count' for some reason."
        }
        _ => "No specific description available.",
    }
}
