use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use crate::analysis::AnalysisPayload;
use crate::error::ReframeError;
use crate::transport::ThoughtAnalyzer;

/// Simulated network latency.
pub const MOCK_DELAY: Duration = Duration::from_millis(1200);

/// Encouragement suffix for thoughts longer than 50 characters.
pub const LONG_THOUGHT_SUFFIX: &str = " That was a long thought, good job articulating it!";
/// Encouragement suffix for everything else.
pub const SHORT_THOUGHT_SUFFIX: &str = " Keep exploring your thoughts!";

struct MockTemplate {
    distortions: &'static [&'static str],
    alternative: &'static str,
    encouragement: &'static str,
}

const MOCK_TEMPLATES: [MockTemplate; 5] = [
    MockTemplate {
        distortions: &["Catastrophizing", "Mind Reading"],
        alternative: "It's possible I'm misinterpreting the situation. Maybe they are just busy, or perhaps my presentation wasn't as bad as I think. I can ask for specific feedback.",
        encouragement: "You've handled challenging situations before and have the strength to navigate this one too. Focus on what you can control and learn from the experience.",
    },
    MockTemplate {
        distortions: &["Overgeneralization", "Labeling"],
        alternative: "One mistake doesn't define my entire capability. Everyone makes errors sometimes. I can learn from this and improve next time.",
        encouragement: "Be kind to yourself. This is a learning opportunity, not a final judgment on your worth or skills.",
    },
    MockTemplate {
        distortions: &["Emotional Reasoning"],
        alternative: "Just because I feel like a failure doesn't mean I am one. Feelings are not always facts. I should look at the objective evidence.",
        encouragement: "Your feelings are valid, but they don't always reflect the whole truth. Take a moment to breathe and look at the situation from a different perspective.",
    },
    MockTemplate {
        distortions: &["Should Statements"],
        alternative: "Instead of focusing on what I 'should' have done, I can focus on what I can do now or differently in the future. Holding myself to rigid expectations can be unhelpful.",
        encouragement: "Perfection is an illusion. It's okay to be imperfect. Focus on progress, not perfection.",
    },
    // No specific distortion; exercises the empty-state rendering path.
    MockTemplate {
        distortions: &[],
        alternative: "This is a tough situation, and it's okay to feel overwhelmed. I can break it down into smaller, manageable steps.",
        encouragement: "You're resilient and capable. Take it one step at a time. You don't have to solve everything at once.",
    },
];

/// Local stand-in for the analysis webhook.
///
/// Recognizes two trigger substrings (case-insensitive): "mockerror" fails
/// like a server error, and "mockmalformed" resolves with an incomplete body
/// so the controller's shape check gets exercised. Anything else gets one of
/// five canned analyses.
#[derive(Clone, Default)]
pub struct MockAnalyzer;

impl MockAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ThoughtAnalyzer for MockAnalyzer {
    async fn analyze(&self, thought: &str) -> Result<AnalysisPayload, ReframeError> {
        info!(chars = thought.chars().count(), "processing thought with mock AI");
        tokio::time::sleep(MOCK_DELAY).await;

        let lowered = thought.to_lowercase();
        if lowered.contains("mockerror") {
            warn!("mock simulating an error response");
            return Err(ReframeError::Transport(
                "Mock API Error: Simulated server failure.".to_string(),
            ));
        }

        if lowered.contains("mockmalformed") {
            warn!("mock simulating a malformed response");
            return Ok(AnalysisPayload {
                distortions: Some(vec!["Partial Data".to_string()]),
                alternative: None,
                encouragement: None,
            });
        }

        let template = &MOCK_TEMPLATES[rand::rng().random_range(0..MOCK_TEMPLATES.len())];
        let suffix = if thought.chars().count() > 50 {
            LONG_THOUGHT_SUFFIX
        } else {
            SHORT_THOUGHT_SUFFIX
        };

        Ok(AnalysisPayload {
            distortions: Some(template.distortions.iter().map(|d| d.to_string()).collect()),
            alternative: Some(template.alternative.to_string()),
            encouragement: Some(format!("{}{}", template.encouragement, suffix)),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_distortion_sets() -> Vec<Vec<String>> {
        MOCK_TEMPLATES
            .iter()
            .map(|t| t.distortions.iter().map(|d| d.to_string()).collect())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_mockerror_trigger_any_case() {
        let mock = MockAnalyzer::new();
        for input in ["please mockerror now", "MOCKERROR", "MockError mid-sentence"] {
            let err = mock.analyze(input).await.unwrap_err();
            assert_eq!(err.to_string(), "Mock API Error: Simulated server failure.");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mockmalformed_resolves_but_fails_shape_check() {
        let mock = MockAnalyzer::new();
        let payload = mock.analyze("trigger MockMalformed please").await.unwrap();
        assert_eq!(
            payload.distortions.as_deref(),
            Some(&["Partial Data".to_string()][..])
        );
        match payload.validate() {
            Err(ReframeError::MalformedResponse { missing }) => {
                assert_eq!(missing, vec!["alternative", "encouragement"]);
            }
            other => panic!("expected malformed response, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_normal_input_returns_a_known_template() {
        let mock = MockAnalyzer::new();
        let sets = template_distortion_sets();
        // Random selection; run enough times to be confident every result is
        // drawn from the fixed set.
        for _ in 0..40 {
            let result = mock
                .analyze("I will definitely fail this presentation")
                .await
                .unwrap()
                .validate()
                .unwrap();
            assert!(sets.contains(&result.distortions));
            assert!(result.encouragement.ends_with(SHORT_THOUGHT_SUFFIX));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_input_gets_long_suffix() {
        let mock = MockAnalyzer::new();
        let input = "a".repeat(51);
        let result = mock.analyze(&input).await.unwrap().validate().unwrap();
        assert!(result.encouragement.ends_with(LONG_THOUGHT_SUFFIX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_fifty_chars_gets_short_suffix() {
        let mock = MockAnalyzer::new();
        let input = "b".repeat(50);
        let result = mock.analyze(&input).await.unwrap().validate().unwrap();
        assert!(result.encouragement.ends_with(SHORT_THOUGHT_SUFFIX));
    }
}
