//! Video type detection.

use super::composer::{truncate_chars, TRANSCRIPT_CHAR_LIMIT};
use crate::config::Prompts;
use crate::error::{Result, TubetalkError};
use crate::llm::TextCompletion;
use std::collections::HashMap;
use tracing::{info, instrument};

/// Build the classification prompt for a transcript.
pub fn classification_prompt(prompts: &Prompts, transcript: &str) -> String {
    // Custom variables first so transcript text is never substituted into.
    let template = prompts.render_with_custom(&prompts.classify.template, &HashMap::new());
    template.replace(
        "{{transcript}}",
        truncate_chars(transcript, TRANSCRIPT_CHAR_LIMIT),
    )
}

/// Ask the model for the video's category.
///
/// Returns the trimmed, lowercased response. It is not checked against the
/// known categories; role lookup falls back to general for anything else.
#[instrument(skip_all, fields(transcript_chars = transcript.chars().count()))]
pub async fn classify_video_type(
    transcript: &str,
    llm: &dyn TextCompletion,
    prompts: &Prompts,
) -> Result<String> {
    let prompt = classification_prompt(prompts, transcript);

    let response = llm
        .generate(&prompt)
        .await
        .map_err(|e| TubetalkError::ClassificationUnavailable(e.to_string()))?;

    let video_type = response.trim().to_lowercase();
    info!("Detected video type: {:?}", video_type);
    Ok(video_type)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every prompt it receives.
    #[derive(Default)]
    pub(crate) struct ScriptedLlm {
        pub responses: Mutex<VecDeque<Result<String>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        pub(crate) fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn replying(responses: &[&str]) -> Self {
            Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub(crate) fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TubetalkError::CompletionFailed("script exhausted".to_string())))
        }
    }

    #[tokio::test]
    async fn test_response_is_trimmed_and_lowercased() {
        let llm = ScriptedLlm::replying(&["  Educational\n"]);
        let video_type = classify_video_type("lesson", &llm, &Prompts::default()).await.unwrap();
        assert_eq!(video_type, "educational");
    }

    #[tokio::test]
    async fn test_unrecognized_response_passes_through() {
        let llm = ScriptedLlm::replying(&["News, probably."]);
        let video_type = classify_video_type("t", &llm, &Prompts::default()).await.unwrap();
        assert_eq!(video_type, "news, probably.");
    }

    #[tokio::test]
    async fn test_empty_response_is_not_retried() {
        let llm = ScriptedLlm::replying(&["   "]);
        let video_type = classify_video_type("t", &llm, &Prompts::default()).await.unwrap();
        assert_eq!(video_type, "");
        assert_eq!(llm.seen_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_llm_failure_is_classification_unavailable() {
        let llm = ScriptedLlm::new(vec![Err(TubetalkError::CompletionFailed("quota".to_string()))]);
        let err = classify_video_type("t", &llm, &Prompts::default()).await.unwrap_err();
        assert!(matches!(err, TubetalkError::ClassificationUnavailable(_)));
        assert_eq!(llm.seen_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_truncated_transcript() {
        let llm = ScriptedLlm::replying(&["general"]);
        let transcript = format!("{}END", "a".repeat(TRANSCRIPT_CHAR_LIMIT));
        classify_video_type(&transcript, &llm, &Prompts::default()).await.unwrap();

        let prompt = &llm.seen_prompts()[0];
        assert!(prompt.contains("\"educational\", \"motivational\", \"news\", \"product\", or \"general\""));
        assert!(prompt.contains(&format!("Transcript:\n{}\n\nCategory:", "a".repeat(TRANSCRIPT_CHAR_LIMIT))));
        assert!(!prompt.contains("END"));
    }

    #[test]
    fn test_custom_variables_do_not_touch_transcript() {
        let mut prompts = Prompts::default();
        prompts.classify.template = "Audience: {{audience}}\n{{transcript}}".to_string();
        prompts.variables.insert("audience".to_string(), "students".to_string());

        let prompt = classification_prompt(&prompts, "mentions {{audience}} literally");
        assert_eq!(prompt, "Audience: students\nmentions {{audience}} literally");
    }
}
