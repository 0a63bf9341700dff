//! Pre-flight checks before talking to remote services.
//!
//! Validates configuration up front so a session does not fail halfway
//! through an analysis.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Analysis and chat need the LLM credential.
    Chat,
    /// Transcript-only commands need nothing beyond network access.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings, api_key: Option<&str>) -> Result<()> {
    match operation {
        Operation::Chat => {
            settings.resolve_api_key(api_key)?;
        }
        Operation::Transcript => {
            // Public endpoints only
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_transcript_no_requirements() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "TUBETALK_TEST_UNSET_KEY_VAR".to_string();
        assert!(check(Operation::Transcript, &settings, None).is_ok());
    }

    #[test]
    fn test_check_chat_needs_key() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "TUBETALK_TEST_UNSET_KEY_VAR".to_string();
        assert!(check(Operation::Chat, &settings, None).is_err());
        assert!(check(Operation::Chat, &settings, Some("key")).is_ok());
    }
}
