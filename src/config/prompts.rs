//! Prompt templates for Tubetalk.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use crate::assistant::VideoType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub classify: ClassifyPrompts,
    pub chat: ChatPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompt for video type classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyPrompts {
    /// Template with a `{{transcript}}` placeholder.
    pub template: String,
}

impl Default for ClassifyPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a helpful assistant. Classify the following YouTube video transcript into one of these categories ONLY:
"educational", "motivational", "news", "product", or "general".

Respond with only the single category name. Do not include any explanation.

Transcript:
{{transcript}}

Category:
"#
            .to_string(),
        }
    }
}

/// Role lines for the chat persona, one per video type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    /// Line following the role, telling the model what to do with the transcript.
    pub instruction: String,
    pub educational: String,
    pub motivational: String,
    pub news: String,
    pub product: String,
    pub general: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            instruction: "Based on the transcript below, answer the user's questions and engage in a conversation.".to_string(),
            educational: "You are a helpful tutor. Engage in a multi-turn interactive Q&A session based on the transcript.".to_string(),
            motivational: "You are a motivational content explainer. Engage in a multi-turn conversation based on the transcript.".to_string(),
            news: "You are a factual news analyst. Engage in a multi-turn conversation based on the transcript.".to_string(),
            product: "You are a product assistant helping users understand tech reviews or tutorials. Engage in a multi-turn conversation based on the transcript.".to_string(),
            general: "You are a smart assistant that explains things clearly. Engage in a multi-turn conversation based on the transcript.".to_string(),
        }
    }
}

impl ChatPrompts {
    /// Role line for a video type key. Unknown keys get the general role.
    pub fn role_for(&self, video_type: &str) -> &str {
        match VideoType::from_key(video_type).unwrap_or_default() {
            VideoType::Educational => &self.educational,
            VideoType::Motivational => &self.motivational,
            VideoType::News => &self.news,
            VideoType::Product => &self.product,
            VideoType::General => &self.general,
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let classify_path = custom_path.join("classify.toml");
            if classify_path.exists() {
                let content = std::fs::read_to_string(&classify_path)?;
                prompts.classify = toml::from_str(&content)?;
            }

            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Chat role and instruction lines with custom variables substituted.
    ///
    /// Transcript and history are added afterwards, so they are never substituted into.
    pub fn rendered_chat(&self) -> ChatPrompts {
        let empty = std::collections::HashMap::new();
        let render = |line: &str| self.render_with_custom(line, &empty);
        ChatPrompts {
            instruction: render(&self.chat.instruction),
            educational: render(&self.chat.educational),
            motivational: render(&self.chat.motivational),
            news: render(&self.chat.news),
            product: render(&self.chat.product),
            general: render(&self.chat.general),
        }
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.classify.template.contains("{{transcript}}"));
        assert!(!prompts.chat.general.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_role_lookup_falls_back_to_general() {
        let chat = ChatPrompts::default();
        assert_eq!(chat.role_for("sports"), chat.general);
        assert_eq!(chat.role_for(""), chat.general);
        assert_eq!(chat.role_for("NEWS"), chat.news);
        assert_eq!(chat.role_for("educational"), chat.educational);
    }

    #[test]
    fn test_custom_dir_overrides_chat_roles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("chat.toml"),
            "news = \"You are a skeptical editor.\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.chat.news, "You are a skeptical editor.");
        // Unset keys keep their defaults
        assert_eq!(prompts.chat.general, ChatPrompts::default().general);
        assert_eq!(prompts.classify.template, ClassifyPrompts::default().template);
    }

    #[test]
    fn test_chat_toml_variables_are_rendered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("chat.toml"),
            "instruction = \"Answer for {{audience}}.\"\ngeneral = \"You explain things to {{audience}}.\"\n",
        )
        .unwrap();

        let mut vars = std::collections::HashMap::new();
        vars.insert("audience".to_string(), "beginners".to_string());
        let prompts = Prompts::load(dir.path().to_str(), Some(&vars)).unwrap();

        let chat = prompts.rendered_chat();
        assert_eq!(chat.instruction, "Answer for beginners.");
        assert_eq!(chat.general, "You explain things to beginners.");
        assert_eq!(chat.news, ChatPrompts::default().news);
        // Raw templates are untouched
        assert_eq!(prompts.chat.general, "You explain things to {{audience}}.");
    }
}
