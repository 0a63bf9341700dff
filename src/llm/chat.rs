//! Chat-completions backed text generation.

use super::TextCompletion;
use crate::config::LlmSettings;
use crate::error::{Result, TubetalkError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Sends each prompt as a single user message.
pub struct ChatCompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatCompletion {
    /// Create a completion client. The API key is configured once here.
    pub fn new(settings: &LlmSettings, api_key: &str) -> Result<Self> {
        Ok(Self {
            client: create_client(settings, api_key)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Override the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for ChatCompletion {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.chars().count()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| TubetalkError::CompletionFailed(e.to_string()))?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }
        let request = builder
            .build()
            .map_err(|e| TubetalkError::CompletionFailed(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TubetalkError::CompletionFailed(format!("Chat API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TubetalkError::CompletionFailed("No response from model".to_string()))?;

        let text = choice.message.content.unwrap_or_default();
        debug!("Model returned {} characters", text.len());
        Ok(text)
    }
}
