//! Text completion service abstraction.

mod chat;

pub use chat::ChatCompletion;

use crate::error::Result;
use async_trait::async_trait;

/// Text in, text out.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Generate a continuation for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
