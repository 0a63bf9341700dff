//! Configuration module for Tubetalk.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ChatPrompts, ClassifyPrompts, Prompts};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, ServerSettings, Settings, YoutubeSettings,
};
