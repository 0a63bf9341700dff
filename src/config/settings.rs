//! Configuration settings for Tubetalk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub youtube: YoutubeSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Text completion service settings.
///
/// Any OpenAI-compatible chat completions endpoint works. The default points at
/// Gemini's OpenAI compatibility layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Model used for both classification and chat.
    pub model: String,
    /// API key. Prefer `api_key_env` over storing the key in the file.
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Sampling temperature. None leaves the provider default.
    pub temperature: Option<f32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 300,
            temperature: None,
        }
    }
}

/// YouTube transcript and metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Timeout for each request to YouTube, in seconds.
    pub request_timeout_seconds: u64,
    /// Accept-Language header sent with watch page requests.
    pub accept_language: String,
    /// Innertube client name used for the player request.
    pub innertube_client_name: String,
    /// Innertube client version used for the player request.
    pub innertube_client_version: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            accept_language: "en-US".to_string(),
            innertube_client_name: "ANDROID".to_string(),
            innertube_client_version: "20.10.38".to_string(),
        }
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TubetalkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubetalk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Resolve the LLM API key.
    ///
    /// Order: explicit override, then `llm.api_key`, then the `llm.api_key_env`
    /// environment variable. Blank values count as missing.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> crate::error::Result<String> {
        let from_env = std::env::var(&self.llm.api_key_env).ok();

        explicit
            .map(str::to_string)
            .into_iter()
            .chain(self.llm.api_key.clone())
            .chain(from_env)
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
            .ok_or_else(|| {
                crate::error::TubetalkError::Config(format!(
                    "API key not set. Pass --api-key or set it with: export {}='...'",
                    self.llm.api_key_env
                ))
            })
    }
}
