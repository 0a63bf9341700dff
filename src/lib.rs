//! Tubetalk - chat with YouTube videos
//!
//! Fetches the transcript of a YouTube video, classifies what kind of video it
//! is, and answers questions about it in a multi-turn conversation.
//!
//! # Overview
//!
//! Tubetalk allows you to:
//! - Select the best available transcript (first human-authored track, in any
//!   language, else the first generated one)
//! - Detect the video type (educational, motivational, news, product, general)
//! - Chat about the video with a persona matched to its type
//! - Serve the same flow over a small HTTP API
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `youtube` - Video ID parsing, transcript selection, metadata
//! - `llm` - Text completion abstraction
//! - `assistant` - Classifier, prompt composer, session state
//! - `orchestrator` - Ties the services to one session
//!
//! # Example
//!
//! ```rust,no_run
//! use tubetalk::config::Settings;
//! use tubetalk::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let api_key = settings.resolve_api_key(None)?;
//!     let mut orchestrator = Orchestrator::new(&settings, &api_key, None)?;
//!
//!     let analysis = orchestrator.analyze("dQw4w9WgXcQ").await?;
//!     println!("Video type: {:?}", analysis.video_type);
//!
//!     let turn = orchestrator.ask("What is this video about?").await?;
//!     println!("{}", turn.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod youtube;

pub use error::{Result, TubetalkError};
