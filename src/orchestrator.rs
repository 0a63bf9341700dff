//! Session orchestrator for Tubetalk.
//!
//! Drives one session: analyze a video, then answer questions about it.

use crate::assistant::{classify_video_type, compose_prompt, ChatTurn, Session, VideoAnalysis};
use crate::config::{Prompts, Settings};
use crate::error::{Result, TubetalkError};
use crate::llm::{ChatCompletion, TextCompletion};
use crate::youtube::{
    extract_video_id, select_transcript, InnertubeTranscripts, MetadataProvider, OembedMetadata,
    TranscriptProvider,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Owns the service clients and the current session.
pub struct Orchestrator {
    prompts: Prompts,
    transcripts: Arc<dyn TranscriptProvider>,
    metadata: Arc<dyn MetadataProvider>,
    llm: Arc<dyn TextCompletion>,
    session: Session,
}

impl Orchestrator {
    /// Create an orchestrator with the default YouTube and LLM clients.
    pub fn new(settings: &Settings, api_key: &str, model: Option<&str>) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let mut llm = ChatCompletion::new(&settings.llm, api_key)?;
        if let Some(model) = model {
            llm = llm.with_model(model);
        }
        info!("Using model {}", llm.model());

        Ok(Self::with_components(
            prompts,
            Arc::new(InnertubeTranscripts::new(&settings.youtube)?),
            Arc::new(OembedMetadata::new(&settings.youtube)?),
            Arc::new(llm),
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptProvider>,
        metadata: Arc<dyn MetadataProvider>,
        llm: Arc<dyn TextCompletion>,
    ) -> Self {
        Self {
            prompts,
            transcripts,
            metadata,
            llm,
            session: Session::new(),
        }
    }

    /// A new orchestrator sharing these clients, with an empty session.
    pub fn new_session(&self) -> Self {
        Self::with_components(
            self.prompts.clone(),
            Arc::clone(&self.transcripts),
            Arc::clone(&self.metadata),
            Arc::clone(&self.llm),
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Analyze a video, replacing the current session.
    ///
    /// Selects the transcript, looks up metadata (best effort) and detects the
    /// video type. The current session is only replaced once every required
    /// step succeeds.
    #[instrument(skip(self))]
    pub async fn analyze(&mut self, input: &str) -> Result<&VideoAnalysis> {
        let video_id = extract_video_id(input)?;
        let transcript = select_transcript(self.transcripts.as_ref(), &video_id).await?;
        info!(
            "Loaded {} character transcript ({})",
            transcript.text.chars().count(),
            transcript.language_label
        );

        let metadata = match self.metadata.get_metadata(&video_id).await {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("Metadata lookup failed for {}: {}", video_id, e);
                None
            }
        };

        let video_type =
            classify_video_type(&transcript.text, self.llm.as_ref(), &self.prompts).await?;

        let mut session = Session::new();
        session.load_transcript(&video_id, transcript, metadata)?;
        session.set_video_type(video_type)?;
        self.session = session;

        self.session.analysis().ok_or(TubetalkError::NoVideo)
    }

    /// Ask a question about the analyzed video.
    ///
    /// The turn is appended only when the model answers.
    #[instrument(skip(self))]
    pub async fn ask(&mut self, question: &str) -> Result<&ChatTurn> {
        let question = question.trim();
        if question.is_empty() {
            return Err(TubetalkError::InvalidInput("Question is empty".to_string()));
        }

        let (transcript, video_type) = self.session.chat_context()?;
        let prompt = compose_prompt(
            &self.prompts.rendered_chat(),
            transcript,
            question,
            video_type,
            self.session.history(),
        );

        let answer = self.llm.generate(&prompt).await.map_err(|e| match e {
            TubetalkError::CompletionFailed(msg) => TubetalkError::CompletionFailed(msg),
            other => TubetalkError::CompletionFailed(other.to_string()),
        })?;

        self.session.record_turn(ChatTurn::new(question, &answer))
    }
}
