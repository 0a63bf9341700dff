//! Per-video chat session state.

use crate::error::{Result, TubetalkError};
use crate::youtube::{Transcript, VideoMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            asked_at: Utc::now(),
        }
    }
}

/// Everything learned about the analyzed video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub video_id: String,
    pub metadata: Option<VideoMetadata>,
    pub transcript: Transcript,
    /// Normalized classifier output, set once.
    pub video_type: Option<String>,
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoTranscript,
    TranscriptLoaded,
    TypeDetected,
    Chatting(usize),
}

/// Session state: the analyzed video plus an append-only chat history.
///
/// A session only moves forward. Starting over means replacing it with
/// `Session::default()`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    analysis: Option<VideoAnalysis>,
    history: Vec<ChatTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.analysis {
            None => SessionPhase::NoTranscript,
            Some(a) if a.video_type.is_none() => SessionPhase::TranscriptLoaded,
            Some(_) if self.history.is_empty() => SessionPhase::TypeDetected,
            Some(_) => SessionPhase::Chatting(self.history.len()),
        }
    }

    pub fn analysis(&self) -> Option<&VideoAnalysis> {
        self.analysis.as_ref()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Store the selected transcript. Only valid on a fresh session.
    pub fn load_transcript(
        &mut self,
        video_id: &str,
        transcript: Transcript,
        metadata: Option<VideoMetadata>,
    ) -> Result<()> {
        if self.analysis.is_some() {
            return Err(TubetalkError::InvalidInput(
                "Session already has a transcript; start a new session".to_string(),
            ));
        }
        self.analysis = Some(VideoAnalysis {
            video_id: video_id.to_string(),
            metadata,
            transcript,
            video_type: None,
        });
        Ok(())
    }

    /// Record the detected video type. Allowed once, after the transcript.
    pub fn set_video_type(&mut self, video_type: String) -> Result<()> {
        let analysis = self.analysis.as_mut().ok_or(TubetalkError::NoVideo)?;
        if analysis.video_type.is_some() {
            return Err(TubetalkError::InvalidInput(
                "Video type already detected for this session".to_string(),
            ));
        }
        analysis.video_type = Some(video_type);
        Ok(())
    }

    /// Transcript text and video type, once both are known.
    pub fn chat_context(&self) -> Result<(&str, &str)> {
        match &self.analysis {
            Some(VideoAnalysis {
                transcript,
                video_type: Some(video_type),
                ..
            }) => Ok((transcript.text.as_str(), video_type.as_str())),
            _ => Err(TubetalkError::NoVideo),
        }
    }

    /// Append a finished turn.
    pub fn record_turn(&mut self, turn: ChatTurn) -> Result<&ChatTurn> {
        self.chat_context()?;
        self.history.push(turn);
        Ok(&self.history[self.history.len() - 1])
    }
}
