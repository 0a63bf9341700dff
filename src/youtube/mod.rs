//! YouTube transcripts and metadata.
//!
//! The transcript and metadata services sit behind traits so the selection
//! policy can run against any provider.

mod innertube;
mod languages;
mod oembed;
mod video_id;

pub use innertube::InnertubeTranscripts;
pub use languages::language_name;
pub use oembed::OembedMetadata;
pub use video_id::{extract_video_id, watch_url};

use crate::error::{Result, TubetalkError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One available caption track for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTrack {
    /// Human-readable language name (e.g. "English").
    pub language: String,
    /// Language code as reported by YouTube (e.g. "en", "pt-BR").
    pub language_code: String,
    /// True for machine-generated (ASR) captions.
    pub is_generated: bool,
    /// Location of the track's timed entries.
    pub url: String,
}

/// A single timed caption entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

/// A selected and flattened transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    /// Entry texts joined by single spaces.
    pub text: String,
    /// "<Language> (<CODE>)".
    pub language_label: String,
    pub language_code: String,
    pub is_generated: bool,
    pub entry_count: usize,
}

/// Title and channel of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
}

/// Source of transcript tracks.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List every available track, in the provider's order.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>>;

    /// Fetch the ordered entries of one track.
    async fn fetch_entries(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptEntry>>;
}

/// Source of video metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn get_metadata(&self, video_id: &str) -> Result<VideoMetadata>;
}

/// Pick the first human-authored track, else the first track.
pub fn pick_track(tracks: &[TranscriptTrack]) -> Option<&TranscriptTrack> {
    tracks
        .iter()
        .find(|t| !t.is_generated)
        .or_else(|| tracks.first())
}

/// Join entry texts with single spaces, keeping their order.
pub fn flatten_entries(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a track's language as "English (EN)".
pub fn language_label(track: &TranscriptTrack) -> String {
    let name = if track.language.trim().is_empty() {
        language_name(&track.language_code)
            .map(str::to_string)
            .unwrap_or_else(|| track.language_code.clone())
    } else {
        track.language.clone()
    };
    format!("{} ({})", name, track.language_code.to_uppercase())
}

/// Select and flatten the transcript for a video.
///
/// Any provider failure is reported as `FetchFailed`.
#[instrument(skip(provider))]
pub async fn select_transcript(
    provider: &dyn TranscriptProvider,
    video_id: &str,
) -> Result<Transcript> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(TubetalkError::InvalidInput(
            "Couldn't extract a video ID".to_string(),
        ));
    }

    let tracks = provider.list_tracks(video_id).await.map_err(into_fetch_failed)?;
    debug!("Video {} has {} transcript tracks", video_id, tracks.len());

    let track = pick_track(&tracks).ok_or_else(|| {
        TubetalkError::FetchFailed(format!("No transcripts available for video {}", video_id))
    })?;

    info!(
        "Selected {} transcript in {}",
        if track.is_generated { "auto-generated" } else { "manual" },
        track.language_code
    );

    let entries = provider
        .fetch_entries(track)
        .await
        .map_err(into_fetch_failed)?;

    Ok(Transcript {
        video_id: video_id.to_string(),
        text: flatten_entries(&entries),
        language_label: language_label(track),
        language_code: track.language_code.clone(),
        is_generated: track.is_generated,
        entry_count: entries.len(),
    })
}

fn into_fetch_failed(e: TubetalkError) -> TubetalkError {
    match e {
        TubetalkError::FetchFailed(msg) => TubetalkError::FetchFailed(msg),
        other => TubetalkError::FetchFailed(other.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) fn track(code: &str, is_generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            language: language_name(code).unwrap_or("Unknown").to_string(),
            language_code: code.to_string(),
            is_generated,
            url: format!("mock://{}/{}", code, is_generated),
        }
    }

    /// In-memory transcript provider keyed by track URL.
    #[derive(Default)]
    pub(crate) struct MockTranscripts {
        pub tracks: Vec<TranscriptTrack>,
        pub entries: HashMap<String, Vec<&'static str>>,
        pub list_error: Option<String>,
        pub list_calls: AtomicUsize,
    }

    impl MockTranscripts {
        pub(crate) fn with_track(mut self, track: TranscriptTrack, texts: Vec<&'static str>) -> Self {
            self.entries.insert(track.url.clone(), texts);
            self.tracks.push(track);
            self
        }
    }

    #[async_trait]
    impl TranscriptProvider for MockTranscripts {
        async fn list_tracks(&self, _video_id: &str) -> Result<Vec<TranscriptTrack>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            match &self.list_error {
                Some(msg) => Err(TubetalkError::Config(msg.clone())),
                None => Ok(self.tracks.clone()),
            }
        }

        async fn fetch_entries(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptEntry>> {
            let texts = self.entries.get(&track.url).cloned().unwrap_or_default();
            Ok(texts
                .into_iter()
                .enumerate()
                .map(|(i, text)| TranscriptEntry {
                    text: text.to_string(),
                    start_seconds: i as f64,
                    duration_seconds: 1.0,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_manual_track_preferred_regardless_of_order() {
        let provider = MockTranscripts::default()
            .with_track(track("en", true), vec!["auto", "text"])
            .with_track(track("hi", true), vec!["auto", "hindi"])
            .with_track(track("es", false), vec!["hola", "mundo"]);

        let transcript = select_transcript(&provider, "abc123def45").await.unwrap();
        assert_eq!(transcript.text, "hola mundo");
        assert_eq!(transcript.language_label, "Spanish (ES)");
        assert!(!transcript.is_generated);
    }

    #[tokio::test]
    async fn test_first_manual_track_wins_over_later_manual() {
        let provider = MockTranscripts::default()
            .with_track(track("fr", false), vec!["bonjour"])
            .with_track(track("en", false), vec!["hello"]);

        let transcript = select_transcript(&provider, "abc123def45").await.unwrap();
        assert_eq!(transcript.text, "bonjour");
    }

    #[tokio::test]
    async fn test_only_generated_picks_first_in_order() {
        let provider = MockTranscripts::default()
            .with_track(track("de", true), vec!["erste"])
            .with_track(track("en", true), vec!["second"]);

        let transcript = select_transcript(&provider, "abc123def45").await.unwrap();
        assert_eq!(transcript.text, "erste");
        assert_eq!(transcript.language_label, "German (DE)");
        assert!(transcript.is_generated);
    }

    #[tokio::test]
    async fn test_flattening_keeps_order_and_duplicates() {
        let provider = MockTranscripts::default()
            .with_track(track("en", false), vec!["so", "so", "what,", "next?"]);

        let transcript = select_transcript(&provider, "abc123def45").await.unwrap();
        assert_eq!(transcript.text, "so so what, next?");
        assert_eq!(transcript.entry_count, 4);
    }

    #[tokio::test]
    async fn test_empty_video_id_skips_service() {
        let provider = MockTranscripts::default().with_track(track("en", false), vec!["x"]);

        let err = select_transcript(&provider, "").await.unwrap_err();
        assert!(matches!(err, TubetalkError::InvalidInput(_)));
        let err = select_transcript(&provider, "   ").await.unwrap_err();
        assert!(matches!(err, TubetalkError::InvalidInput(_)));
        assert_eq!(provider.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_fetch_failed() {
        let provider = MockTranscripts {
            list_error: Some("transcripts are disabled".to_string()),
            ..Default::default()
        };

        let err = select_transcript(&provider, "abc123def45").await.unwrap_err();
        match err {
            TubetalkError::FetchFailed(msg) => assert!(msg.contains("transcripts are disabled")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_tracks_is_fetch_failed() {
        let provider = MockTranscripts::default();

        let err = select_transcript(&provider, "abc123def45").await.unwrap_err();
        assert!(matches!(err, TubetalkError::FetchFailed(_)));
    }

    #[test]
    fn test_language_label_uppercases_code() {
        let t = TranscriptTrack {
            language: "Portuguese (Brazil)".to_string(),
            language_code: "pt-BR".to_string(),
            is_generated: false,
            url: String::new(),
        };
        assert_eq!(language_label(&t), "Portuguese (Brazil) (PT-BR)");
    }

    #[test]
    fn test_language_label_falls_back_to_table() {
        let t = TranscriptTrack {
            language: String::new(),
            language_code: "hi".to_string(),
            is_generated: true,
            url: String::new(),
        };
        assert_eq!(language_label(&t), "Hindi (HI)");
    }
}
