//! Transcript provider backed by YouTube's innertube player API.
//!
//! The watch page carries the innertube API key; the player response lists
//! caption tracks; each track's entries come from the timed-text endpoint in
//! `json3` format.

use super::{watch_url, TranscriptEntry, TranscriptProvider, TranscriptTrack};
use crate::config::YoutubeSettings;
use crate::error::{Result, TubetalkError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";

/// Innertube-based transcript provider.
pub struct InnertubeTranscripts {
    http: reqwest::Client,
    settings: YoutubeSettings,
    api_key_regex: Regex,
}

impl InnertubeTranscripts {
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;

        let api_key_regex = Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
            .map_err(|e| TubetalkError::Config(e.to_string()))?;

        Ok(Self {
            http,
            settings: settings.clone(),
            api_key_regex,
        })
    }

    /// Fetch the watch page and pull out the innertube API key.
    async fn fetch_api_key(&self, video_id: &str) -> Result<String> {
        let html = self
            .http
            .get(watch_url(video_id))
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.settings.accept_language)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_api_key(&self.api_key_regex, &html)
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": self.settings.innertube_client_name,
                    "clientVersion": self.settings.innertube_client_version,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .http
            .post(PLAYER_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<PlayerResponse>().await?)
    }
}

#[async_trait]
impl TranscriptProvider for InnertubeTranscripts {
    #[instrument(skip(self))]
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>> {
        let api_key = self.fetch_api_key(video_id).await?;
        debug!("Found innertube API key");

        let player = self.fetch_player(video_id, &api_key).await?;
        tracks_from_player(video_id, player)
    }

    #[instrument(skip(self, track), fields(language = %track.language_code))]
    async fn fetch_entries(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptEntry>> {
        let url = timed_text_url(&track.url);
        let body: TimedText = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let entries = entries_from_timed_text(body);
        debug!("Fetched {} transcript entries", entries.len());
        Ok(entries)
    }
}

fn extract_api_key(re: &Regex, html: &str) -> Result<String> {
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    if html.contains("class=\"g-recaptcha\"") {
        return Err(TubetalkError::FetchFailed(
            "YouTube is blocking requests from this IP (captcha challenge)".to_string(),
        ));
    }
    if html.contains("action=\"https://consent.youtube.com/s\"") {
        return Err(TubetalkError::FetchFailed(
            "YouTube served a cookie consent page instead of the video".to_string(),
        ));
    }

    Err(TubetalkError::FetchFailed(
        "Could not find the innertube API key on the watch page".to_string(),
    ))
}

/// Request the `json3` format regardless of what the track URL asked for.
fn timed_text_url(base_url: &str) -> String {
    let cleaned = base_url.replace("&fmt=srv3", "");
    format!("{}&fmt=json3", cleaned)
}

fn tracks_from_player(video_id: &str, player: PlayerResponse) -> Result<Vec<TranscriptTrack>> {
    if let Some(status) = &player.playability_status {
        if status.status != "OK" {
            let reason = status
                .reason
                .clone()
                .unwrap_or_else(|| status.status.clone());
            return Err(TubetalkError::FetchFailed(format!(
                "Video {} is unavailable: {}",
                video_id, reason
            )));
        }
    }

    let caption_tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if caption_tracks.is_empty() {
        return Err(TubetalkError::FetchFailed(format!(
            "Transcripts are disabled for video {}",
            video_id
        )));
    }

    Ok(caption_tracks
        .into_iter()
        .map(|t| TranscriptTrack {
            language: t.name.map(CaptionName::into_text).unwrap_or_default(),
            language_code: t.language_code,
            is_generated: t.kind.as_deref() == Some("asr"),
            url: t.base_url,
        })
        .collect())
}

fn entries_from_timed_text(body: TimedText) -> Vec<TranscriptEntry> {
    body.events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            // Line-break events carry only whitespace
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptEntry {
                text,
                start_seconds: event.t_start_ms as f64 / 1000.0,
                duration_seconds: event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect()
}

// === Wire types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    name: Option<CaptionName>,
    language_code: String,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

impl CaptionName {
    fn into_text(self) -> String {
        match self.simple_text {
            Some(text) => text,
            None => self.runs.into_iter().map(|r| r.text).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    d_duration_ms: Option<u64>,
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}
