//! Video metadata from YouTube's oEmbed endpoint.

use super::{watch_url, MetadataProvider, VideoMetadata};
use crate::config::YoutubeSettings;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// oEmbed metadata lookup. Needs no API key.
pub struct OembedMetadata {
    http: reqwest::Client,
}

impl OembedMetadata {
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;
        Ok(Self { http })
    }
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
    author_name: String,
}

#[async_trait]
impl MetadataProvider for OembedMetadata {
    #[instrument(skip(self))]
    async fn get_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let response: OembedResponse = self
            .http
            .get(OEMBED_URL)
            .query(&[("url", watch_url(video_id).as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(VideoMetadata {
            title: response.title,
            channel: response.author_name,
        })
    }
}
