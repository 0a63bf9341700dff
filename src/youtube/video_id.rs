//! Video ID extraction from user input.

use crate::error::{Result, TubetalkError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn bare_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid regex"))
}

/// Extract a video ID from a YouTube URL or a bare 11-character ID.
///
/// The `v` query parameter wins; otherwise the last path segment is used
/// (`youtu.be/<id>`, `/shorts/<id>`, `/embed/<id>`). Beyond being present,
/// the ID is not validated.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TubetalkError::InvalidInput("No YouTube URL given".to_string()));
    }

    if bare_id_regex().is_match(input) {
        return Ok(input.to_string());
    }

    let parsed = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .map_err(|e| TubetalkError::InvalidInput(format!("Invalid YouTube URL {}: {}", input, e)))?;

    if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
        let v = v.trim();
        if !v.is_empty() {
            return Ok(v.to_string());
        }
    }

    parsed
        .path_segments()
        .and_then(|segs| segs.filter(|s| !s.trim().is_empty()).last())
        .filter(|seg| *seg != "watch")
        .map(|seg| seg.trim().to_string())
        .ok_or_else(|| {
            TubetalkError::InvalidInput(format!(
                "Invalid YouTube URL. Couldn't extract video ID from {}",
                input
            ))
        })
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
