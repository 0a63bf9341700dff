//! Transcript command: selection only, no LLM.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{extract_video_id, select_transcript, InnertubeTranscripts};
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript, &settings, None)?;

    let rendered_as_json = match format.to_lowercase().as_str() {
        "text" | "txt" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: {}. Use text or json.", other),
    };

    let video_id = extract_video_id(url)?;
    let provider = InnertubeTranscripts::new(&settings.youtube)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = select_transcript(&provider, &video_id).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let content = if rendered_as_json {
        serde_json::to_string_pretty(&transcript)?
    } else {
        transcript.text.clone()
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            Output::success(&format!(
                "Wrote {} transcript to {}",
                transcript.language_label, path
            ));
        }
        None => println!("{}", content),
    }

    Ok(())
}
