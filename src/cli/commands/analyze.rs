//! Analyze command implementation.

use super::prepare_orchestrator;
use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the analyze command.
pub async fn run_analyze(
    url: &str,
    model: Option<String>,
    json: bool,
    api_key: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let mut orchestrator = prepare_orchestrator(&settings, api_key, model.as_deref())?;

    let spinner = Output::spinner("Fetching transcript and detecting video type...");
    let result = orchestrator.analyze(url).await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) if json => {
            println!("{}", serde_json::to_string_pretty(analysis)?);
        }
        Ok(analysis) => {
            Output::success("Video analyzed successfully!");
            Output::analysis(analysis);
            Output::kv("Preview", &content_preview(&analysis.transcript.text, 160));
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
