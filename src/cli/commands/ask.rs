//! Ask command implementation.

use super::prepare_orchestrator;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: analyze the video, then answer one question.
pub async fn run_ask(
    url: &str,
    question: &str,
    model: Option<String>,
    api_key: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let mut orchestrator = prepare_orchestrator(&settings, api_key, model.as_deref())?;

    let spinner = Output::spinner("Fetching transcript...");
    if let Err(e) = orchestrator.analyze(url).await {
        spinner.finish_and_clear();
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    spinner.set_message("Thinking...");
    match orchestrator.ask(question).await {
        Ok(turn) => {
            spinner.finish_and_clear();
            println!("\n{}\n", turn.answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
