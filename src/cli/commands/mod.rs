//! CLI command implementations.

mod analyze;
mod ask;
mod chat;
mod config;
mod doctor;
mod serve;
mod transcript;

pub use analyze::run_analyze;
pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use serve::run_serve;
pub use transcript::run_transcript;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;

/// Run pre-flight checks and build an orchestrator for chat-capable commands.
fn prepare_orchestrator(
    settings: &Settings,
    api_key: Option<&str>,
    model: Option<&str>,
) -> anyhow::Result<Orchestrator> {
    if let Err(e) = preflight::check(Operation::Chat, settings, api_key) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubetalk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let api_key = settings.resolve_api_key(api_key)?;
    Ok(Orchestrator::new(settings, &api_key, model)?)
}
