//! Tubetalk CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubetalk::cli::{commands, Cli, Commands};
use tubetalk::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so it can supply the default log level
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tubetalk={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let api_key = cli.api_key.as_deref();

    // Execute command
    match &cli.command {
        Commands::Analyze { url, model, json } => {
            commands::run_analyze(url, model.clone(), *json, api_key, settings).await?;
        }

        Commands::Transcript { url, output, format } => {
            commands::run_transcript(url, output.clone(), format, settings).await?;
        }

        Commands::Ask {
            url,
            question,
            model,
        } => {
            commands::run_ask(url, question, model.clone(), api_key, settings).await?;
        }

        Commands::Chat { url, model } => {
            commands::run_chat(url.clone(), model.clone(), api_key, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, api_key, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(config_path.as_deref(), api_key, &settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path.clone(), settings)?;
        }
    }

    Ok(())
}
