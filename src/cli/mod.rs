//! CLI module for Tubetalk.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tubetalk - chat with YouTube videos
///
/// Fetches a video's transcript, detects what kind of video it is, and answers
/// questions about it in a multi-turn conversation.
#[derive(Parser, Debug)]
#[command(name = "tubetalk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API key for the text completion service
    #[arg(long, global = true, env = "TUBETALK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a video's transcript and detect its video type
    Analyze {
        /// YouTube URL or video ID
        url: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the selected transcript of a video (no LLM needed)
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or video ID
        url: String,

        /// The question to ask
        question: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive chat about a video
    Chat {
        /// YouTube URL or video ID (prompted for when omitted)
        url: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_without_url() {
        let cli = Cli::try_parse_from(["tubetalk", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { url: None, model: None }));
    }

    #[test]
    fn test_parse_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tubetalk",
            "ask",
            "https://youtu.be/dQw4w9WgXcQ",
            "What is this about?",
            "-vv",
            "--api-key",
            "k",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        match cli.command {
            Commands::Ask { url, question, .. } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(question, "What is this about?");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
