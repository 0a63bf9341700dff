//! CLI output formatting utilities.

use crate::assistant::{display_label, ChatTurn, VideoAnalysis};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the result of analyzing a video.
    pub fn analysis(analysis: &VideoAnalysis) {
        match &analysis.metadata {
            Some(meta) => {
                Output::kv("Title", &meta.title);
                Output::kv("Channel", &meta.channel);
            }
            None => Output::kv("Video", &analysis.video_id),
        }
        Output::kv("Transcript language", &analysis.transcript.language_label);
        if analysis.transcript.is_generated {
            Output::kv("Captions", "auto-generated");
        }
        if let Some(video_type) = &analysis.video_type {
            Output::kv("Detected video type", &display_label(video_type));
        }
    }

    /// Print one chat turn.
    pub fn chat_turn(turn: &ChatTurn) {
        println!("{} {}", style("You:").green().bold(), turn.question);
        println!("{} {}\n", style("Bot:").cyan().bold(), turn.answer);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
pub(crate) fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
