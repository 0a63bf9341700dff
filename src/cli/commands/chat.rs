//! Interactive chat command.

use super::prepare_orchestrator;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use console::style;
use std::io::{self, BufRead, Write};

/// What the user typed at the prompt.
#[derive(Debug, PartialEq)]
enum ChatInput<'a> {
    Empty,
    Exit,
    History,
    Video(&'a str),
    Question(&'a str),
}

fn parse_input(line: &str) -> ChatInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }
    if ["exit", "quit", "bye"].iter().any(|w| line.eq_ignore_ascii_case(w)) {
        return ChatInput::Exit;
    }
    if line.eq_ignore_ascii_case("/history") {
        return ChatInput::History;
    }
    if let Some(url) = line.strip_prefix("/video") {
        return ChatInput::Video(url.trim());
    }
    ChatInput::Question(line)
}

/// Run the interactive chat command.
pub async fn run_chat(
    url: Option<String>,
    model: Option<String>,
    api_key: Option<&str>,
    settings: Settings,
) -> anyhow::Result<()> {
    let mut orchestrator = prepare_orchestrator(&settings, api_key, model.as_deref())?;

    println!("\n{}", style("Tubetalk Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask questions about the video, '/video <url>' to switch videos, '/history' to review, 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match url {
        Some(url) => {
            analyze(&mut orchestrator, &url).await;
        }
        None => loop {
            print!("{} ", style("YouTube URL:").green().bold());
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }
            if analyze(&mut orchestrator, line.trim()).await {
                break;
            }
        },
    }

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ChatInput::History => {
                let history = orchestrator.session().history();
                if history.is_empty() {
                    Output::info("No questions asked yet.");
                }
                println!();
                for turn in history {
                    Output::chat_turn(turn);
                }
            }
            ChatInput::Video(url) => {
                analyze(&mut orchestrator, url).await;
            }
            ChatInput::Question(question) => {
                let spinner = Output::spinner("Thinking...");
                let result = orchestrator.ask(question).await;
                spinner.finish_and_clear();

                match result {
                    Ok(turn) => println!("\n{} {}\n", style("Bot:").cyan().bold(), turn.answer),
                    Err(e) => Output::error(&format!("{}", e)),
                }
            }
        }
    }

    Ok(())
}

/// Analyze a video and print the outcome. Returns whether it succeeded.
async fn analyze(orchestrator: &mut Orchestrator, url: &str) -> bool {
    let spinner = Output::spinner("Fetching transcript and detecting video type...");
    let result = orchestrator.analyze(url).await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) => {
            Output::success("Video analyzed successfully!");
            Output::analysis(analysis);
            println!();
            Output::info("How can I help you today?");
            true
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            false
        }
    }
}
