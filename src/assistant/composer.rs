//! Chat prompt assembly.

use super::ChatTurn;
use crate::config::ChatPrompts;

/// Transcripts are cut to this many characters before being embedded in a prompt.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 12_000;

/// First `max` characters of `text` (Unicode scalar values, not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Render the prompt for the next chat turn.
///
/// Layout: role line, instruction line, the transcript block, every prior turn
/// in order, then the new question with an open `Bot: ` for the model to
/// continue. Pure and deterministic.
pub fn compose_prompt(
    prompts: &ChatPrompts,
    transcript: &str,
    question: &str,
    video_type: &str,
    history: &[ChatTurn],
) -> String {
    let mut prompt = format!(
        "{}\n{}\n\nTranscript:\n{}\n\n",
        prompts.role_for(video_type),
        prompts.instruction,
        truncate_chars(transcript, TRANSCRIPT_CHAR_LIMIT)
    );

    for turn in history {
        prompt.push_str(&format!("User: {}\nBot: {}\n", turn.question, turn.answer));
    }
    prompt.push_str(&format!("User: {}\nBot: ", question));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(pairs: &[(&str, &str)]) -> Vec<ChatTurn> {
        pairs.iter().map(|(q, a)| ChatTurn::new(q, a)).collect()
    }

    #[test]
    fn test_single_turn_scenario() {
        let prompts = ChatPrompts::default();
        let prompt = compose_prompt(&prompts, "Hello world", "What is this about?", "educational", &[]);

        assert!(prompt.starts_with(&prompts.educational));
        assert!(prompt.contains("Transcript:\nHello world"));
        assert!(prompt.ends_with("User: What is this about?\nBot: "));
        assert_eq!(prompt.matches("User:").count(), 1);
    }

    #[test]
    fn test_history_rendered_in_order() {
        let prompts = ChatPrompts::default();
        let history = turns(&[("a", "b"), ("c", "d")]);
        let prompt = compose_prompt(&prompts, "t", "e", "news", &history);

        assert!(prompt.ends_with("User: a\nBot: b\nUser: c\nBot: d\nUser: e\nBot: "));
    }

    #[test]
    fn test_exact_layout() {
        let prompts = ChatPrompts {
            instruction: "INSTR".to_string(),
            general: "ROLE".to_string(),
            ..ChatPrompts::default()
        };
        let history = turns(&[("q1", "a1")]);
        let prompt = compose_prompt(&prompts, "text", "q2", "general", &history);

        assert_eq!(
            prompt,
            "ROLE\nINSTR\n\nTranscript:\ntext\n\nUser: q1\nBot: a1\nUser: q2\nBot: "
        );
    }

    #[test]
    fn test_unknown_type_uses_general_role() {
        let prompts = ChatPrompts::default();
        let sports = compose_prompt(&prompts, "t", "q", "sports", &[]);
        let general = compose_prompt(&prompts, "t", "q", "general", &[]);

        assert_eq!(sports, general);
        assert!(sports.starts_with(&prompts.general));
    }

    #[test]
    fn test_type_lookup_is_case_insensitive() {
        let prompts = ChatPrompts::default();
        let prompt = compose_prompt(&prompts, "t", "q", "Motivational", &[]);
        assert!(prompt.starts_with(&prompts.motivational));
    }

    #[test]
    fn test_deterministic() {
        let prompts = ChatPrompts::default();
        let history = turns(&[("a", "b")]);
        let first = compose_prompt(&prompts, "some transcript", "why?", "product", &history);
        let second = compose_prompt(&prompts, "some transcript", "why?", "product", &history);
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_transcript_truncated() {
        let prompts = ChatPrompts::default();
        let transcript = format!("{}{}", "x".repeat(TRANSCRIPT_CHAR_LIMIT), "TAIL");
        let prompt = compose_prompt(&prompts, &transcript, "q", "general", &[]);

        let expected_block = format!("Transcript:\n{}\n\n", "x".repeat(TRANSCRIPT_CHAR_LIMIT));
        assert!(prompt.contains(&expected_block));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("héllo", 5), "héllo");
        assert_eq!(truncate_chars("héllo", 50), "héllo");
        assert_eq!(truncate_chars("", 3), "");

        let cyrillic = "ж".repeat(TRANSCRIPT_CHAR_LIMIT + 10);
        assert_eq!(
            truncate_chars(&cyrillic, TRANSCRIPT_CHAR_LIMIT).chars().count(),
            TRANSCRIPT_CHAR_LIMIT
        );
    }
}
