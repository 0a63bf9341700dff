//! Video type detection, chat prompt assembly and session state.

mod classifier;
mod composer;
mod session;
mod video_type;

pub use classifier::{classification_prompt, classify_video_type};
pub use composer::{compose_prompt, truncate_chars, TRANSCRIPT_CHAR_LIMIT};
pub use session::{ChatTurn, Session, SessionPhase, VideoAnalysis};
pub use video_type::{display_label, VideoType};

#[cfg(test)]
pub(crate) use classifier::tests::ScriptedLlm;
