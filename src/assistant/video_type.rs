//! Video content categories.

use serde::{Deserialize, Serialize};

/// The closed set of categories used to pick a chat persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Educational,
    Motivational,
    News,
    Product,
    #[default]
    General,
}

impl VideoType {
    pub const ALL: [VideoType; 5] = [
        VideoType::Educational,
        VideoType::Motivational,
        VideoType::News,
        VideoType::Product,
        VideoType::General,
    ];

    /// Match a key case-insensitively. No trimming and no partial matches.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(key))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoType::Educational => "educational",
            VideoType::Motivational => "motivational",
            VideoType::News => "news",
            VideoType::Product => "product",
            VideoType::General => "general",
        }
    }
}

impl std::fmt::Display for VideoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capitalize a raw category key for display ("news" -> "News").
pub fn display_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
