//! Fallback language names for tracks that arrive without one.

/// Look up a display name for a language code. Region suffixes are ignored.
pub fn language_name(code: &str) -> Option<&'static str> {
    let base = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();

    let name = match base.as_str() {
        "en" => "English",
        "hi" => "Hindi",
        "mr" => "Marathi",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "ru" => "Russian",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "pt" => "Portuguese",
        "bn" => "Bengali",
        _ => return None,
    };
    Some(name)
}
