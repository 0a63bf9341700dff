//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(
    config_path: Option<&Path>,
    api_key: Option<&str>,
    settings: &Settings,
) -> anyhow::Result<()> {
    Output::header("Tubetalk Doctor");
    println!();
    println!("Checking configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_check = check_api_key(settings, api_key);
    api_check.print();
    checks.push(api_check);
    let model_check = CheckResult::ok(
        "Model",
        &format!("{} via {}", settings.llm.model, settings.llm.base_url),
    );
    model_check.print();
    checks.push(model_check);

    println!();

    println!("{}", style("Configuration").bold());
    let default_path = Settings::default_config_path();
    let config_check = check_config_file(config_path.unwrap_or(&default_path));
    config_check.print();
    checks.push(config_check);

    let prompts_check = check_prompts_dir(settings);
    prompts_check.print();
    checks.push(prompts_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Tubetalk.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Tubetalk is ready to use.");
    }

    Ok(())
}

/// Mask a credential, keeping only its edges.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check that an LLM API key can be resolved.
fn check_api_key(settings: &Settings, explicit: Option<&str>) -> CheckResult {
    match settings.resolve_api_key(explicit) {
        Ok(key) => CheckResult::ok("API key", &format!("configured ({})", mask_key(&key))),
        Err(_) => CheckResult::error(
            "API key",
            "not set",
            &format!(
                "Pass --api-key, set llm.api_key, or export {}='...'",
                settings.llm.api_key_env
            ),
        ),
    }
}

/// Check whether the config file exists.
fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubetalk config edit",
        )
    }
}

/// Check the custom prompts directory, if one is configured.
fn check_prompts_dir(settings: &Settings) -> CheckResult {
    let Some(dir) = &settings.prompts.custom_dir else {
        return CheckResult::ok("Prompts", "built-in templates");
    };

    let path = Settings::expand_path(dir);
    if path.is_dir() {
        CheckResult::ok("Prompts", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Prompts",
            &format!("{} (not found)", path.display()),
            "Built-in templates will be used",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("AIzaSyA1234567890abcd"), "AIza...abcd");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn test_explicit_api_key_passes() {
        let settings = Settings::default();
        let result = check_api_key(&settings, Some("AIzaSyA1234567890abcd"));
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("AIza...abcd"));
    }

    #[test]
    fn test_missing_api_key_is_error() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "TUBETALK_DOCTOR_TEST_UNSET_KEY".to_string();
        let result = check_api_key(&settings, None);
        assert_eq!(result.status, CheckStatus::Error);
    }

    #[test]
    fn test_prompts_dir() {
        let mut settings = Settings::default();
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Ok);

        let dir = TempDir::new().unwrap();
        settings.prompts.custom_dir = Some(dir.path().to_string_lossy().to_string());
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Ok);

        settings.prompts.custom_dir = Some(dir.path().join("missing").to_string_lossy().to_string());
        assert_eq!(check_prompts_dir(&settings).status, CheckStatus::Warning);
    }

    #[test]
    fn test_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "").unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Ok);
    }
}
