use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::AskError;
use crate::subject::Subject;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub pdf: PdfConfig,
    pub terminal: TerminalConfig,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub key_env: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            key_env: "GEMINI_API_KEY".to_string(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub paper: String,
    pub page_numbers: bool,
    /// Print the subject and question above the answer.
    pub title: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            page_numbers: true,
            title: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub width: u16,
    pub color: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            width: 100,
            color: true,
        }
    }
}

impl Config {
    /// The configuration bundled into the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("bundled default_config.toml is valid")
    }

    /// Load config from a TOML file, or return the bundled defaults if it
    /// does not exist. A file without `[[subjects]]` keeps the bundled catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse config text, falling back to the bundled catalog.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        if config.subjects.is_empty() {
            config.subjects = Self::compiled_default().subjects;
        }
        Ok(config)
    }

    pub fn subject(&self, id: u32) -> Result<&Subject, AskError> {
        self.subjects
            .iter()
            .find(|subject| subject.id == id)
            .ok_or(AskError::UnknownSubject(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_has_the_catalog() {
        let config = Config::compiled_default();
        assert_eq!(config.subjects.len(), 9);
        assert_eq!(config.api.key_env, "GEMINI_API_KEY");
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.pdf.paper, "a4");
        assert_eq!(config.terminal.width, 100);
        assert_eq!(
            config.subject(3).map(|s| s.category.as_str()).ok(),
            Some("Accounting")
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("[terminal]\ncolor = false\n").unwrap();
        assert!(!config.terminal.color);
        assert_eq!(config.terminal.width, 100);
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.subjects.len(), 9);
    }

    #[test]
    fn custom_catalog_replaces_the_default() {
        let config = Config::from_toml(
            "[[subjects]]\nid = 42\ntitle = \"Taxation\"\ncategory = \"Law\"\ninstructions = \"Cite sections.\"\n",
        )
        .unwrap();
        assert_eq!(config.subjects.len(), 1);
        assert_eq!(config.subject(42).unwrap().title, "Taxation");
        assert!(matches!(config.subject(1), Err(AskError::UnknownSubject(1))));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[api\nmodel = 1").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::load(Path::new("does/not/exist/studydesk.toml")).unwrap();
        assert_eq!(config.subjects.len(), 9);
    }
}
