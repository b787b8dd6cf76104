//! Game settings
//!
//! Settings data and JSON persistence in the platform config directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use protocol::Difficulty;
use serde::{Deserialize, Serialize};
use ttt_ai::llm::OllamaConfig;
use ttt_ai::AiConfig;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Tier used for new games
    pub difficulty: Difficulty,
    /// Dark terminal theme
    pub dark_mode: bool,
    /// Remote move deadline (seconds)
    pub ai_timeout_secs: u64,
    /// Reasoning service address
    pub llm_base_url: String,
    /// Reasoning service model
    pub llm_model: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        let llm = OllamaConfig::default();
        Self {
            difficulty: Difficulty::default(),
            dark_mode: false,
            ai_timeout_secs: AiConfig::default().remote_timeout_secs,
            llm_base_url: llm.base_url,
            llm_model: llm.model,
        }
    }
}

impl GameSettings {
    /// Settings file path
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("tictactoe");
            path.push("settings.json");
            path
        })
    }

    /// Load from `path`, defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No settings file, using default settings");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Invalid settings file: {}, using default settings", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file: {}, using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create config directory: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content).with_context(|| format!("Failed to write settings: {:?}", path))?;

        tracing::info!("Settings saved: {:?}", path);
        Ok(())
    }

    /// Service config: saved address and model, then environment overrides
    pub fn ollama_config(&self) -> OllamaConfig {
        self.ollama_config_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::ollama_config`] with overrides read from `lookup`
    pub fn ollama_config_with<F>(&self, lookup: F) -> OllamaConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        OllamaConfig {
            base_url: self.llm_base_url.clone(),
            model: self.llm_model.clone(),
            timeout_secs: self.ai_timeout_secs.max(1),
            ..OllamaConfig::default()
        }
        .with_overrides(lookup)
    }

    pub fn ai_config(&self) -> AiConfig {
        AiConfig {
            remote_timeout_secs: self.ai_timeout_secs,
            ..AiConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GameSettings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, GameSettings::default());
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(!settings.dark_mode);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = GameSettings {
            difficulty: Difficulty::Trained,
            dark_mode: true,
            ..GameSettings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(GameSettings::load_from(&path), settings);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(GameSettings::load_from(&path), GameSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"difficulty": "Hard"}"#).unwrap();

        let settings = GameSettings::load_from(&path);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.ai_timeout_secs, 8);
    }

    #[test]
    fn test_ollama_config_precedence() {
        let defaults = GameSettings::default().ollama_config_with(|_| None);
        assert_eq!(defaults.base_url, "http://localhost:11434");
        assert_eq!(defaults.model, "qwen2.5:7b");

        let saved = GameSettings {
            llm_base_url: "http://saved:11434".to_string(),
            llm_model: "llama3.2".to_string(),
            ai_timeout_secs: 6,
            ..GameSettings::default()
        };
        let config = saved.ollama_config_with(|_| None);
        assert_eq!(config.base_url, "http://saved:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.timeout_secs, 6);

        let config = saved.ollama_config_with(|name| match name {
            "TTT_LLM_MODEL" => Some("mistral".to_string()),
            "TTT_LLM_API_KEY" => Some(" ".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://saved:11434");
        assert_eq!(config.model, "mistral");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_ai_config_uses_timeout() {
        let settings = GameSettings {
            ai_timeout_secs: 5,
            ..GameSettings::default()
        };
        assert_eq!(settings.ai_config().remote_timeout_secs, 5);
        assert_eq!(settings.ai_config().max_attempts, 2);
    }
}
