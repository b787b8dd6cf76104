//! Local score storage
//!
//! Win/loss/draw counters persisted as JSON in the platform data directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use protocol::{GameOutcome, HUMAN_MARK};
use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;

/// Running totals across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBoard {
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub games_played: u32,
    /// End of the most recent finished game
    pub last_played: Option<DateTime<Utc>>,
}

impl ScoreBoard {
    /// Count a finished game. Returns false for `InProgress`.
    pub fn record(&mut self, outcome: &GameOutcome) -> bool {
        match outcome {
            GameOutcome::InProgress => return false,
            GameOutcome::Win { mark, .. } if *mark == HUMAN_MARK => self.player_wins += 1,
            GameOutcome::Win { .. } => self.ai_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.games_played += 1;
        self.last_played = Some(Utc::now());
        true
    }

    pub fn formatted_last_played(&self) -> Option<String> {
        self.last_played
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// Where settings and scores live on disk
pub struct StorageManager {
    settings_path: Option<PathBuf>,
    scores_path: Option<PathBuf>,
}

impl StorageManager {
    /// Platform config and data directories
    pub fn new() -> Self {
        let scores_path = get_data_directory()
            .map_err(|e| tracing::warn!("{:#}, scores will not be saved", e))
            .ok()
            .map(|dir| dir.join("scores.json"));

        Self {
            settings_path: GameSettings::settings_path(),
            scores_path,
        }
    }

    /// Both files under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings_path: Some(dir.join("settings.json")),
            scores_path: Some(dir.join("scores.json")),
        }
    }

    /// Nothing is read or written
    pub fn in_memory() -> Self {
        Self {
            settings_path: None,
            scores_path: None,
        }
    }

    pub fn load_settings(&self) -> GameSettings {
        match &self.settings_path {
            Some(path) => GameSettings::load_from(path),
            None => GameSettings::default(),
        }
    }

    /// Failures are logged, never returned
    pub fn save_settings(&self, settings: &GameSettings) {
        if let Some(path) = &self.settings_path {
            if let Err(e) = settings.save_to(path) {
                tracing::warn!("Settings not saved: {:#}", e);
            }
        }
    }

    pub fn load_scores(&self) -> ScoreBoard {
        let Some(path) = &self.scores_path else {
            return ScoreBoard::default();
        };

        match load_scores_from(path) {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!("{:#}, starting from zero", e);
                ScoreBoard::default()
            }
        }
    }

    /// Failures are logged, never returned
    pub fn save_scores(&self, scores: &ScoreBoard) {
        if let Some(path) = &self.scores_path {
            if let Err(e) = save_scores_to(path, scores) {
                tracing::warn!("Scores not saved: {:#}", e);
            }
        }
    }

    pub fn scores_path(&self) -> Option<&Path> {
        self.scores_path.as_deref()
    }
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_scores_from(path: &Path) -> Result<ScoreBoard> {
    if !path.exists() {
        return Ok(ScoreBoard::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read scores: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid scores file: {:?}", path))
}

fn save_scores_to(path: &Path, scores: &ScoreBoard) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Cannot create data directory: {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(scores).context("Failed to serialize scores")?;
    fs::write(path, content).with_context(|| format!("Failed to write scores: {:?}", path))?;

    tracing::debug!("Scores saved: {:?}", path);
    Ok(())
}

/// Cross-platform data directory
fn get_data_directory() -> Result<PathBuf> {
    let app_data_dir = dirs::data_dir().context("No application data directory")?;

    Ok(app_data_dir.join("tictactoe"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Difficulty, Mark};

    fn win(mark: Mark) -> GameOutcome {
        GameOutcome::Win { mark, line: [0, 1, 2] }
    }

    #[test]
    fn test_record_outcomes() {
        let mut scores = ScoreBoard::default();
        assert!(scores.record(&win(Mark::X)));
        assert!(scores.record(&win(Mark::O)));
        assert!(scores.record(&win(Mark::O)));
        assert!(scores.record(&GameOutcome::Draw));
        assert!(!scores.record(&GameOutcome::InProgress));

        assert_eq!(scores.player_wins, 1);
        assert_eq!(scores.ai_wins, 2);
        assert_eq!(scores.draws, 1);
        assert_eq!(scores.games_played, 4);
        assert!(scores.last_played.is_some());
    }

    #[test]
    fn test_scores_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());

        let mut scores = ScoreBoard::default();
        scores.record(&GameOutcome::Draw);
        storage.save_scores(&scores);

        assert_eq!(storage.load_scores(), scores);
    }

    #[test]
    fn test_corrupt_scores_give_zero() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        fs::write(dir.path().join("scores.json"), "[1, 2").unwrap();

        assert_eq!(storage.load_scores(), ScoreBoard::default());
    }

    #[test]
    fn test_settings_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        let settings = GameSettings {
            difficulty: Difficulty::Easy,
            ..GameSettings::default()
        };
        storage.save_settings(&settings);

        assert_eq!(storage.load_settings(), settings);
    }

    #[test]
    fn test_in_memory_writes_nothing() {
        let storage = StorageManager::in_memory();
        let mut scores = ScoreBoard::default();
        scores.record(&win(Mark::X));
        storage.save_scores(&scores);

        assert_eq!(storage.load_scores(), ScoreBoard::default());
        assert!(storage.scores_path().is_none());
    }
}
