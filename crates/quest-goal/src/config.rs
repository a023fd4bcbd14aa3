//! Quest configuration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration from quest.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestConfig {
    /// Who the goals belong to
    #[serde(default)]
    pub user: UserConfig,

    /// Point values used when a goal is added without explicit points
    #[serde(default)]
    pub points: PointsConfig,

    /// Where progress and the event journal are kept
    #[serde(default)]
    pub storage: StorageConfig,
}

/// User identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserConfig {
    #[serde(default = "default_user_name")]
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
        }
    }
}

/// Default point values per goal kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointsConfig {
    /// Award for a simple goal
    #[serde(default = "default_simple_points")]
    pub simple: i64,

    /// Starting points for an eternal goal
    #[serde(default = "default_eternal_points")]
    pub eternal: i64,

    /// Starting points for a checklist goal
    #[serde(default = "default_checklist_points")]
    pub checklist: i64,

    /// Bonus paid when a checklist reaches its target
    #[serde(default = "default_checklist_bonus")]
    pub checklist_bonus: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            simple: default_simple_points(),
            eternal: default_eternal_points(),
            checklist: default_checklist_points(),
            checklist_bonus: default_checklist_bonus(),
        }
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Progress file (relative paths resolve against the working directory)
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,

    /// Optional JSONL journal of progress events
    pub journal_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            progress_file: default_progress_file(),
            journal_file: None,
        }
    }
}

// Serde default functions
fn default_user_name() -> String {
    "Hero".to_string()
}

fn default_simple_points() -> i64 {
    1000
}

fn default_eternal_points() -> i64 {
    100
}

fn default_checklist_points() -> i64 {
    50
}

fn default_checklist_bonus() -> i64 {
    500
}

fn default_progress_file() -> PathBuf {
    PathBuf::from("user_goals.json")
}

impl QuestConfig {
    /// Load config from a quest.toml file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load config, returning default if the file doesn't exist or can't be parsed
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable config: {}", e);
                Self::default()
            }
        }
    }
}
