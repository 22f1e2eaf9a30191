use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Small user preferences persisted between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    /// Plan file opened in the previous session.
    pub last_plan: Option<PathBuf>,
    /// Board scale from the previous session.
    pub minutes_per_cell: Option<u32>,
}

/// Platform config directory for the app, if resolvable.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rental-planner").map(|dirs| dirs.config_dir().to_path_buf())
}

fn prefs_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("prefs.json"))
}

impl Prefs {
    /// Load preferences, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = prefs_path() else {
            return Self::default();
        };
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = prefs_path().ok_or_else(|| "No config directory available".to_string())?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
