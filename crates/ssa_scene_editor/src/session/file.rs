//! Session file save/load operations

use super::EditorSession;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

#[derive(Debug)]
pub enum PreferencesError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::IoError(e) => write!(f, "IO error: {}", e),
            PreferencesError::ParseError(e) => write!(f, "Parse error: {}", e),
            PreferencesError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorSession {
    /// Config directory of the scene editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "ssa_scene_editor", "ssa_scene_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn session_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(SESSION_FILE))
    }

    /// Load the session, falling back to defaults on any error
    pub fn load() -> Self {
        let result = Self::session_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from_path(&path));
        match result {
            Ok(session) => session,
            Err(e) => {
                bevy::log::warn!("Could not load editor session: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit file; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| PreferencesError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| PreferencesError::ParseError(e.to_string()))
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::session_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| PreferencesError::IoError(e.to_string()))?;

        bevy::log::info!("Saved editor session to {:?}", path);
        Ok(())
    }
}
