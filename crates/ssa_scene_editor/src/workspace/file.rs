//! Workspace file save/load operations

use super::Workspace;
use std::path::Path;

#[derive(Debug)]
pub enum WorkspaceError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ImageError(String),
    UnknownScene(String),
    UnknownBackground(usize),
    NoPath,
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceError::IoError(e) => write!(f, "IO error: {}", e),
            WorkspaceError::ParseError(e) => write!(f, "Parse error: {}", e),
            WorkspaceError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            WorkspaceError::ImageError(e) => write!(f, "Image error: {}", e),
            WorkspaceError::UnknownScene(name) => write!(f, "Unknown scene: {}", name),
            WorkspaceError::UnknownBackground(id) => write!(f, "Unknown background: {}", id),
            WorkspaceError::NoPath => write!(f, "No file path set"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl Workspace {
    /// Load workspace from file
    pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let mut workspace: Workspace = serde_json::from_str(&content)
            .map_err(|e| WorkspaceError::ParseError(e.to_string()))?;

        workspace.path = Some(path.to_path_buf());
        workspace.dirty = false;

        bevy::log::info!(
            "Loaded workspace {:?}: {} scenes, {} backgrounds",
            path,
            workspace.scenes.len(),
            workspace.backgrounds.len()
        );
        Ok(workspace)
    }

    /// Save workspace to file
    pub fn save(&mut self, path: &Path) -> Result<(), WorkspaceError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| WorkspaceError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), WorkspaceError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(WorkspaceError::NoPath)
        }
    }
}
