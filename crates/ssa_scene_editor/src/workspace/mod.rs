//! Workspace management for the scene editor
//!
//! A workspace is one JSON file holding script data tables, the list of map
//! backgrounds and every scene. It is the editor's scene loader and, through
//! `BackgroundLibrary`, its background provider.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use ssa_scene_core::{SceneFile, ScriptData};
use std::path::PathBuf;

use crate::services::{Background, BackgroundEntry, BackgroundProvider, SceneLoader};

/// A map background image referenced by the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSource {
    /// Map name, matched against `SceneFile::map_name`
    pub name: String,
    /// Image path, relative to the workspace file
    pub image: String,
}

/// The whole editable data set
#[derive(Debug, Clone, Default, Serialize, Deserialize, Resource)]
pub struct Workspace {
    #[serde(default)]
    pub version: u32,
    #[serde(skip)]
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub dirty: bool,
    #[serde(default)]
    pub script_data: ScriptData,
    #[serde(default)]
    pub backgrounds: Vec<BackgroundSource>,
    #[serde(default)]
    pub scenes: Vec<SceneFile>,
}

impl Workspace {
    /// Directory image paths are resolved against
    pub fn root_dir(&self) -> PathBuf {
        self.path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn scene(&self, file_name: &str) -> Option<&SceneFile> {
        self.scenes.iter().find(|s| s.file_name == file_name)
    }

    /// Map names in first-seen order
    pub fn map_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for scene in &self.scenes {
            if !names.contains(&scene.map_name) {
                names.push(scene.map_name.clone());
            }
        }
        names
    }

    /// Write an edited scene back, replacing the stored copy
    pub fn store_scene(&mut self, scene: SceneFile) -> Result<(), WorkspaceError> {
        let slot = self
            .scenes
            .iter_mut()
            .find(|s| s.file_name == scene.file_name)
            .ok_or_else(|| WorkspaceError::UnknownScene(scene.file_name.clone()))?;
        *slot = scene;
        self.dirty = true;
        Ok(())
    }

    /// Snapshot of the background list for the editor
    pub fn background_library(&self) -> BackgroundLibrary {
        BackgroundLibrary {
            root: self.root_dir(),
            sources: self.backgrounds.clone(),
        }
    }
}

impl SceneLoader for Workspace {
    fn load_scene(&self, file_name: &str) -> Result<SceneFile, WorkspaceError> {
        self.scene(file_name)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownScene(file_name.to_string()))
    }

    fn scenes_for_map(&self, map_name: &str) -> Vec<String> {
        self.scenes
            .iter()
            .filter(|s| s.map_name == map_name)
            .map(|s| s.file_name.clone())
            .collect()
    }
}

/// Decodes workspace backgrounds from disk
#[derive(Debug, Clone, Default)]
pub struct BackgroundLibrary {
    root: PathBuf,
    sources: Vec<BackgroundSource>,
}

impl BackgroundProvider for BackgroundLibrary {
    fn list_backgrounds(&self) -> Vec<BackgroundEntry> {
        self.sources
            .iter()
            .enumerate()
            .map(|(id, source)| BackgroundEntry {
                id,
                name: source.name.clone(),
            })
            .collect()
    }

    fn get_background(&self, map_id: usize) -> Result<Background, WorkspaceError> {
        let source = self
            .sources
            .get(map_id)
            .ok_or(WorkspaceError::UnknownBackground(map_id))?;
        let path = self.root.join(&source.image);
        bevy::log::debug!("Decoding background {} from {:?}", source.name, path);
        let image = image::open(&path)
            .map_err(|e| WorkspaceError::ImageError(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        Ok(Background::new(image))
    }
}
