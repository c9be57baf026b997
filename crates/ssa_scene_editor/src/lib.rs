//! ssa_scene_editor - Interactive editor for script scenes
//!
//! This crate provides a scene editor with:
//! - A zoomable canvas with drag-to-move entity placement on the 8 pixel grid
//! - Selection kept in sync between the canvas and the entity lists
//! - Per-entity editor popovers
//! - Sector (layer) visibility and solo toggles
//! - Workspace and session save/load
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use ssa_scene_editor::SceneEditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SceneEditorPlugin::new().with_workspace("workspace.json"))
//!         .run();
//! }
//! ```

pub mod canvas;
pub mod commands;
pub mod controller;
pub mod editors;
pub mod layers;
pub mod naming;
pub mod selection;
pub mod services;
pub mod session;
pub mod tools;
pub mod ui;
pub mod workspace;

pub use ssa_scene_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use commands::handle_keyboard_shortcuts;
use controller::{EditorServices, SceneEditor};
use services::{ModifiedScenes, NavigationQueue, OpenRequest, SceneLoader};
use session::EditorSession;
use ssa_scene_core::SceneType;
use ui::{EditorUiPlugin, PendingAction};
use workspace::{Workspace, WorkspaceError};

/// Configuration for initial editor state
///
/// Values left as `None` come from the saved session.
#[derive(Clone, Debug, Default)]
pub struct SceneEditorConfig {
    pub show_grid: Option<bool>,
    /// Initial canvas scale; a power of two
    pub initial_scale: Option<f64>,
    /// Scene file opened on startup. Default: the first scene of the workspace
    pub initial_scene: Option<String>,
}

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use ssa_scene_editor::SceneEditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         SceneEditorPlugin::new()
///             .with_workspace("data/workspace.json")
///             .with_initial_grid(true)
///             .with_initial_scale(2.0)
///             .with_initial_scene("SCRIPT/T01P01/m01a01.ssa")
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct SceneEditorPlugin {
    /// Workspace file loaded on startup
    pub workspace_path: Option<PathBuf>,
    pub initial_state: SceneEditorConfig,
}

impl SceneEditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(mut self, path: impl Into<PathBuf>) -> Self {
        self.workspace_path = Some(path.into());
        self
    }

    pub fn with_initial_grid(mut self, show: bool) -> Self {
        self.initial_state.show_grid = Some(show);
        self
    }

    /// Set the initial scale, rounded to a power of two between 1/8 and 16
    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        let exponent = scale.max(f64::MIN_POSITIVE).log2().round().clamp(-3.0, 4.0);
        self.initial_state.initial_scale = Some(2f64.powf(exponent));
        self
    }

    pub fn with_initial_scene(mut self, file_name: impl Into<String>) -> Self {
        self.initial_state.initial_scene = Some(file_name.into());
        self
    }

    fn load_workspace(&self, editor_state: &mut EditorState) -> Workspace {
        let Some(path) = &self.workspace_path else {
            bevy::log::info!("No workspace given, starting empty");
            return Workspace::default();
        };
        match Workspace::load(path) {
            Ok(workspace) => workspace,
            Err(e) => {
                bevy::log::error!("Failed to load workspace {:?}: {}", path, e);
                editor_state.error_message = Some(format!("Failed to load workspace: {}", e));
                Workspace::default()
            }
        }
    }
}

impl Plugin for SceneEditorPlugin {
    fn build(&self, app: &mut App) {
        let mut session = EditorSession::load();
        bevy::log::info!("Loaded editor session");

        // Plugin config takes precedence over the saved session
        if let Some(show) = self.initial_state.show_grid {
            session.show_grid = show;
        }
        if let Some(scale) = self.initial_state.initial_scale {
            session.scale_factor = scale;
        }

        let mut editor_state = EditorState {
            idle_session: session,
            ..Default::default()
        };
        let workspace = self.load_workspace(&mut editor_state);
        editor_state.pending_open_scene = self
            .initial_state
            .initial_scene
            .clone()
            .or_else(|| workspace.scenes.first().map(|s| s.file_name.clone()));

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .insert_resource(editor_state)
            .insert_resource(workspace)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(
                Update,
                (
                    handle_keyboard_shortcuts,
                    process_pending_actions,
                    process_navigation,
                )
                    .chain(),
            );
    }
}

fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    // Only spawn if no Camera2d exists
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Application-level editor state
#[derive(Resource, Default)]
pub struct EditorState {
    /// The open scene, if any
    pub editor: Option<SceneEditor>,
    /// Session held while no scene is open
    idle_session: EditorSession,
    pub pending_action: Option<PendingAction>,
    pub error_message: Option<String>,
    /// Background shown in the background view window
    pub background_view: Option<usize>,
    /// Scenes changed since the last save
    pub modified: ModifiedScenes,
    pub navigation: NavigationQueue,
    /// Scene to open on the next update
    pub pending_open_scene: Option<String>,
}

impl EditorState {
    pub fn session(&self) -> &EditorSession {
        match &self.editor {
            Some(editor) => editor.session(),
            None => &self.idle_session,
        }
    }

    /// Open `file_name` from the workspace, storing the current scene back first
    pub fn open_scene(
        &mut self,
        workspace: &mut Workspace,
        file_name: &str,
    ) -> Result<(), WorkspaceError> {
        if workspace.scene(file_name).is_none() {
            return Err(WorkspaceError::UnknownScene(file_name.to_string()));
        }
        self.close_scene(workspace)?;

        let file = workspace.load_scene(file_name)?;
        let scenes = workspace.scenes_for_map(&file.map_name);
        let services = EditorServices {
            backgrounds: Box::new(workspace.background_library()),
            modifications: Box::new(self.modified.clone()),
            navigation: Box::new(self.navigation.clone()),
        };
        // Infallible from here on: the session moves into the editor
        let session = std::mem::take(&mut self.idle_session);
        let mut editor = SceneEditor::new(
            file,
            scenes,
            workspace.script_data.clone(),
            session,
            services,
        );
        if let Some(e) = editor.take_background_error() {
            self.error_message = Some(format!("Could not load map background: {}", e));
        }
        self.editor = Some(editor);
        Ok(())
    }

    /// Close the open scene, writing its edits into the workspace
    pub fn close_scene(&mut self, workspace: &mut Workspace) -> Result<(), WorkspaceError> {
        self.store_open_scene(workspace)?;
        if let Some(editor) = self.editor.take() {
            self.idle_session = editor.into_session();
        }
        Ok(())
    }

    /// Write the open scene into the workspace if it was changed
    pub fn store_open_scene(&self, workspace: &mut Workspace) -> Result<(), WorkspaceError> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };
        if self.modified.contains(&editor.file().file_name) {
            workspace.store_scene(editor.file().clone())?;
        }
        Ok(())
    }

    fn save_session(&self) {
        if let Err(e) = self.session().save() {
            bevy::log::warn!("Failed to save editor session: {}", e);
        }
    }
}

/// Handle toolbar and keyboard actions
fn process_pending_actions(
    mut editor_state: ResMut<EditorState>,
    mut workspace: ResMut<Workspace>,
) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };
    match action {
        PendingAction::Save => {
            if let Err(e) = editor_state.store_open_scene(&mut workspace) {
                editor_state.error_message = Some(format!("Failed to save: {}", e));
                return;
            }
            if workspace.path.is_some() {
                match workspace.save_current() {
                    Ok(()) => {
                        let saved = editor_state.modified.take();
                        bevy::log::info!("Saved workspace ({} changed scenes)", saved.len());
                    }
                    Err(e) => {
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                }
            } else {
                editor_state.pending_action = Some(PendingAction::SaveAs);
            }
            editor_state.save_session();
        }
        PendingAction::SaveAs => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Scene Workspace", &["json"])
                    .save_file()
                {
                    match workspace.save(&path) {
                        Ok(()) => {
                            editor_state.modified.take();
                        }
                        Err(e) => {
                            editor_state.error_message = Some(format!("Failed to save: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::OpenWorkspace => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Scene Workspace", &["json"])
                    .pick_file()
                {
                    match Workspace::load(&path) {
                        Ok(loaded) => {
                            if !editor_state.modified.is_empty() {
                                bevy::log::warn!("Discarding unsaved scene changes");
                            }
                            if let Some(editor) = editor_state.editor.take() {
                                editor_state.idle_session = editor.into_session();
                            }
                            editor_state.modified.take();
                            editor_state.background_view = None;
                            editor_state.pending_open_scene =
                                loaded.scenes.first().map(|s| s.file_name.clone());
                            *workspace = loaded;
                        }
                        Err(e) => {
                            editor_state.error_message =
                                Some(format!("Failed to load workspace: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::ZoomIn => {
            if let Some(editor) = editor_state.editor.as_mut() {
                editor.zoom_in();
                editor_state.save_session();
            }
        }
        PendingAction::ZoomOut => {
            if let Some(editor) = editor_state.editor.as_mut() {
                editor.zoom_out();
                editor_state.save_session();
            }
        }
        PendingAction::ToggleGrid => {
            if let Some(editor) = editor_state.editor.as_mut() {
                let show = !editor.show_grid();
                editor.set_grid(show);
                editor_state.save_session();
            }
        }
        PendingAction::ClosePopover => {
            if let Some(editor) = editor_state.editor.as_mut() {
                editor.cancel_pointer();
                editor.close_editor();
            }
        }
    }
}

/// Act on views the open scene asked for
fn process_navigation(mut editor_state: ResMut<EditorState>, mut workspace: ResMut<Workspace>) {
    for request in editor_state.navigation.drain() {
        bevy::log::debug!("Navigation request {:?}", request);
        match request {
            OpenRequest::MapBackground(id) => editor_state.background_view = Some(id),
            OpenRequest::SceneSsa { file_name, .. } | OpenRequest::SceneSss { file_name, .. } => {
                editor_state.pending_open_scene = Some(file_name);
            }
            OpenRequest::SceneSse { map_name } => {
                let enter_scene = workspace
                    .scenes_for_map(&map_name)
                    .into_iter()
                    .find(|f| SceneType::from_file_name(f) == Some(SceneType::Sse));
                match enter_scene {
                    Some(file_name) => editor_state.pending_open_scene = Some(file_name),
                    None => bevy::log::warn!("Map {} has no enter scene", map_name),
                }
            }
        }
    }

    let Some(file_name) = editor_state.pending_open_scene.take() else {
        return;
    };
    if let Err(e) = editor_state.open_scene(&mut workspace, &file_name) {
        bevy::log::error!("Failed to open scene {}: {}", file_name, e);
        editor_state.error_message = Some(format!("Failed to open scene: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ModificationSink;
    use crate::workspace::BackgroundSource;
    use ssa_scene_core::{Actor, Layer, Scene, SceneFile, ScenePosition};

    fn scene_file(map: &str, name: &str) -> SceneFile {
        let mut layer = Layer::new();
        layer.actors.push(Actor::new(1, ScenePosition::new(2, 2)));
        SceneFile {
            map_name: map.to_string(),
            file_name: name.to_string(),
            scene_type: SceneType::from_file_name(name).unwrap_or_default(),
            scripts: Vec::new(),
            scene: Scene::new(vec![layer]),
        }
    }

    fn workspace() -> Workspace {
        Workspace {
            scenes: vec![
                scene_file("T01P01", "SCRIPT/T01P01/m01a01.ssa"),
                scene_file("T01P01", "SCRIPT/T01P01/enter.sse"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_open_unknown_scene_keeps_current() {
        let mut ws = workspace();
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        assert!(state.open_scene(&mut ws, "missing.ssa").is_err());
        assert_eq!(
            state.editor.as_ref().map(|e| e.file().file_name.as_str()),
            Some("SCRIPT/T01P01/m01a01.ssa")
        );
    }

    #[test]
    fn test_session_carries_between_scenes() {
        let mut ws = workspace();
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        if let Some(editor) = state.editor.as_mut() {
            editor.zoom_in();
        }
        state.open_scene(&mut ws, "SCRIPT/T01P01/enter.sse").unwrap();
        assert_eq!(state.session().scale_factor, 2.0);
        assert_eq!(
            state.editor.as_ref().map(|e| e.scenes().len()),
            Some(2)
        );
    }

    #[test]
    fn test_modified_scene_is_stored_on_close() {
        let mut ws = workspace();
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        if let Some(editor) = state.editor.as_mut() {
            editor.file.scene.layers[0].actors[0].kind = 7;
        }
        state
            .modified
            .mark_modified("T01P01", SceneType::Ssa, "SCRIPT/T01P01/m01a01.ssa");
        state.close_scene(&mut ws).unwrap();

        assert!(state.editor.is_none());
        assert!(ws.dirty);
        let stored = ws.scene("SCRIPT/T01P01/m01a01.ssa").unwrap();
        assert_eq!(stored.scene.layers[0].actors[0].kind, 7);
    }

    #[test]
    fn test_unmodified_scene_leaves_workspace_clean() {
        let mut ws = workspace();
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        state.close_scene(&mut ws).unwrap();
        assert!(!ws.dirty);
    }

    #[test]
    fn test_failed_open_keeps_session() {
        let mut ws = workspace();
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        if let Some(editor) = state.editor.as_mut() {
            editor.zoom_in();
        }
        state.close_scene(&mut ws).unwrap();
        assert!(state.open_scene(&mut ws, "missing.ssa").is_err());
        assert!(state.editor.is_none());
        assert_eq!(state.session().scale_factor, 2.0);
    }

    #[test]
    fn test_unreadable_background_sets_error_message() {
        let mut ws = workspace();
        ws.backgrounds.push(BackgroundSource {
            name: "T01P01".to_string(),
            image: "no_such_background.png".to_string(),
        });
        let mut state = EditorState::default();
        state.open_scene(&mut ws, "SCRIPT/T01P01/m01a01.ssa").unwrap();
        assert!(state.editor.is_some());
        assert!(state
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Could not load map background")));
    }

    #[test]
    fn test_initial_scale_rounds_to_power_of_two() {
        let plugin = SceneEditorPlugin::new().with_initial_scale(3.0);
        assert_eq!(plugin.initial_state.initial_scale, Some(4.0));
        let plugin = SceneEditorPlugin::new().with_initial_scale(100.0);
        assert_eq!(plugin.initial_state.initial_scale, Some(16.0));
    }
}
