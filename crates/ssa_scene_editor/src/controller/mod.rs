//! The scene editor controller
//!
//! `SceneEditor` owns one open scene and everything shown about it: canvas
//! state, list views, the open editor popover and per-sector visibility. UI
//! code feeds it pointer and widget events and reads the results back; it
//! never mutates the scene directly.

use std::collections::BTreeMap;

use ssa_scene_core::{EntityKind, EntityRef, Scene, SceneFile, ScenePosition, ScriptData};

use crate::canvas::{hit_test, to_logical, zoom_in, zoom_out, CanvasPixel, SIZE_REQUEST_NONE};
use crate::editors::{apply_edit, Choice, EditorChoices, EntityEdit, Popover};
use crate::layers::LayerVisibility;
use crate::naming::ScriptNames;
use crate::selection::{
    build_entity_lists, build_layer_list, entity_columns, EntityListView, LayerListView,
    SelectionOrigin,
};
use crate::services::{
    Background, BackgroundProvider, ModificationSink, NavigationRequester, OpenRequest,
};
use crate::session::EditorSession;
use crate::tools::{DragController, ReleaseOutcome};
use crate::workspace::WorkspaceError;


/// Collaborators a scene editor needs while open
pub struct EditorServices {
    pub backgrounds: Box<dyn BackgroundProvider>,
    pub modifications: Box<dyn ModificationSink>,
    pub navigation: Box<dyn NavigationRequester>,
}

/// Notifications for the views, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Redraw,
    EditorClosed,
    EditorOpened(EntityRef),
    LayerHighlighted(Option<usize>),
    ListRowSelected { kind: EntityKind, row: Option<usize> },
    ListRowUpdated { kind: EntityKind, row: usize },
    CanvasSelection(Option<EntityRef>),
    SelectionCommitted(Option<EntityRef>),
}

/// Editing state of one open scene
pub struct SceneEditor {
    pub(crate) file: SceneFile,
    pub(crate) script_data: ScriptData,
    pub(crate) session: EditorSession,
    pub(crate) visibility: LayerVisibility,
    pub(crate) drag: DragController,
    pub(crate) selection: Option<EntityRef>,
    pub(crate) canvas_selection: Option<EntityRef>,
    pub(crate) highlighted_sector: Option<usize>,
    pub(crate) lists: BTreeMap<EntityKind, EntityListView>,
    pub(crate) layer_list: LayerListView,
    pub(crate) popover: Option<Popover>,
    pub(crate) choices: EditorChoices,
    pub(crate) scenes: Vec<String>,
    pub(crate) background_choices: Vec<Choice<Option<usize>>>,
    pub(crate) background_choice: Option<usize>,
    pub(crate) background: Option<Background>,
    pub(crate) events: Vec<ViewEvent>,
    background_error: Option<WorkspaceError>,
    services: EditorServices,
}

impl SceneEditor {
    pub fn new(
        file: SceneFile,
        scenes: Vec<String>,
        script_data: ScriptData,
        session: EditorSession,
        services: EditorServices,
    ) -> Self {
        let visibility = LayerVisibility::new(file.scene.layers.len());
        let names = ScriptNames::new(&file, &script_data);
        let lists = build_entity_lists(&names, &file.scene);
        let choices = EditorChoices::build(&names, &script_data, file.scene.layers.len());
        let layer_list = build_layer_list(&file.scene, &visibility);

        let mut background_choices = vec![Choice::new(None, "None")];
        let mut default_background = None;
        for entry in services.backgrounds.list_backgrounds() {
            if entry.name == file.map_name {
                default_background = Some(entry.id);
            }
            background_choices.push(Choice::new(Some(entry.id), entry.name));
        }

        bevy::log::info!(
            "Opened scene {} ({} sectors)",
            file.file_name,
            file.scene.layers.len()
        );

        let mut editor = Self {
            file,
            script_data,
            session,
            visibility,
            drag: DragController::new(),
            selection: None,
            canvas_selection: None,
            highlighted_sector: None,
            lists,
            layer_list,
            popover: None,
            choices,
            scenes,
            background_choices,
            background_choice: None,
            background: None,
            events: Vec::new(),
            background_error: None,
            services,
        };
        if let Err(e) = editor.choose_background(default_background) {
            bevy::log::warn!("Could not load map background: {}", e);
            editor.background_error = Some(e);
        }
        editor
    }

    /// Failure to load the map's own background when the scene was opened
    pub fn take_background_error(&mut self) -> Option<WorkspaceError> {
        self.background_error.take()
    }

    /// Close the scene, handing the session back
    pub fn into_session(self) -> EditorSession {
        self.session
    }

    pub fn file(&self) -> &SceneFile {
        &self.file
    }

    pub fn scene(&self) -> &Scene {
        &self.file.scene
    }

    pub fn script_data(&self) -> &ScriptData {
        &self.script_data
    }

    pub fn names(&self) -> ScriptNames<'_> {
        ScriptNames::new(&self.file, &self.script_data)
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn scale(&self) -> f64 {
        self.session.scale_factor
    }

    pub fn selection(&self) -> Option<EntityRef> {
        self.selection
    }

    /// Entity the canvas draws as selected
    pub fn canvas_selection(&self) -> Option<EntityRef> {
        self.canvas_selection
    }

    pub fn highlighted_sector(&self) -> Option<usize> {
        self.highlighted_sector
    }

    pub fn visibility(&self) -> &LayerVisibility {
        &self.visibility
    }

    pub fn show_grid(&self) -> bool {
        self.session.show_grid
    }

    /// Candidate position of the entity being dragged
    pub fn drag_preview(&self) -> Option<(EntityRef, ScenePosition)> {
        self.drag.preview()
    }

    pub fn list(&self, kind: EntityKind) -> Option<&EntityListView> {
        self.lists.get(&kind)
    }

    pub fn layer_list(&self) -> &LayerListView {
        &self.layer_list
    }

    pub fn popover(&self) -> Option<&Popover> {
        self.popover.as_ref()
    }

    pub fn popover_mut(&mut self) -> Option<&mut Popover> {
        self.popover.as_mut()
    }

    pub fn choices(&self) -> &EditorChoices {
        &self.choices
    }

    /// Scene files of the current map
    pub fn scenes(&self) -> &[String] {
        &self.scenes
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn background_choice(&self) -> Option<usize> {
        self.background_choice
    }

    pub fn background_choices(&self) -> &[Choice<Option<usize>>] {
        &self.background_choices
    }

    /// Canvas size in canvas pixels at the current scale
    pub fn canvas_size(&self) -> (f64, f64) {
        let (w, h) = match &self.background {
            Some(bg) => (bg.width, bg.height),
            None => (SIZE_REQUEST_NONE, SIZE_REQUEST_NONE),
        };
        (w as f64 * self.scale(), h as f64 * self.scale())
    }

    /// Take all view notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    // Canvas pointer

    pub fn pointer_pressed(&mut self, pixel: CanvasPixel) {
        let point = to_logical(pixel, self.scale());
        let target = hit_test(&self.file.scene, &self.visibility, point);
        self.drag.press(pixel, target);
        self.select(target, SelectionOrigin::UserClickedCanvas, false, Some(pixel));
        self.events.push(ViewEvent::Redraw);
    }

    pub fn pointer_moved(&mut self, pixel: CanvasPixel) {
        let scale = self.scale();
        if self.drag.motion(pixel, scale, &self.file.scene) {
            self.events.push(ViewEvent::Redraw);
        }
    }

    pub fn pointer_released(&mut self, pixel: CanvasPixel) {
        let scale = self.scale();
        match self.drag.release(pixel, scale) {
            ReleaseOutcome::Nothing => {}
            ReleaseOutcome::Click { target, anchor } => {
                self.select(
                    Some(target),
                    SelectionOrigin::UserClickedCanvas,
                    true,
                    Some(anchor),
                );
            }
            ReleaseOutcome::Moved { target, position } => self.commit_move(target, position),
        }
        self.events.push(ViewEvent::Redraw);
    }

    /// Abandon a press or drag in progress; the entity stays where it was
    pub fn cancel_pointer(&mut self) {
        if self.drag.is_dragging() {
            bevy::log::debug!("Drag cancelled");
            self.events.push(ViewEvent::Redraw);
        }
        self.drag.cancel();
    }

    fn commit_move(&mut self, target: EntityRef, position: ScenePosition) {
        let Some(mut entity) = self.file.scene.entity_mut(target) else {
            return;
        };
        *entity.position_mut() = position;
        bevy::log::debug!(
            "Moved {:?} to tile ({}, {}) offset ({}, {})",
            target,
            position.x_relative,
            position.y_relative,
            position.x_offset,
            position.y_offset
        );
        self.mark_modified();
    }

    // Editors

    /// Apply an editor change to the selected entity
    ///
    /// Returns false when nothing is selected or the value was rejected.
    pub fn edit_selected(&mut self, edit: EntityEdit) -> bool {
        let Some(target) = self.selection else {
            return false;
        };
        if !apply_edit(&mut self.file.scene, target, &edit, &self.choices) {
            bevy::log::debug!("Ignored edit {:?} on {:?}", edit, target);
            return false;
        }
        self.refresh_for_selected();
        true
    }

    /// Redraw, refresh the selected entity's list row and mark the scene changed
    fn refresh_for_selected(&mut self) {
        self.events.push(ViewEvent::Redraw);
        if let Some(target) = self.selection {
            let columns = entity_columns(&self.names(), &self.file.scene, target);
            if let (Some(list), Some(columns)) = (self.lists.get_mut(&target.kind), columns) {
                if let Some(row) = list.row_for(target) {
                    list.rows[row].columns = columns;
                    self.events.push(ViewEvent::ListRowUpdated {
                        kind: target.kind,
                        row,
                    });
                }
            }
        }
        self.mark_modified();
    }

    fn mark_modified(&self) {
        self.services.modifications.mark_modified(
            &self.file.map_name,
            self.file.scene_type,
            &self.file.file_name,
        );
    }

    // Toolbar

    pub fn zoom_in(&mut self) {
        self.session.scale_factor = zoom_in(self.session.scale_factor);
        self.events.push(ViewEvent::Redraw);
    }

    pub fn zoom_out(&mut self) {
        self.session.scale_factor = zoom_out(self.session.scale_factor);
        self.events.push(ViewEvent::Redraw);
    }

    pub fn set_grid(&mut self, show: bool) {
        self.session.show_grid = show;
        self.events.push(ViewEvent::Redraw);
    }

    /// Switch the canvas background; `None` draws no background
    pub fn choose_background(&mut self, map_id: Option<usize>) -> Result<(), WorkspaceError> {
        let background = match map_id {
            Some(id) => Some(
                self.session
                    .background_cache
                    .get_or_load(id, self.services.backgrounds.as_ref())?,
            ),
            None => None,
        };
        self.background_choice = map_id;
        self.background = background;
        self.events.push(ViewEvent::Redraw);
        Ok(())
    }

    /// Ask the host to open the background of this scene's map
    pub fn goto_background(&self) {
        let by_name = self
            .background_choices
            .iter()
            .find(|c| c.label == self.file.map_name)
            .and_then(|c| c.id);
        match by_name.or(self.background_choice) {
            Some(id) => self
                .services
                .navigation
                .open_related_view(OpenRequest::MapBackground(id)),
            None => bevy::log::warn!("No background for map {}", self.file.map_name),
        }
    }

    /// A scene of this map was picked in the scenes list
    pub fn scene_selected(&self, file_name: &str) {
        if file_name == self.file.file_name {
            return;
        }
        match OpenRequest::for_scene(&self.file.map_name, file_name) {
            Some(request) => self.services.navigation.open_related_view(request),
            None => bevy::log::warn!("Not a scene file: {}", file_name),
        }
    }

    // Layers

    pub fn set_layer_visible(&mut self, layer: usize, visible: bool) {
        self.visibility.set_visible(layer, visible);
        self.sync_layer_row(layer);
    }

    pub fn set_layer_solo(&mut self, layer: usize, solo: bool) {
        self.visibility.set_solo(layer, solo);
        self.sync_layer_row(layer);
    }

    pub fn toggle_layer_visible(&mut self, layer: usize) {
        if self.visibility.toggle_visible(layer).is_some() {
            self.sync_layer_row(layer);
        }
    }

    pub fn toggle_layer_solo(&mut self, layer: usize) {
        if self.visibility.toggle_solo(layer).is_some() {
            self.sync_layer_row(layer);
        }
    }

    fn sync_layer_row(&mut self, layer: usize) {
        if let (Some(row), Some(flags)) = (
            self.layer_list.rows.get_mut(layer),
            self.visibility.flags(layer),
        ) {
            row.visible = flags.visible;
            row.solo = flags.solo;
        }
        self.events.push(ViewEvent::Redraw);
    }
}
