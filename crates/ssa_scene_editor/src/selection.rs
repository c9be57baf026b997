//! Selection synchronization between canvas, list views and editors

use std::collections::BTreeMap;

use ssa_scene_core::{EntityKind, EntityRef, Scene, SceneEntity};

use crate::canvas::{bounding_box, CanvasPixel};
use crate::controller::{SceneEditor, ViewEvent};
use crate::editors::Popover;
use crate::layers::LayerVisibility;
use crate::naming::{layer_label, ScriptNames};

/// Where a selection request came from
///
/// List views report every selection change, including the ones the editor
/// makes itself while syncing. Only changes a user made in a list start a new
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    UserClickedCanvas,
    UserClickedList,
    ProgrammaticSync,
}

/// One row of an entity list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub layer: usize,
    pub index: usize,
    pub columns: Vec<String>,
}

/// View model of the actors, objects, performers or triggers list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityListView {
    pub kind: EntityKind,
    pub rows: Vec<ListRow>,
    pub selected: Option<usize>,
}

impl EntityListView {
    /// Row showing `target`, if it is of this list's kind
    pub fn row_for(&self, target: EntityRef) -> Option<usize> {
        if target.kind != self.kind {
            return None;
        }
        self.rows
            .iter()
            .position(|r| r.layer == target.layer && r.index == target.index)
    }

    /// Entity shown in a row
    pub fn target(&self, row: usize) -> Option<EntityRef> {
        self.rows
            .get(row)
            .map(|r| EntityRef::new(r.layer, self.kind, r.index))
    }

    pub fn column_headers(&self) -> &'static [&'static str] {
        match self.kind {
            EntityKind::Actor => &["Sector", "#", "Kind", "Script"],
            EntityKind::Object => &["Sector", "#", "Kind", "Script"],
            EntityKind::Performer => &["Sector", "#", "Type"],
            EntityKind::Trigger => &["Sector", "#", "Script"],
        }
    }
}

/// One row of the layer list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRow {
    pub index: usize,
    pub label: String,
    pub visible: bool,
    pub solo: bool,
}

/// View model of the layer (sector) list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerListView {
    pub rows: Vec<LayerRow>,
    pub selected: Option<usize>,
}

/// List row columns for one entity
pub fn entity_columns(names: &ScriptNames<'_>, scene: &Scene, target: EntityRef) -> Option<Vec<String>> {
    let columns = match scene.entity(target)? {
        SceneEntity::Actor(a) => names.actor_row(target.layer, target.index, a),
        SceneEntity::Object(o) => names.object_row(target.layer, target.index, o),
        SceneEntity::Performer(p) => names.performer_row(target.layer, target.index, p),
        SceneEntity::Trigger(t) => names.trigger_row(target.layer, target.index, t),
    };
    Some(columns)
}

/// Build all four entity lists in sector, then sequence order
pub fn build_entity_lists(
    names: &ScriptNames<'_>,
    scene: &Scene,
) -> BTreeMap<EntityKind, EntityListView> {
    EntityKind::all()
        .iter()
        .map(|&kind| {
            let rows = scene
                .refs_of_kind(kind)
                .into_iter()
                .filter_map(|target| {
                    Some(ListRow {
                        layer: target.layer,
                        index: target.index,
                        columns: entity_columns(names, scene, target)?,
                    })
                })
                .collect();
            (
                kind,
                EntityListView {
                    kind,
                    rows,
                    selected: None,
                },
            )
        })
        .collect()
}

pub fn build_layer_list(scene: &Scene, visibility: &LayerVisibility) -> LayerListView {
    let rows = scene
        .layers
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            let flags = visibility.flags(index).unwrap_or_default();
            LayerRow {
                index,
                label: layer_label(index, layer),
                visible: flags.visible,
                solo: flags.solo,
            }
        })
        .collect();
    LayerListView {
        rows,
        selected: None,
    }
}

impl SceneEditor {
    /// Make `target` the selection and bring every view in line with it
    ///
    /// Order: close the open editor, highlight the sector, clear the selection
    /// and sync the lists, update the canvas, optionally open the editor,
    /// then commit the new selection.
    pub fn select(
        &mut self,
        target: Option<EntityRef>,
        origin: SelectionOrigin,
        open_editor: bool,
        anchor: Option<CanvasPixel>,
    ) {
        let target = target.filter(|t| self.file.scene.entity(*t).is_some());
        bevy::log::debug!("Selecting {:?} from {:?}", target, origin);

        self.close_editor();

        let layer = target.map(|t| t.layer);
        self.layer_list.selected = layer;
        self.highlighted_sector = layer;
        self.events.push(ViewEvent::LayerHighlighted(layer));

        self.selection = None;
        let kinds: Vec<EntityKind> = self.lists.keys().copied().collect();
        for kind in kinds {
            let row = target.and_then(|t| self.lists.get(&kind).and_then(|l| l.row_for(t)));
            self.on_list_selection_changed(kind, row, SelectionOrigin::ProgrammaticSync);
        }

        self.canvas_selection = target;
        self.events.push(ViewEvent::CanvasSelection(target));

        if open_editor {
            if let Some(target) = target {
                self.open_editor(target, anchor);
            }
        }

        self.selection = target;
        self.events.push(ViewEvent::SelectionCommitted(target));
    }

    /// Selection in an entity list changed
    pub fn on_list_selection_changed(
        &mut self,
        kind: EntityKind,
        row: Option<usize>,
        origin: SelectionOrigin,
    ) {
        let Some(list) = self.lists.get_mut(&kind) else {
            return;
        };
        list.selected = row;
        let target = row.and_then(|r| list.target(r));
        self.events.push(ViewEvent::ListRowSelected { kind, row });

        if origin != SelectionOrigin::UserClickedList {
            return;
        }
        let Some(target) = target else {
            return;
        };
        for (other_kind, other) in self.lists.iter_mut() {
            if *other_kind != kind {
                other.selected = None;
            }
        }
        self.select(Some(target), origin, false, None);
    }

    /// A list row was double-clicked: select it and open its editor
    pub fn list_row_activated(&mut self, kind: EntityKind, row: usize) {
        let Some(target) = self.lists.get(&kind).and_then(|l| l.target(row)) else {
            return;
        };
        self.select(Some(target), SelectionOrigin::UserClickedList, true, None);
    }

    /// A row of the layer list was selected (or deselected)
    pub fn layer_row_selected(&mut self, layer: Option<usize>) {
        let layer = layer.filter(|l| *l < self.file.scene.layers.len());
        self.layer_list.selected = layer;
        self.highlighted_sector = layer;
        self.events.push(ViewEvent::LayerHighlighted(layer));
        self.events.push(ViewEvent::Redraw);
    }

    pub fn close_editor(&mut self) {
        if self.popover.take().is_some() {
            self.events.push(ViewEvent::EditorClosed);
        }
    }

    fn open_editor(&mut self, target: EntityRef, anchor: Option<CanvasPixel>) {
        let Some(entity) = self.file.scene.entity(target) else {
            return;
        };
        let anchor = anchor.unwrap_or_else(|| {
            // Scaled box centre, not offset by the canvas border
            let center = bounding_box(entity).center();
            let scale = self.scale();
            CanvasPixel::new(center.x as f64 * scale, center.y as f64 * scale)
        });
        self.popover = Some(Popover::for_entity(target, entity, anchor));
        self.events.push(ViewEvent::EditorOpened(target));
    }
}
