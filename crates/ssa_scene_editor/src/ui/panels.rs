//! Left utility notebook: scenes, sectors, entity lists, events and scripts

use bevy_egui::egui;
use ssa_scene_core::EntityKind;

use crate::controller::SceneEditor;
use crate::naming::file_short_name;
use crate::selection::SelectionOrigin;
use crate::session::UtilityTab;

/// Render the notebook tabs and the active page
pub fn render_utility_panel(ui: &mut egui::Ui, editor: &mut SceneEditor) {
    ui.horizontal_wrapped(|ui| {
        for tab in UtilityTab::all() {
            let selected = editor.session().last_tab == *tab;
            if ui.selectable_label(selected, tab.label()).clicked() {
                editor.session_mut().last_tab = *tab;
            }
        }
    });
    ui.separator();

    let tab = editor.session().last_tab;
    egui::ScrollArea::vertical()
        .id_salt("utility_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| match tab {
            UtilityTab::Scenes => render_scenes(ui, editor),
            UtilityTab::Layers => render_layers(ui, editor),
            UtilityTab::Actors => render_entity_list(ui, editor, EntityKind::Actor),
            UtilityTab::Objects => render_entity_list(ui, editor, EntityKind::Object),
            UtilityTab::Performers => render_entity_list(ui, editor, EntityKind::Performer),
            UtilityTab::Triggers => render_entity_list(ui, editor, EntityKind::Trigger),
            UtilityTab::Events => render_events(ui, editor),
            UtilityTab::Scripts => render_scripts(ui, editor),
        });
}

fn render_scenes(ui: &mut egui::Ui, editor: &SceneEditor) {
    let mut picked = None;
    for file_name in editor.scenes() {
        let current = *file_name == editor.file().file_name;
        if ui
            .selectable_label(current, file_short_name(file_name))
            .on_hover_text(file_name)
            .clicked()
        {
            picked = Some(file_name.clone());
        }
    }
    if let Some(file_name) = picked {
        editor.scene_selected(&file_name);
    }
}

enum LayerAction {
    ToggleVisible(usize),
    ToggleSolo(usize),
    Select(Option<usize>),
}

fn render_layers(ui: &mut egui::Ui, editor: &mut SceneEditor) {
    let mut action = None;
    let list = editor.layer_list();
    egui::Grid::new("layer_list")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Visible");
            ui.strong("Solo");
            ui.strong("Sector");
            ui.end_row();

            for row in &list.rows {
                let mut visible = row.visible;
                if ui.checkbox(&mut visible, "").changed() {
                    action = Some(LayerAction::ToggleVisible(row.index));
                }
                let mut solo = row.solo;
                if ui.checkbox(&mut solo, "").changed() {
                    action = Some(LayerAction::ToggleSolo(row.index));
                }
                let selected = list.selected == Some(row.index);
                if ui.selectable_label(selected, &row.label).clicked() {
                    let layer = if selected { None } else { Some(row.index) };
                    action = Some(LayerAction::Select(layer));
                }
                ui.end_row();
            }
        });

    match action {
        Some(LayerAction::ToggleVisible(layer)) => editor.toggle_layer_visible(layer),
        Some(LayerAction::ToggleSolo(layer)) => editor.toggle_layer_solo(layer),
        Some(LayerAction::Select(layer)) => editor.layer_row_selected(layer),
        None => {}
    }
}

fn render_entity_list(ui: &mut egui::Ui, editor: &mut SceneEditor, kind: EntityKind) {
    let Some(list) = editor.list(kind) else {
        return;
    };
    if list.rows.is_empty() {
        ui.label(format!("No {}", kind.plural_name().to_lowercase()));
        return;
    }

    let mut clicked = None;
    let mut activated = None;
    let headers = list.column_headers();
    egui::Grid::new(("entity_list", kind))
        .num_columns(headers.len())
        .striped(true)
        .show(ui, |ui| {
            for header in headers {
                ui.strong(*header);
            }
            ui.end_row();

            for (row_idx, row) in list.rows.iter().enumerate() {
                let selected = list.selected == Some(row_idx);
                let mut columns = row.columns.iter();
                let first = columns.next().map(String::as_str).unwrap_or_default();
                let response = ui.selectable_label(selected, first);
                if response.double_clicked() {
                    activated = Some(row_idx);
                } else if response.clicked() {
                    clicked = Some(row_idx);
                }
                for column in columns {
                    ui.label(column);
                }
                ui.end_row();
            }
        });

    if let Some(row) = activated {
        editor.list_row_activated(kind, row);
    } else if let Some(row) = clicked {
        editor.on_list_selection_changed(kind, Some(row), SelectionOrigin::UserClickedList);
    }
}

fn render_events(ui: &mut egui::Ui, editor: &SceneEditor) {
    let names = editor.names();
    egui::Grid::new("event_list")
        .num_columns(5)
        .striped(true)
        .show(ui, |ui| {
            for header in ["#", "Coroutine", "Script", "Unk2", "Unk3"] {
                ui.strong(header);
            }
            ui.end_row();

            for (index, event) in names.events.iter().enumerate() {
                ui.label(index.to_string());
                for column in names.event_row(event) {
                    ui.label(column);
                }
                ui.end_row();
            }
        });
}

fn render_scripts(ui: &mut egui::Ui, editor: &SceneEditor) {
    egui::Grid::new("script_list")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("File");
            ui.strong("Path");
            ui.end_row();

            for script in &editor.file().scripts {
                ui.label(file_short_name(script));
                ui.label(script);
                ui.end_row();
            }
        });
}
