//! Entity editor popover

use bevy_egui::egui;
use ssa_scene_core::SceneEntity;

use super::UiState;
use crate::controller::SceneEditor;
use crate::editors::{choice_label, Choice, EntityEdit};

/// Combo box over a choice list; returns the newly picked id
fn choice_combo<T: PartialEq + Copy>(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    choices: &[Choice<T>],
    current: T,
) -> Option<T> {
    let mut picked = None;
    ui.label(label);
    let selected_text = choice_label(choices, &current).unwrap_or_else(|| "?".to_string());
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for choice in choices {
                if ui
                    .selectable_label(choice.id == current, &choice.label)
                    .clicked()
                    && choice.id != current
                {
                    picked = Some(choice.id);
                }
            }
        });
    ui.end_row();
    picked
}

/// Size field; returns the text when it changed
fn size_field(ui: &mut egui::Ui, label: &str, text: &mut String) -> Option<String> {
    ui.label(label);
    let changed = ui
        .add(egui::TextEdit::singleline(text).desired_width(60.0))
        .changed();
    ui.end_row();
    changed.then(|| text.clone())
}

/// Render the popover of the open editor, if any
pub fn render_popover(ctx: &egui::Context, ui_state: &UiState, editor: &mut SceneEditor) {
    let Some(popover) = editor.popover().cloned() else {
        return;
    };
    let Some(entity) = editor.scene().entity(popover.target) else {
        return;
    };

    let mut width_text = popover.width_text.clone();
    let mut height_text = popover.height_text.clone();
    let mut edits = Vec::new();
    let mut open = true;
    let choices = editor.choices();
    let target = popover.target;
    let anchor = ui_state.canvas_origin
        + egui::vec2(popover.anchor.x as f32, popover.anchor.y as f32);

    egui::Window::new(format!("{} {}", target.kind.display_name(), target.index))
        .id(egui::Id::new("entity_popover"))
        .collapsible(false)
        .resizable(false)
        .default_pos(anchor)
        .open(&mut open)
        .show(ctx, |ui| {
            egui::Grid::new("entity_popover_fields")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Sector");
                    ui.label(
                        choice_label(&choices.sectors, &target.layer)
                            .unwrap_or_else(|| target.layer.to_string()),
                    );
                    ui.end_row();

                    match entity {
                        SceneEntity::Actor(actor) => {
                            if let Some(id) = choice_combo(
                                ui,
                                "actor_kind",
                                "Kind",
                                &choices.actor_kinds,
                                actor.kind,
                            ) {
                                edits.push(EntityEdit::Kind(id));
                            }
                            if let Some(id) = choice_combo(
                                ui,
                                "actor_script",
                                "Talk script",
                                &choices.scripts,
                                actor.script_id,
                            ) {
                                edits.push(EntityEdit::TalkScript(id));
                            }
                        }
                        SceneEntity::Object(object) => {
                            if let Some(id) = choice_combo(
                                ui,
                                "object_kind",
                                "Kind",
                                &choices.object_kinds,
                                object.kind,
                            ) {
                                edits.push(EntityEdit::Kind(id));
                            }
                            if let Some(id) = choice_combo(
                                ui,
                                "object_script",
                                "Talk script",
                                &choices.scripts,
                                object.script_id,
                            ) {
                                edits.push(EntityEdit::TalkScript(id));
                            }
                        }
                        SceneEntity::Performer(performer) => {
                            if let Some(t) = choice_combo(
                                ui,
                                "performer_type",
                                "Type",
                                &choices.performer_types,
                                performer.performer_type,
                            ) {
                                edits.push(EntityEdit::PerformerType(t));
                            }
                        }
                        SceneEntity::Trigger(trigger) => {
                            if let Some(id) = choice_combo(
                                ui,
                                "trigger_id",
                                "Script",
                                &choices.triggers,
                                trigger.trigger_id,
                            ) {
                                edits.push(EntityEdit::TriggerId(id));
                            }
                        }
                    }

                    if !matches!(entity, SceneEntity::Trigger(_)) {
                        if let Some(id) = choice_combo(
                            ui,
                            "direction",
                            "Direction",
                            &choices.directions,
                            entity.position().direction,
                        ) {
                            edits.push(EntityEdit::Direction(id));
                        }
                    }

                    if entity.extent().is_some() {
                        if let Some(text) = size_field(ui, "Width", &mut width_text) {
                            edits.push(EntityEdit::Width(text));
                        }
                        if let Some(text) = size_field(ui, "Height", &mut height_text) {
                            edits.push(EntityEdit::Height(text));
                        }
                    }

                    let pos = entity.position();
                    ui.label("Position");
                    ui.label(format!(
                        "tile ({}, {}) offset ({}, {})",
                        pos.x_relative, pos.y_relative, pos.x_offset, pos.y_offset
                    ));
                    ui.end_row();
                });
        });

    if !open {
        editor.close_editor();
        return;
    }
    if let Some(popover) = editor.popover_mut() {
        popover.width_text = width_text;
        popover.height_text = height_text;
    }
    for edit in edits {
        editor.edit_selected(edit);
    }
}
